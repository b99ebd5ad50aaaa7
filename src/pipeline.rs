// src/pipeline.rs

use tracing::{info, instrument};

use crate::config::FetchConfig;
use crate::error::Result;
use crate::fetch::{build_client, fetch_table, list_sectors, resolve_identifiers, select_sector};
use crate::write::{write_lightcurve, Summary};

/// Resolve the target, pick its first sector, fetch that sector's light curve
/// and write it to `config.output`.
///
/// Each request finishes before the next is sent. Any failure aborts the run
/// before the output file is touched.
#[instrument(level = "info", skip(config), fields(planet = %config.target))]
pub async fn run(config: &FetchConfig) -> Result<Summary> {
    let client = build_client()?;

    // ─── 1) name → TIC id + TCE ──────────────────────────────────────
    let ids = resolve_identifiers(&client, &config.planet_base, &config.target).await?;

    // ─── 2) TCE → sectors, first one wins ────────────────────────────
    let sectors = list_sectors(&client, &config.dv_base, &ids).await?;
    let sector = select_sector(&sectors, ids.tce())?;
    info!(sector, "using sector");

    // ─── 3) sector → table ───────────────────────────────────────────
    let table = fetch_table(&client, &config.dv_base, &ids, sector).await?;

    // ─── 4) table → CSV ──────────────────────────────────────────────
    let summary = write_lightcurve(&table, &config.output)?;
    info!(
        path = %summary.path.display(),
        rows = summary.rows,
        "light curve saved"
    );
    Ok(summary)
}

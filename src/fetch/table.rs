// src/fetch/table.rs

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

use super::{get_json, Identifiers};
use crate::error::{Result, Stage};
use crate::table::LightCurveTable;

#[derive(Debug, Deserialize)]
struct TableResponse {
    data: Value,
}

/// Fetch the phase-folded light curve for one sector of a TCE.
#[instrument(level = "info", skip(client, dv_base, ids), fields(tic_id = %ids.tic_id(), tce = ids.tce()))]
pub async fn fetch_table(
    client: &Client,
    dv_base: &Url,
    ids: &Identifiers,
    sector: &str,
) -> Result<LightCurveTable> {
    let url = dv_base.join(&format!("{}/table/", ids.tic_id()))?;
    let resp: TableResponse = get_json(
        client,
        &url,
        &[("tce", ids.tce()), ("sector", sector)],
        Stage::Table,
    )
    .await?;

    let table = LightCurveTable::from_json(&resp.data)?;
    info!(
        rows = table.n_rows(),
        columns = ?table.column_names(),
        "retrieved light curve"
    );
    Ok(table)
}

// src/fetch/sectors.rs

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

use super::{get_json, Identifiers};
use crate::error::{FetchError, Result, Stage};

/// Sector descriptors are the leading characters of a TCE entry, e.g.
/// "s0002-s0002" out of "s0002-s0002:TCE_1".
pub const SECTOR_PREFIX_LEN: usize = 11;

#[derive(Debug, Deserialize)]
struct TceResponse {
    #[serde(rename = "TCE")]
    tce: Vec<String>,
}

/// Entries mentioning `tce`, in server order.
pub fn matching_entries<S: AsRef<str>>(entries: &[S], tce: &str) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.as_ref())
        .filter(|e| e.contains(tce))
        .map(str::to_string)
        .collect()
}

fn sector_prefix(entry: &str) -> String {
    entry.chars().take(SECTOR_PREFIX_LEN).collect()
}

/// Sector descriptors for every entry mentioning `tce`, in server order.
pub fn filter_sectors<S: AsRef<str>>(entries: &[S], tce: &str) -> Vec<String> {
    matching_entries(entries, tce)
        .iter()
        .map(|e| sector_prefix(e))
        .collect()
}

/// The sector to fetch: the first one the server listed.
pub fn select_sector<'a>(sectors: &'a [String], tce: &str) -> Result<&'a str> {
    sectors
        .first()
        .map(String::as_str)
        .ok_or_else(|| FetchError::EmptyResult {
            tce: tce.to_string(),
        })
}

/// List the sectors in which the archive has this TCE.
#[instrument(level = "info", skip(client, dv_base, ids), fields(tic_id = %ids.tic_id(), tce = ids.tce()))]
pub async fn list_sectors(client: &Client, dv_base: &Url, ids: &Identifiers) -> Result<Vec<String>> {
    let url = dv_base.join(&format!("{}/tces/", ids.tic_id()))?;
    let resp: TceResponse = get_json(client, &url, &[("tce", ids.tce())], Stage::Sectors).await?;

    let sectors = filter_sectors(&resp.tce, ids.tce());
    info!(listed = resp.tce.len(), ?sectors, "available sectors");
    Ok(sectors)
}

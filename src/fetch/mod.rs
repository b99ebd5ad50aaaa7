// src/fetch/mod.rs

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{FetchError, Result, Stage};

pub mod identifiers;
pub mod sectors;
pub mod table;

pub use identifiers::{resolve_identifiers, Identifiers, TicId};
pub use sectors::{filter_sectors, list_sectors, matching_entries, select_sector};
pub use table::fetch_table;

/// Build the HTTP client used for every archive request.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Client)
}

/// GET `url` with `query`, require a 200 and decode the body as `T`.
///
/// Anything other than 200 is a failure for this archive, including other 2xx codes.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &Url,
    query: &[(&str, &str)],
    stage: Stage,
) -> Result<T> {
    debug!(%url, ?query, %stage, "GET");
    let resp = client
        .get(url.clone())
        .query(query)
        .send()
        .await
        .map_err(|source| FetchError::Network { stage, source })?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            stage,
            status: status.as_u16(),
        });
    }

    let body = resp
        .bytes()
        .await
        .map_err(|source| FetchError::Network { stage, source })?;
    debug!(%stage, bytes = body.len(), "response body");

    serde_json::from_slice(&body).map_err(|source| FetchError::Decode { stage, source })
}

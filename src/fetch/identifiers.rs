// src/fetch/identifiers.rs

use std::fmt;

use reqwest::Client;
use serde::{de, Deserialize, Deserializer};
use tracing::{info, instrument};
use url::Url;

use super::get_json;
use crate::error::{Result, Stage};

/// TESS Input Catalog identifier, e.g. 100100827 for WASP-18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicId(pub u64);

impl fmt::Display for TicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The archive has served this both as a number and as a numeric string.
impl<'de> Deserialize<'de> for TicId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }

        match Repr::deserialize(d)? {
            Repr::Number(n) => Ok(TicId(n)),
            Repr::Text(s) => s
                .trim()
                .parse()
                .map(TicId)
                .map_err(|e| de::Error::custom(format!("tessID {:?}: {}", s, e))),
        }
    }
}

/// Catalog identifier plus the transit-candidate label it was resolved with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identifiers {
    #[serde(rename = "tessID")]
    tic_id: TicId,
    #[serde(rename = "tessTCE")]
    tce: String,
}

impl Identifiers {
    pub fn new(tic_id: TicId, tce: impl Into<String>) -> Self {
        Self {
            tic_id,
            tce: tce.into(),
        }
    }

    pub fn tic_id(&self) -> TicId {
        self.tic_id
    }

    pub fn tce(&self) -> &str {
        &self.tce
    }
}

/// Resolve a planet name (e.g. "WASP-18 b") to its TIC id and TCE label.
#[instrument(level = "info", skip(client, planet_base))]
pub async fn resolve_identifiers(
    client: &Client,
    planet_base: &Url,
    name: &str,
) -> Result<Identifiers> {
    let url = planet_base.join("identifiers/")?;
    let ids: Identifiers = get_json(client, &url, &[("name", name)], Stage::Identifiers).await?;
    info!(tic_id = %ids.tic_id, tce = %ids.tce, "resolved identifiers");
    Ok(ids)
}

use std::path::PathBuf;

use url::Url;

pub const DEFAULT_TARGET: &str = "WASP-18 b";
pub const DEFAULT_OUTPUT: &str = "wasp18b_lightcurve.csv";

static PLANET_BASE_URL: &str = "https://exo.mast.stsci.edu/api/v0.1/exoplanets/";
static DV_BASE_URL: &str = "https://exo.mast.stsci.edu/api/v0.1/dvdata/tess/";

/// Everything a single run needs. `Default` targets WASP-18 b on the MAST archive.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Planet name as the archive knows it, e.g. "WASP-18 b".
    pub target: String,
    /// CSV destination; overwritten if it exists.
    pub output: PathBuf,
    /// Base of the exoplanet catalog API (`identifiers/` lives under it).
    pub planet_base: Url,
    /// Base of the TESS data-validation API (`<ticid>/tces/`, `<ticid>/table/`).
    pub dv_base: Url,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            planet_base: Url::parse(PLANET_BASE_URL).expect("planet base URL should parse"),
            dv_base: Url::parse(DV_BASE_URL).expect("data-validation base URL should parse"),
        }
    }
}

impl FetchConfig {
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Point both APIs at `root`, keeping the archive's path layout
    /// (`<root>/exoplanets/`, `<root>/dvdata/tess/`).
    pub fn with_api_root(mut self, root: &Url) -> crate::error::Result<Self> {
        let root = with_trailing_slash(root);
        self.planet_base = root.join("exoplanets/")?;
        self.dv_base = root.join("dvdata/tess/")?;
        Ok(self)
    }
}

/// `Url::join` drops the last path segment unless it ends in '/'.
pub(crate) fn with_trailing_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        url.clone()
    } else {
        let mut u = url.clone();
        u.set_path(&format!("{}/", url.path()));
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_mast() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.target, "WASP-18 b");
        assert_eq!(cfg.output, PathBuf::from("wasp18b_lightcurve.csv"));
        assert_eq!(
            cfg.planet_base.join("identifiers/").unwrap().as_str(),
            "https://exo.mast.stsci.edu/api/v0.1/exoplanets/identifiers/"
        );
    }

    #[test]
    fn api_root_keeps_path_layout() {
        let root = Url::parse("http://127.0.0.1:8080/api/v0.1").unwrap();
        let cfg = FetchConfig::default().with_api_root(&root).unwrap();
        assert_eq!(
            cfg.planet_base.as_str(),
            "http://127.0.0.1:8080/api/v0.1/exoplanets/"
        );
        assert_eq!(
            cfg.dv_base.as_str(),
            "http://127.0.0.1:8080/api/v0.1/dvdata/tess/"
        );
    }
}

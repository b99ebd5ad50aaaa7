//! Fetch a phase-folded TESS light curve from the MAST exoplanet archive and
//! save it as CSV.
//!
//! The pipeline is strictly sequential: resolve the planet name to a TIC id and
//! TCE label, list the sectors for that TCE, fetch the first sector's table,
//! write it out. See [`pipeline::run`].

pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod table;
pub mod write;

pub use config::FetchConfig;
pub use error::{FetchError, Result, Stage};
pub use pipeline::run;
pub use table::LightCurveTable;
pub use write::Summary;

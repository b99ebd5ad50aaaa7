// src/write.rs

use std::{
    fmt, fs,
    io::BufWriter,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::error::{FetchError, Result};
use crate::table::{Column, LightCurveTable, LC_DETREND, PHASE};

/// What was written, for the console report.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub phase_range: Option<(f64, f64)>,
    pub flux_range: Option<(f64, f64)>,
    /// Estimated size of the table in memory.
    pub memory_bytes: usize,
    /// Size of the CSV on disk.
    pub file_bytes: u64,
}

fn fmt_range(range: Option<(f64, f64)>, precision: usize) -> String {
    match range {
        Some((lo, hi)) => format!("{:.*} to {:.*}", precision, lo, precision, hi),
        None => "n/a".to_string(),
    }
}

impl Summary {
    pub fn phase_range_text(&self) -> String {
        fmt_range(self.phase_range, 4)
    }

    pub fn flux_range_text(&self) -> String {
        fmt_range(self.flux_range, 6)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved {} rows to {}", self.rows, self.path.display())?;
        writeln!(f, "Columns: {}", self.columns.join(", "))?;
        writeln!(f, "Phase range: {} days", self.phase_range_text())?;
        writeln!(f, "Flux range: {}", self.flux_range_text())?;
        writeln!(f, "Memory usage: {:.2} KB", self.memory_bytes as f64 / 1024.0)?;
        write!(f, "File size: {:.2} KB", self.file_bytes as f64 / 1024.0)
    }
}

/// Validate, write `table` to `path` as CSV and summarise it.
///
/// `PHASE` and `LC_DETREND` must be present; if either is missing nothing is written.
pub fn write_lightcurve<P: AsRef<Path>>(table: &LightCurveTable, path: P) -> Result<Summary> {
    let path = path.as_ref();
    let phase_range = table.range(PHASE)?;
    let flux_range = table.range(LC_DETREND)?;

    info!(path = %path.display(), rows = table.n_rows(), "saving light curve");
    write_csv(table, path)?;
    let file_bytes = fs::metadata(path)?.len();

    Ok(Summary {
        path: path.to_path_buf(),
        rows: table.n_rows(),
        columns: table.column_names().into_iter().map(String::from).collect(),
        phase_range,
        flux_range,
        memory_bytes: table.estimated_memory_bytes(),
        file_bytes,
    })
}

/// Write `table` as comma-separated text with a header row.
///
/// Goes through a hidden sibling temp file and a rename, so `path` is either
/// the old file or the complete new one. NaN is written as an empty field.
pub fn write_csv<P: AsRef<Path>>(table: &LightCurveTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "lightcurve.csv".to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    if let Err(e) = write_csv_to(table, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    debug!(path = %path.display(), "renamed into place");
    Ok(())
}

fn write_csv_to(table: &LightCurveTable, tmp_path: &Path) -> Result<()> {
    let file = fs::File::create(tmp_path)?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(file));

    wtr.write_record(table.column_names())?;
    let mut record = Vec::with_capacity(table.n_columns());
    for row in 0..table.n_rows() {
        record.clear();
        record.extend(table.columns().iter().map(|c| format_cell(c.values[row])));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn format_cell(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        v.to_string()
    }
}

/// Read a CSV produced by [`write_csv`] back into a table. Empty fields are NaN.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<LightCurveTable> {
    let mut rdr = csv::Reader::from_path(path.as_ref())?;
    let mut columns: Vec<Column> = rdr
        .headers()?
        .iter()
        .map(|name| Column {
            name: name.to_string(),
            values: Vec::new(),
        })
        .collect();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        for (col, field) in columns.iter_mut().zip(record.iter()) {
            let field = field.trim();
            let value = if field.is_empty() {
                f64::NAN
            } else {
                field.parse().map_err(|_| FetchError::InvalidCell {
                    column: col.name.clone(),
                    row,
                })?
            };
            col.values.push(value);
        }
    }

    LightCurveTable::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> LightCurveTable {
        LightCurveTable::from_json(&json!({
            "PHASE": [-0.5, 0.0, 0.5],
            "LC_DETREND": [1.0, 0.99, 1.0],
        }))
        .unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("wasp18b_lightcurve.csv");

        let summary = write_lightcurve(&sample(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["PHASE,LC_DETREND", "-0.5,1", "0,0.99", "0.5,1"]);

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.columns, vec!["PHASE", "LC_DETREND"]);
        assert_eq!(summary.phase_range_text(), "-0.5000 to 0.5000");
        assert_eq!(summary.flux_range_text(), "0.990000 to 1.000000");
        assert_eq!(summary.file_bytes, text.len() as u64);
        assert!(summary
            .to_string()
            .contains("Phase range: -0.5000 to 0.5000 days"));
    }

    #[test]
    fn round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lc.csv");
        let table = LightCurveTable::from_json(&json!({
            "PHASE": [-0.4999871, 0.0001234, 0.25, 0.49999],
            "LC_DETREND": [1.000213, null, 0.98765432101, 1.0],
            "MODEL_INIT": [1.0, 0.99, 0.985, 1.0],
        }))
        .unwrap();

        write_csv(&table, &path).unwrap();
        let back = read_csv(&path).unwrap();

        assert_eq!(back.column_names(), table.column_names());
        assert_eq!(back.n_rows(), table.n_rows());
        for (a, b) in table.columns().iter().zip(back.columns()) {
            for (x, y) in a.values.iter().zip(&b.values) {
                assert!((x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lc.csv");
        fs::write(&path, "stale contents\n").unwrap();

        write_lightcurve(&sample(), &path).unwrap();
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("PHASE,LC_DETREND\n"));
        assert!(!tmp.path().join(".lc.csv.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lc.csv");
        fs::create_dir(&path).unwrap();

        match write_lightcurve(&sample(), &path) {
            Err(FetchError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(path.is_dir());
        assert!(!tmp.path().join(".lc.csv.tmp").exists());
    }

    #[test]
    fn missing_column_writes_nothing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lc.csv");
        let table = LightCurveTable::from_json(&json!({"PHASE": [0.0, 0.1]})).unwrap();

        match write_lightcurve(&table, &path) {
            Err(FetchError::ColumnMissing { column }) => assert_eq!(column, LC_DETREND),
            other => panic!("expected ColumnMissing, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn empty_table_reports_na() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("lc.csv");
        let table =
            LightCurveTable::from_json(&json!({"PHASE": [], "LC_DETREND": []})).unwrap();

        let summary = write_lightcurve(&table, &path).unwrap();
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.phase_range_text(), "n/a");
        assert_eq!(fs::read_to_string(&path).unwrap(), "PHASE,LC_DETREND\n");
    }
}

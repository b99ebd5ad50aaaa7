// src/table.rs

use serde_json::{Map, Value};

use crate::error::{FetchError, Result};

pub const PHASE: &str = "PHASE";
pub const LC_DETREND: &str = "LC_DETREND";
pub const MODEL_INIT: &str = "MODEL_INIT";

/// Fixed per-table overhead the dataframe estimate adds for the row index.
const INDEX_OVERHEAD_BYTES: usize = 128;

/// A named column of numeric samples. Missing values are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Phase-folded light curve as returned by the archive.
///
/// The column set is whatever the server sends (`PHASE`, `LC_DETREND`,
/// `MODEL_INIT`, ...), kept in server order. All columns have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightCurveTable {
    columns: Vec<Column>,
}

impl LightCurveTable {
    /// Build from already-decoded columns, rejecting unequal lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for col in &columns[1..] {
                if col.values.len() != expected {
                    return Err(FetchError::RaggedTable {
                        column: col.name.clone(),
                        len: col.values.len(),
                        expected,
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Decode the `data` field of a table response.
    ///
    /// Accepts column-oriented (`{"PHASE": [..], ..}`) and row-oriented
    /// (`[{"PHASE": .., ..}, ..]`) payloads.
    pub fn from_json(data: &Value) -> Result<Self> {
        match data {
            Value::Object(map) => Self::from_column_map(map),
            Value::Array(rows) => Self::from_records(rows),
            _ => Err(FetchError::TableShape(
                "data is neither a column map nor a list of rows",
            )),
        }
    }

    fn from_column_map(map: &Map<String, Value>) -> Result<Self> {
        let mut columns = Vec::with_capacity(map.len());
        for (name, cells) in map {
            let values = match cells {
                Value::Array(cells) => cells
                    .iter()
                    .enumerate()
                    .map(|(row, v)| cell_to_f64(name, row, v))
                    .collect::<Result<Vec<_>>>()?,
                _ => return Err(FetchError::TableShape("column is not a list")),
            };
            columns.push(Column {
                name: name.clone(),
                values,
            });
        }
        Self::from_columns(columns)
    }

    fn from_records(rows: &[Value]) -> Result<Self> {
        let mut columns: Vec<Column> = Vec::new();
        for (row, record) in rows.iter().enumerate() {
            let record = record
                .as_object()
                .ok_or(FetchError::TableShape("row is not an object"))?;
            for (name, cell) in record {
                let value = cell_to_f64(name, row, cell)?;
                match columns.iter_mut().find(|c| &c.name == name) {
                    Some(col) => {
                        // a key absent from earlier rows reads as missing there
                        col.values.resize(row, f64::NAN);
                        col.values.push(value);
                    }
                    None => {
                        let mut values = vec![f64::NAN; row];
                        values.push(value);
                        columns.push(Column {
                            name: name.clone(),
                            values,
                        });
                    }
                }
            }
        }
        for col in &mut columns {
            col.values.resize(rows.len(), f64::NAN);
        }
        Self::from_columns(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Like [`column`](Self::column) but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&[f64]> {
        self.column(name).ok_or_else(|| FetchError::ColumnMissing {
            column: name.to_string(),
        })
    }

    /// Min and max of a column, ignoring NaN. `None` when nothing is finite.
    pub fn range(&self, name: &str) -> Result<Option<(f64, f64)>> {
        Ok(min_max(self.require(name)?))
    }

    /// Rough in-memory footprint: 8 bytes per cell plus a fixed index overhead,
    /// the same figure a dataframe `memory_usage(deep)` sum gives for float columns.
    pub fn estimated_memory_bytes(&self) -> usize {
        let cells = self.n_rows() * self.n_columns() * std::mem::size_of::<f64>();
        INDEX_OVERHEAD_BYTES + cells
    }
}

fn cell_to_f64(column: &str, row: usize, v: &Value) -> Result<f64> {
    match v {
        Value::Null => Ok(f64::NAN),
        Value::Number(n) => n.as_f64().ok_or_else(|| FetchError::InvalidCell {
            column: column.to_string(),
            row,
        }),
        _ => Err(FetchError::InvalidCell {
            column: column.to_string(),
            row,
        }),
    }
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

use std::collections::BTreeMap;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{CaseGenError, Result};
use crate::model::{Scalar, Value, VariableSource};

/// Sheet holding the design variables.
pub const VARIABLES_SHEET: &str = "Variables";

/// Reads named design variables from an Excel workbook.
///
/// The [`VARIABLES_SHEET`] starts with a header row. Every following row is
/// `name, v1, v2, ...`: one value gives a scalar, several values a vector,
/// and a name repeated over several rows a matrix with one row per sheet row.
pub fn read_variables(path: &Path) -> Result<VariableSource> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range(VARIABLES_SHEET)
        .ok_or_else(|| {
            CaseGenError::InvalidWorkbook(format!("missing sheet '{VARIABLES_SHEET}'"))
        })?
        .map_err(CaseGenError::from)?;

    let mut rows_by_name: BTreeMap<String, Vec<Vec<Scalar>>> = BTreeMap::new();

    for (row_idx, row) in range.rows().enumerate().skip(1) {
        let name = cell_to_string(row.first());
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let cells = trim_trailing_empty(row.get(1..).unwrap_or_default());
        let values = cells
            .iter()
            .map(|cell| {
                cell_to_scalar(cell).ok_or_else(|| {
                    CaseGenError::TypeMismatch(format!(
                        "variable '{name}' on sheet row {} contains '{}', expected a number",
                        row_idx + 1,
                        cell_to_string(Some(cell))
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if values.is_empty() {
            return Err(CaseGenError::InvalidWorkbook(format!(
                "variable '{name}' on sheet row {} has no value",
                row_idx + 1
            )));
        }

        rows_by_name.entry(name.to_string()).or_default().push(values);
    }

    rows_by_name
        .into_iter()
        .map(|(name, rows)| {
            let value = rows_to_value(&name, rows)?;
            Ok((name, value))
        })
        .collect::<Result<BTreeMap<_, _>>>()
        .map(VariableSource::Named)
}

fn rows_to_value(name: &str, mut rows: Vec<Vec<Scalar>>) -> Result<Value> {
    if rows.len() > 1 {
        let width = rows[0].len();
        if rows.iter().any(|row| row.len() != width) {
            return Err(CaseGenError::TypeMismatch(format!(
                "variable '{name}' has rows of different lengths"
            )));
        }
        return Ok(Value::Matrix(rows));
    }

    let mut values = rows.pop().unwrap_or_default();
    if values.len() == 1 {
        Ok(Value::Scalar(values.remove(0)))
    } else {
        Ok(Value::Vector(values))
    }
}

fn trim_trailing_empty(cells: &[DataType]) -> &[DataType] {
    let end = cells
        .iter()
        .rposition(|cell| !matches!(cell, DataType::Empty))
        .map(|index| index + 1)
        .unwrap_or(0);
    &cells[..end]
}

fn cell_to_scalar(cell: &DataType) -> Option<Scalar> {
    match cell {
        DataType::Int(value) => Some(Scalar::Integer(*value)),
        DataType::Float(value) => Some(float_cell_to_scalar(*value)),
        DataType::String(value) => parse_scalar(value.trim()),
        _ => None,
    }
}

/// Workbooks store every number as a float; whole numbers that fit an `i64`
/// are read back as integers so integer solver fields stay integral.
fn float_cell_to_scalar(value: f64) -> Scalar {
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Scalar::Integer(value as i64)
    } else {
        Scalar::Real(value)
    }
}

fn parse_scalar(text: &str) -> Option<Scalar> {
    text.parse::<i64>()
        .map(Scalar::Integer)
        .or_else(|_| text.parse::<f64>().map(Scalar::Real))
        .ok()
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

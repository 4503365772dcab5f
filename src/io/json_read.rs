use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value as Json};

use crate::error::{CaseGenError, Result};
use crate::model::{Scalar, Value, VariableSource};

/// Reads a JSON variable document from disk.
pub fn read_variables(path: &Path) -> Result<VariableSource> {
    let source = fs::read_to_string(path)?;
    let document: Json = serde_json::from_str(&source)?;
    parse_variables(&document)
}

/// Maps a JSON document onto a [`VariableSource`].
///
/// `null` is an absent source, an array of numbers a positional source and an
/// object a named source whose values are numbers, arrays of numbers or
/// arrays of equally long number arrays.
pub fn parse_variables(document: &Json) -> Result<VariableSource> {
    match document {
        Json::Null => Ok(VariableSource::Absent),
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                as_scalar(item).ok_or_else(|| {
                    CaseGenError::TypeMismatch(format!(
                        "positional variable {} is {}, expected a number",
                        index + 1,
                        describe(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(VariableSource::Positional),
        Json::Object(object) => parse_named(object).map(VariableSource::Named),
        other => Err(CaseGenError::TypeMismatch(format!(
            "variable source is {}, expected an array or an object",
            describe(other)
        ))),
    }
}

fn parse_named(object: &Map<String, Json>) -> Result<std::collections::BTreeMap<String, Value>> {
    object
        .iter()
        .map(|(key, value)| Ok((key.clone(), parse_value(key, value)?)))
        .collect()
}

fn parse_value(key: &str, value: &Json) -> Result<Value> {
    if let Some(scalar) = as_scalar(value) {
        return Ok(Value::Scalar(scalar));
    }

    let Json::Array(items) = value else {
        return Err(mismatch(key, value));
    };

    if items.iter().any(Json::is_array) {
        let rows = items
            .iter()
            .map(|row| match row {
                Json::Array(cells) => cells
                    .iter()
                    .map(|cell| as_scalar(cell).ok_or_else(|| mismatch(key, cell)))
                    .collect::<Result<Vec<_>>>(),
                other => Err(mismatch(key, other)),
            })
            .collect::<Result<Vec<_>>>()?;

        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(CaseGenError::TypeMismatch(format!(
                "variable '{key}' has rows of different lengths"
            )));
        }
        return Ok(Value::Matrix(rows));
    }

    items
        .iter()
        .map(|item| as_scalar(item).ok_or_else(|| mismatch(key, item)))
        .collect::<Result<Vec<_>>>()
        .map(Value::Vector)
}

fn as_scalar(value: &Json) -> Option<Scalar> {
    match value {
        Json::Number(number) => number_to_scalar(number),
        _ => None,
    }
}

fn number_to_scalar(number: &Number) -> Option<Scalar> {
    match number.as_i64() {
        Some(integer) => Some(Scalar::Integer(integer)),
        None => number.as_f64().map(Scalar::Real),
    }
}

fn mismatch(key: &str, value: &Json) -> CaseGenError {
    CaseGenError::TypeMismatch(format!(
        "variable '{key}' contains {}, expected numbers",
        describe(value)
    ))
}

fn describe(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

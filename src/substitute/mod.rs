//! Replacement of `?token?` placeholders inside single template lines.
//!
//! A token is the text between two marker characters. Lines are scanned from
//! the left: the first pair of markers is resolved against the
//! [`VariableSource`], spliced into the line, and the scan repeats until no
//! marker remains.

use crate::error::{CaseGenError, Result};
use crate::model::{Scalar, Value, VariableSource};

/// Character opening and closing every substitution token.
pub const MARKER: char = '?';

/// Returns `true` when the line contains at least one marker character.
pub fn contains_marker(line: &str) -> bool {
    line.contains(MARKER)
}

/// Where a line came from, carried into error messages.
#[derive(Debug, Clone, Copy)]
struct Location<'a> {
    file: &'a str,
    line: usize,
}

/// Substitutes every token in `line` using `variables`.
///
/// `file_name` and `line_number` only feed error messages. Lines without a
/// marker are returned unchanged, as is any line when the source is
/// [`VariableSource::Absent`] (provided its markers are balanced).
pub fn substitute_line(
    line: &str,
    variables: &VariableSource,
    file_name: &str,
    line_number: usize,
) -> Result<String> {
    let location = Location {
        file: file_name,
        line: line_number,
    };
    let mut text = line.to_string();

    loop {
        let positions: Vec<usize> = text.match_indices(MARKER).map(|(index, _)| index).collect();
        if positions.is_empty() {
            break;
        }
        if positions.len() % 2 != 0 {
            return Err(CaseGenError::Format {
                file: location.file.to_string(),
                line: location.line,
            });
        }

        let start = positions[0];
        let end = positions[1] + MARKER.len_utf8();
        let name = &text[start + MARKER.len_utf8()..positions[1]];

        let replacement = match variables {
            VariableSource::Absent => return Ok(text),
            VariableSource::Positional(values) => resolve_positional(name, values, location)?,
            VariableSource::Named(values) => {
                let value = values.get(name).ok_or_else(|| CaseGenError::KeyLookup {
                    key: name.to_string(),
                    file: location.file.to_string(),
                    line: location.line,
                })?;
                format_value(value)
            }
        };

        // The token at the first marker is the first occurrence of its text.
        text.replace_range(start..end, &replacement);
    }

    Ok(text)
}

fn resolve_positional(name: &str, values: &[Scalar], location: Location<'_>) -> Result<String> {
    let index: i64 = name
        .trim()
        .parse()
        .map_err(|_| CaseGenError::InvalidIndex {
            token: name.to_string(),
            file: location.file.to_string(),
            line: location.line,
        })?;

    let element = usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|offset| values.get(offset))
        .ok_or_else(|| CaseGenError::IndexRange {
            index,
            len: values.len(),
            file: location.file.to_string(),
            line: location.line,
        })?;

    Ok(element.to_string())
}

/// Renders a value the way it is written into a case file.
///
/// Scalars use their decimal form. Vectors become their elements separated by
/// single spaces on one line. Matrices write one such line per row, joined by
/// `\n` with nothing after the last row.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => scalar.to_string(),
        Value::Vector(items) => format_row(items),
        Value::Matrix(rows) => rows
            .iter()
            .map(|row| format_row(row))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn format_row(items: &[Scalar]) -> String {
    items
        .iter()
        .map(Scalar::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

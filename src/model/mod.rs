//! Design variable values and the sources they are looked up in.

use std::collections::BTreeMap;
use std::fmt;

/// Numeric leaf of every design variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Whole number, written without a decimal point.
    Integer(i64),
    /// Floating point number.
    Real(f64),
}

/// Magnitudes at or above this threshold are written in scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e16;
/// Non-zero magnitudes below this threshold are written in scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-4;

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Real(value) => f.write_str(&format_real(*value)),
        }
    }
}

/// Formats a real number using the shortest representation that round-trips,
/// always keeping a decimal point or an exponent so the value reads as real.
fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || (magnitude != 0.0 && magnitude < SCIENTIFIC_LOWER) {
        return format_scientific(value);
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// `1.5e-5` becomes `1.5e-05`, `1e20` becomes `1e+20`.
fn format_scientific(value: f64) -> String {
    let raw = format!("{value:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// A single design variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Single number.
    Scalar(Scalar),
    /// One-dimensional sequence of numbers.
    Vector(Vec<Scalar>),
    /// Row-major two-dimensional sequence of numbers. Rows share one length.
    Matrix(Vec<Vec<Scalar>>),
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

/// Where the replacement for a `?token?` comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VariableSource {
    /// Nothing to substitute; templates pass through untouched.
    #[default]
    Absent,
    /// Design variable array addressed by 1-based index, e.g. `?3?`.
    Positional(Vec<Scalar>),
    /// Named design variables addressed by key, e.g. `?draft?`.
    Named(BTreeMap<String, Value>),
}

impl VariableSource {
    /// Builds a named source from `(key, value)` pairs.
    pub fn named<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        VariableSource::Named(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Number of variables held by the source.
    pub fn len(&self) -> usize {
        match self {
            VariableSource::Absent => 0,
            VariableSource::Positional(values) => values.len(),
            VariableSource::Named(values) => values.len(),
        }
    }

    /// `true` when the source holds no variables, including [`VariableSource::Absent`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

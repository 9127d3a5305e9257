//! # Numeric Values
//!
//! Tagged numeric representation used by every operation. A [`NumericValue`]
//! is one of four representations, and [`NumericKind`] orders them by
//! promotion precedence:
//!
//! ```text
//! Int32 < Int64 < Float32 < Float64
//! ```
//!
//! When two operands meet, the result is computed in the higher of the two
//! kinds ([`promote`]). Division has its own, stricter rules; see
//! [`crate::operations::divide`].
//!
//! ## JSON Shape
//!
//! Values serialize as bare JSON numbers and keep their integer-vs-fractional
//! shape: integers stay integers (`8`), floats always carry a fraction
//! (`8.75`, `2.0`). Parsing a JSON integer yields `Int32` when it fits,
//! `Int64` otherwise.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::numeric::{promote, NumericKind, NumericValue};
//!
//! let a = NumericValue::from(3);
//! let b = NumericValue::from(2.5);
//! assert_eq!(promote(a, b), NumericKind::Float64);
//!
//! let parsed: NumericValue = "7i64".parse().unwrap();
//! assert_eq!(parsed, NumericValue::Int64(7));
//! assert_eq!(serde_json::to_string(&parsed).unwrap(), "7");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Representation Kinds
// ============================================================================

/// The representation of a [`NumericValue`].
///
/// Variant order is promotion precedence, so `Ord` picks the winning kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE 754 float
    Float32,
    /// 64-bit IEEE 754 float
    Float64,
}

impl NumericKind {
    /// All kinds from lowest to highest precedence
    pub const ALL: [NumericKind; 4] = [
        NumericKind::Int32,
        NumericKind::Int64,
        NumericKind::Float32,
        NumericKind::Float64,
    ];

    /// The kind both operands are computed in.
    pub fn promote(self, other: NumericKind) -> NumericKind {
        self.max(other)
    }

    /// Whether this is one of the integer kinds
    pub fn is_integer(self) -> bool {
        matches!(self, NumericKind::Int32 | NumericKind::Int64)
    }

    /// Short lowercase name (`int32`, `int64`, `float32`, `float64`)
    pub fn name(self) -> &'static str {
        match self {
            NumericKind::Int32 => "int32",
            NumericKind::Int64 => "int64",
            NumericKind::Float32 => "float32",
            NumericKind::Float64 => "float64",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Numeric Value
// ============================================================================

/// An immutable number in one of four representations.
///
/// Equality is representation-sensitive: `Int32(2) != Int64(2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

/// Result kind for two operands under the standard precedence order.
pub fn promote(a: NumericValue, b: NumericValue) -> NumericKind {
    a.kind().promote(b.kind())
}

impl NumericValue {
    /// The representation of this value
    pub fn kind(&self) -> NumericKind {
        match self {
            NumericValue::Int32(_) => NumericKind::Int32,
            NumericValue::Int64(_) => NumericKind::Int64,
            NumericValue::Float32(_) => NumericKind::Float32,
            NumericValue::Float64(_) => NumericKind::Float64,
        }
    }

    /// Whether the value is held in an integer representation
    pub fn is_integer(&self) -> bool {
        self.kind().is_integer()
    }

    /// Numeric equality with zero. `0`, `0.0` and `-0.0` all count.
    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }

    /// Value as `i32`. Wider integers truncate, floats saturate.
    pub fn as_i32(&self) -> i32 {
        match *self {
            NumericValue::Int32(v) => v,
            NumericValue::Int64(v) => v as i32,
            NumericValue::Float32(v) => v as i32,
            NumericValue::Float64(v) => v as i32,
        }
    }

    /// Value as `i64`. Floats saturate.
    pub fn as_i64(&self) -> i64 {
        match *self {
            NumericValue::Int32(v) => i64::from(v),
            NumericValue::Int64(v) => v,
            NumericValue::Float32(v) => v as i64,
            NumericValue::Float64(v) => v as i64,
        }
    }

    /// Value as `f32`, rounding to nearest.
    pub fn as_f32(&self) -> f32 {
        match *self {
            NumericValue::Int32(v) => v as f32,
            NumericValue::Int64(v) => v as f32,
            NumericValue::Float32(v) => v,
            NumericValue::Float64(v) => v as f32,
        }
    }

    /// Value as `f64`. Exact for every kind except large `Int64` magnitudes.
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericValue::Int32(v) => f64::from(v),
            NumericValue::Int64(v) => v as f64,
            NumericValue::Float32(v) => f64::from(v),
            NumericValue::Float64(v) => v,
        }
    }

    /// Convert into the given representation.
    pub fn cast(&self, kind: NumericKind) -> NumericValue {
        match kind {
            NumericKind::Int32 => NumericValue::Int32(self.as_i32()),
            NumericKind::Int64 => NumericValue::Int64(self.as_i64()),
            NumericKind::Float32 => NumericValue::Float32(self.as_f32()),
            NumericKind::Float64 => NumericValue::Float64(self.as_f64()),
        }
    }
}

impl From<i32> for NumericValue {
    fn from(v: i32) -> Self {
        NumericValue::Int32(v)
    }
}

impl From<i64> for NumericValue {
    fn from(v: i64) -> Self {
        NumericValue::Int64(v)
    }
}

impl From<f32> for NumericValue {
    fn from(v: f32) -> Self {
        NumericValue::Float32(v)
    }
}

impl From<f64> for NumericValue {
    fn from(v: f64) -> Self {
        NumericValue::Float64(v)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting keeps the trailing ".0" on whole floats.
        match self {
            NumericValue::Int32(v) => write!(f, "{}", v),
            NumericValue::Int64(v) => write!(f, "{}", v),
            NumericValue::Float32(v) => write!(f, "{:?}", v),
            NumericValue::Float64(v) => write!(f, "{:?}", v),
        }
    }
}

/// Parses integer and decimal literals, with optional `i32`/`i64`/`f32`/`f64` suffix.
///
/// Unsuffixed integers become `Int32` when they fit and `Int64` otherwise;
/// unsuffixed decimals become `Float64`.
impl FromStr for NumericValue {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let text = s.trim();
        let parsed = if let Some(digits) = text.strip_suffix("i32") {
            digits.parse::<i32>().ok().map(NumericValue::Int32)
        } else if let Some(digits) = text.strip_suffix("i64") {
            digits.parse::<i64>().ok().map(NumericValue::Int64)
        } else if let Some(digits) = text.strip_suffix("f32") {
            digits.parse::<f32>().ok().map(NumericValue::Float32)
        } else if let Some(digits) = text.strip_suffix("f64") {
            digits.parse::<f64>().ok().map(NumericValue::Float64)
        } else if let Ok(v) = text.parse::<i64>() {
            Some(i32::try_from(v).map_or(NumericValue::Int64(v), NumericValue::Int32))
        } else {
            text.parse::<f64>().ok().map(NumericValue::Float64)
        };

        match parsed {
            Some(value) if value.as_f64().is_finite() => Ok(value),
            Some(_) => Err(CalcError::invalid_input("value", text, "Value must be a finite number")),
            None => Err(CalcError::invalid_input("value", text, "Not a numeric literal")),
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Serialize for NumericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            NumericValue::Int32(v) => serializer.serialize_i32(v),
            NumericValue::Int64(v) => serializer.serialize_i64(v),
            NumericValue::Float32(v) if !v.is_finite() => serializer.serialize_str(non_finite_name(f64::from(v))),
            NumericValue::Float64(v) if !v.is_finite() => serializer.serialize_str(non_finite_name(v)),
            NumericValue::Float32(v) => serializer.serialize_f32(v),
            NumericValue::Float64(v) => serializer.serialize_f64(v),
        }
    }
}

/// JSON has no literal for infinities or NaN; they travel as these strings.
fn non_finite_name(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

struct NumericValueVisitor;

impl<'de> Visitor<'de> for NumericValueVisitor {
    type Value = NumericValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, \"Infinity\", \"-Infinity\" or \"NaN\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NumericValue, E> {
        Ok(i32::try_from(v).map_or(NumericValue::Int64(v), NumericValue::Int32))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NumericValue, E> {
        if let Ok(small) = i32::try_from(v) {
            Ok(NumericValue::Int32(small))
        } else if let Ok(wide) = i64::try_from(v) {
            Ok(NumericValue::Int64(wide))
        } else {
            Ok(NumericValue::Float64(v as f64))
        }
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<NumericValue, E> {
        Ok(NumericValue::Float32(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<NumericValue, E> {
        Ok(NumericValue::Float64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NumericValue, E> {
        match v {
            "Infinity" => Ok(NumericValue::Float64(f64::INFINITY)),
            "-Infinity" => Ok(NumericValue::Float64(f64::NEG_INFINITY)),
            "NaN" => Ok(NumericValue::Float64(f64::NAN)),
            _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for NumericValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericValueVisitor)
    }
}

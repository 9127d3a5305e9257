//! # Operations
//!
//! Arithmetic strategies and the tags that select them.
//!
//! - [`OperationTag`] - closed set of selectors (`ADD`, `SUBTRACT`, `MULTIPLY`, `DIVIDE`)
//! - [`Operation`] - the strategy seam the registry stores
//! - [`BuiltinOperation`] - the four standard strategies as one sum type
//! - [`add`], [`subtract`], [`multiply`], [`divide`] - the arithmetic itself
//!
//! ## Example
//!
//! ```rust
//! use calc_core::operations::{BuiltinOperation, Operation, OperationTag};
//! use calc_core::NumericValue;
//!
//! let divide = BuiltinOperation::for_tag(OperationTag::Divide);
//! let result = divide.execute(NumericValue::from(6), NumericValue::from(3)).unwrap();
//! assert_eq!(result, NumericValue::Int32(2));
//! ```

pub mod builtin;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::NumericValue;

pub use builtin::{add, divide, multiply, subtract, BuiltinOperation};

/// Selector for an arithmetic operation.
///
/// Serialized as the upper-case name (`"ADD"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationTag {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl OperationTag {
    /// All tags in declaration order
    pub const ALL: [OperationTag; 4] = [
        OperationTag::Add,
        OperationTag::Subtract,
        OperationTag::Multiply,
        OperationTag::Divide,
    ];

    /// Upper-case name, as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            OperationTag::Add => "ADD",
            OperationTag::Subtract => "SUBTRACT",
            OperationTag::Multiply => "MULTIPLY",
            OperationTag::Divide => "DIVIDE",
        }
    }

    /// Arithmetic symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            OperationTag::Add => "+",
            OperationTag::Subtract => "-",
            OperationTag::Multiply => "*",
            OperationTag::Divide => "/",
        }
    }
}

impl fmt::Display for OperationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the tag name in any case, or its symbol.
impl FromStr for OperationTag {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let text = s.trim();
        OperationTag::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(text) || tag.symbol() == text)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "operation",
                    text,
                    "Supported operations are: ADD, SUBTRACT, MULTIPLY, DIVIDE",
                )
            })
    }
}

/// An arithmetic strategy over two numeric values.
///
/// Implementations must be pure: the same operands always give the same result.
pub trait Operation: Send + Sync + fmt::Debug {
    /// The tag this strategy is registered under.
    fn tag(&self) -> OperationTag;

    /// Apply the operation to `a` and `b`, in that order.
    fn execute(&self, a: NumericValue, b: NumericValue) -> CalcResult<NumericValue>;
}

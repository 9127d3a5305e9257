//! # Chain Accumulator
//!
//! Sequential evaluation over a running value:
//!
//! ```text
//! start(initial) ──► apply(tag, operand) ──► apply(...) ──► result()
//!                     current = current <tag> operand
//! ```
//!
//! Steps run strictly left to right; every result is the left operand of the
//! next step. A failing step leaves the running value and the step log exactly
//! as they were, and the error goes back to the caller.
//!
//! A chain borrows its [`Calculator`] and owns its running value, so one
//! accumulator serves exactly one chain at a time.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculator::Calculator;
//! use calc_core::operations::OperationTag;
//! use calc_core::NumericValue;
//!
//! let calculator = Calculator::standard();
//! let mut chain = calculator.chain();
//! chain
//!     .start(NumericValue::from(10))
//!     .apply(OperationTag::Add, NumericValue::from(5))?
//!     .apply(OperationTag::Multiply, NumericValue::from(2))?;
//! assert_eq!(chain.result()?, NumericValue::Int32(30));
//! # Ok::<(), calc_core::CalcError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;
use crate::errors::{CalcError, CalcResult};
use crate::numeric::NumericValue;
use crate::operations::OperationTag;

/// One `(operation, operand)` pair of a chain.
///
/// Serialized as `{"operation": "ADD", "value": 5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainStep {
    /// Operation applied to the running value
    pub operation: OperationTag,
    /// Right-hand operand
    pub value: NumericValue,
}

impl ChainStep {
    pub fn new(operation: OperationTag, value: impl Into<NumericValue>) -> Self {
        ChainStep {
            operation,
            value: value.into(),
        }
    }
}

impl fmt::Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation, self.value)
    }
}

/// Parses `OP:VALUE`, e.g. `add:5`, `DIVIDE:2.5`, `*:3i64`.
impl FromStr for ChainStep {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let (operation, value) = s
            .split_once(':')
            .ok_or_else(|| CalcError::invalid_input("step", s, "Expected OP:VALUE, e.g. add:5"))?;
        Ok(ChainStep {
            operation: operation.parse()?,
            value: value.parse()?,
        })
    }
}

/// Running-value state machine over a [`Calculator`].
#[derive(Debug, Clone)]
pub struct ChainAccumulator<'a> {
    calculator: &'a Calculator,
    current: Option<NumericValue>,
    history: Vec<ChainStep>,
}

impl<'a> ChainAccumulator<'a> {
    /// Create an unstarted chain. Call [`start`](Self::start) before anything else.
    pub fn new(calculator: &'a Calculator) -> Self {
        ChainAccumulator {
            calculator,
            current: None,
            history: Vec::new(),
        }
    }

    /// Set the running value to `initial` and clear the step log.
    ///
    /// Calling it again restarts the chain.
    pub fn start(&mut self, initial: NumericValue) -> &mut Self {
        self.current = Some(initial);
        self.history.clear();
        self
    }

    /// Replace the running value with `current <tag> operand`.
    ///
    /// # Errors
    ///
    /// * [`CalcError::ChainNotStarted`] - `start` has not been called
    /// * any error from the calculation; the chain is left unchanged
    pub fn apply(&mut self, tag: OperationTag, operand: NumericValue) -> CalcResult<&mut Self> {
        let current = self.current.ok_or(CalcError::ChainNotStarted)?;
        let next = self.calculator.calculate(tag, current, operand)?;
        self.current = Some(next);
        self.history.push(ChainStep::new(tag, operand));
        Ok(self)
    }

    /// Current running value.
    ///
    /// # Errors
    ///
    /// [`CalcError::ChainNotStarted`] if `start` has not been called.
    pub fn result(&self) -> CalcResult<NumericValue> {
        self.current.ok_or(CalcError::ChainNotStarted)
    }

    /// Whether `start` has been called
    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// Steps applied successfully since the last `start`, in order
    pub fn history(&self) -> &[ChainStep] {
        &self.history
    }
}

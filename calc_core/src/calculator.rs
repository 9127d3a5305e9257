//! # Calculator
//!
//! Resolves an [`OperationTag`] through the [`OperationRegistry`] and runs the
//! matching strategy. Errors from the strategy pass through unchanged.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculator::Calculator;
//! use calc_core::operations::OperationTag;
//! use calc_core::NumericValue;
//!
//! let calculator = Calculator::standard();
//! let sum = calculator
//!     .calculate(OperationTag::Add, NumericValue::from(5), NumericValue::from(3))
//!     .unwrap();
//! assert_eq!(sum, NumericValue::Int32(8));
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::chain::{ChainAccumulator, ChainStep};
use crate::errors::{CalcError, CalcResult};
use crate::numeric::NumericValue;
use crate::operations::{Operation, OperationTag};
use crate::registry::OperationRegistry;

static SHARED: Lazy<Calculator> = Lazy::new(Calculator::standard);

/// Process-wide calculator holding the built-in operations.
///
/// Read-only: callers that need a different operation table build their own
/// [`Calculator`].
pub fn shared() -> &'static Calculator {
    &SHARED
}

/// Single-step calculation over a registry of operations.
#[derive(Debug, Clone)]
pub struct Calculator {
    registry: OperationRegistry,
}

impl Calculator {
    /// Calculator with the four built-in operations.
    pub fn standard() -> Self {
        Self::with_registry(OperationRegistry::standard())
    }

    /// Calculator over a caller-assembled registry.
    pub fn with_registry(registry: OperationRegistry) -> Self {
        Calculator { registry }
    }

    /// The registry this calculator dispatches through
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Replace the operation registered for `operation.tag()`.
    ///
    /// Administrative: requires exclusive access to the calculator.
    pub fn register(&mut self, operation: Arc<dyn Operation>) -> Option<Arc<dyn Operation>> {
        self.registry.register(operation)
    }

    /// Whether `tag` can be calculated
    pub fn supports(&self, tag: OperationTag) -> bool {
        self.registry.supports(tag)
    }

    /// Apply the operation selected by `tag` to `a` and `b`.
    ///
    /// # Errors
    ///
    /// * [`CalcError::UnsupportedOperation`] - nothing is registered for `tag`
    /// * any error the operation itself returns, e.g. [`CalcError::DivisionByZero`]
    pub fn calculate(&self, tag: OperationTag, a: NumericValue, b: NumericValue) -> CalcResult<NumericValue> {
        let operation = self
            .registry
            .lookup(tag)
            .ok_or_else(|| CalcError::unsupported_operation(tag))?;
        operation.execute(a, b)
    }

    /// Open an empty chain bound to this calculator.
    pub fn chain(&self) -> ChainAccumulator<'_> {
        ChainAccumulator::new(self)
    }

    /// Start a chain at `initial`, apply every step in order, and return the final value.
    ///
    /// Stops at the first failing step; the remaining steps are not attempted.
    pub fn evaluate_chain(&self, initial: NumericValue, steps: &[ChainStep]) -> CalcResult<NumericValue> {
        let mut chain = self.chain();
        chain.start(initial);
        for step in steps {
            chain.apply(step.operation, step.value)?;
        }
        chain.result()
    }
}

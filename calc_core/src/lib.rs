//! # calc_core - Flexible Calculator Engine
//!
//! `calc_core` evaluates arithmetic over typed numbers. Operands keep their
//! representation (`i32`, `i64`, `f32`, `f64`) and every operation picks its
//! result representation deterministically.
//!
//! ## Design Philosophy
//!
//! - **Typed numbers**: [`NumericValue`] is an explicit tagged value with a total promotion order
//! - **Pluggable operations**: strategies live in an [`OperationRegistry`] keyed by [`OperationTag`]
//! - **Sequential chains**: [`ChainAccumulator`] applies steps strictly left to right
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{Calculator, ChainStep, NumericValue, OperationTag};
//!
//! let calculator = Calculator::standard();
//!
//! let quotient = calculator
//!     .calculate(OperationTag::Divide, NumericValue::from(5), NumericValue::from(2))
//!     .unwrap();
//! assert_eq!(quotient, NumericValue::Float64(2.5));
//!
//! let steps = [
//!     ChainStep::new(OperationTag::Divide, 4),
//!     ChainStep::new(OperationTag::Add, 15),
//! ];
//! let total = calculator.evaluate_chain(NumericValue::from(100), &steps).unwrap();
//! assert_eq!(total, NumericValue::Int32(40));
//! ```
//!
//! ## Modules
//!
//! - [`numeric`] - Numeric values and the promotion order
//! - [`operations`] - Operation tags, the strategy trait and the built-in arithmetic
//! - [`registry`] - Tag-to-strategy lookup table
//! - [`calculator`] - Single calculations through the registry
//! - [`chain`] - Chained calculations over a running value
//! - [`service`] - JSON request/response layer
//! - [`errors`] - Structured error types

pub mod calculator;
pub mod chain;
pub mod errors;
pub mod numeric;
pub mod operations;
pub mod registry;
pub mod service;

// Re-export commonly used types at crate root for convenience
pub use calculator::Calculator;
pub use chain::{ChainAccumulator, ChainStep};
pub use errors::{CalcError, CalcResult};
pub use numeric::{NumericKind, NumericValue};
pub use operations::{BuiltinOperation, Operation, OperationTag};
pub use registry::OperationRegistry;
pub use service::{CalculateRequest, CalculatorService, ChainRequest, Response};

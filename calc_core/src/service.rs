//! # Calculator Service
//!
//! Request/response layer in front of the engine. Requests and responses are
//! plain serde types, so any transport (CLI, HTTP, message queue) can carry
//! them as JSON:
//!
//! ```text
//! CalculateRequest {"operation": "ADD", "num1": 5, "num2": 3}
//! ChainRequest     {"initialValue": 10, "operations": [{"operation": "ADD", "value": 5}]}
//! Response         {"code": "200", "message": "Success", "data": 8}
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::service::CalculatorService;
//!
//! let service = CalculatorService::new();
//! let response = service.handle_json(r#"{"operation":"DIVIDE","num1":5,"num2":0}"#);
//! assert_eq!(response.code, "400");
//! assert_eq!(response.message, "Division by zero is not allowed");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::Calculator;
use crate::chain::ChainStep;
use crate::errors::{CalcError, CalcResult};
use crate::numeric::NumericValue;
use crate::operations::OperationTag;

// ============================================================================
// Requests
// ============================================================================

/// A single two-operand calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Operation to perform
    pub operation: OperationTag,
    /// Left operand
    pub num1: NumericValue,
    /// Right operand
    pub num2: NumericValue,
}

impl CalculateRequest {
    pub fn new(operation: OperationTag, num1: impl Into<NumericValue>, num2: impl Into<NumericValue>) -> Self {
        CalculateRequest {
            operation,
            num1: num1.into(),
            num2: num2.into(),
        }
    }
}

/// A chain of operations applied in order to an initial value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequest {
    /// Starting value of the chain
    pub initial_value: NumericValue,
    /// Steps applied left to right
    pub operations: Vec<ChainStep>,
}

impl ChainRequest {
    pub fn new(initial_value: impl Into<NumericValue>, operations: Vec<ChainStep>) -> Self {
        ChainRequest {
            initial_value: initial_value.into(),
            operations,
        }
    }

    /// Check the request before running it.
    ///
    /// # Errors
    ///
    /// [`CalcError::InvalidInput`] when `operations` is empty.
    pub fn validate(&self) -> CalcResult<()> {
        if self.operations.is_empty() {
            return Err(CalcError::invalid_input(
                "operations",
                "[]",
                "At least one operation is required",
            ));
        }
        Ok(())
    }
}

/// Either request shape, as accepted by [`CalculatorService::handle_json`].
///
/// A body with `initialValue` is a chain; anything else is a single calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Request {
    Chain(ChainRequest),
    Calculate(CalculateRequest),
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Standard response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Status code ("200", "400", "500")
    pub code: String,
    /// Human-readable outcome
    pub message: String,
    /// Payload: the numeric result on success, field errors on invalid input
    pub data: Option<serde_json::Value>,
}

impl Response {
    /// Successful response carrying `data`
    pub fn success(data: impl Serialize) -> Self {
        // Going through text keeps float32 payloads in their shortest form.
        let value = serde_json::to_string(&data).and_then(|text| serde_json::from_str::<serde_json::Value>(&text));
        match value {
            Ok(value) => Response {
                code: "200".to_string(),
                message: "Success".to_string(),
                data: Some(value),
            },
            Err(e) => Response::from_error(&CalcError::internal(e.to_string())),
        }
    }

    /// Failure response for `error`
    pub fn from_error(error: &CalcError) -> Self {
        let data = match error {
            CalcError::InvalidInput { field, reason, .. } => {
                let mut fields = serde_json::Map::new();
                fields.insert(field.clone(), serde_json::Value::String(reason.clone()));
                Some(serde_json::Value::Object(fields))
            }
            _ => None,
        };
        let message = match error {
            CalcError::InvalidInput { .. } => "Invalid parameters".to_string(),
            CalcError::Internal { .. } => "An unexpected error occurred. Please try again later.".to_string(),
            CalcError::SerializationError { reason } => reason.clone(),
            other => other.to_string(),
        };
        Response {
            code: error.status_code().to_string(),
            message,
            data,
        }
    }

    /// Wrap a calculation outcome
    pub fn from_result(result: CalcResult<NumericValue>) -> Self {
        match result {
            Ok(value) => Response::success(value),
            Err(e) => Response::from_error(&e),
        }
    }

    /// Whether this is a success response
    pub fn is_success(&self) -> bool {
        self.code == "200"
    }
}

// ============================================================================
// Service
// ============================================================================

/// Runs requests against an owned [`Calculator`].
#[derive(Debug, Clone)]
pub struct CalculatorService {
    calculator: Calculator,
}

impl CalculatorService {
    /// Service over the standard calculator
    pub fn new() -> Self {
        Self::with_calculator(Calculator::standard())
    }

    pub fn with_calculator(calculator: Calculator) -> Self {
        CalculatorService { calculator }
    }

    /// The calculator requests run against
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Run a single calculation.
    pub fn calculate(&self, request: &CalculateRequest) -> CalcResult<NumericValue> {
        debug!(
            operation = %request.operation,
            num1 = %request.num1,
            num2 = %request.num2,
            "processing calculation request"
        );
        self.calculator
            .calculate(request.operation, request.num1, request.num2)
            .inspect_err(|e| warn!(error = %e, "calculation failed"))
    }

    /// Validate and run a chain on a fresh accumulator.
    pub fn calculate_chain(&self, request: &ChainRequest) -> CalcResult<NumericValue> {
        request.validate()?;
        debug!(
            initial_value = %request.initial_value,
            steps = request.operations.len(),
            "processing chain request"
        );
        self.calculator
            .evaluate_chain(request.initial_value, &request.operations)
            .inspect_err(|e| warn!(error = %e, "chain calculation failed"))
    }

    /// Run either request shape.
    pub fn handle(&self, request: &Request) -> CalcResult<NumericValue> {
        match request {
            Request::Calculate(r) => self.calculate(r),
            Request::Chain(r) => self.calculate_chain(r),
        }
    }

    /// Parse a JSON request body, run it, and wrap the outcome.
    pub fn handle_json(&self, body: &str) -> Response {
        let result = parse_request(body).and_then(|request| self.handle(&request));
        Response::from_result(result)
    }
}

impl Default for CalculatorService {
    fn default() -> Self {
        Self::new()
    }
}

const CALCULATE_FIELDS: &[(&str, &str)] = &[
    ("operation", "Operation is required"),
    ("num1", "First operand is required"),
    ("num2", "Second operand is required"),
];

const CHAIN_FIELDS: &[(&str, &str)] = &[
    ("initialValue", "Initial value is required"),
    ("operations", "Operations list is required"),
];

const STEP_FIELDS: &[(&str, &str)] = &[
    ("operation", "Operation is required"),
    ("value", "Operation value is required"),
];

/// First field of `fields` that is absent or `null` in `object`, as an
/// [`CalcError::InvalidInput`] named `{prefix}{field}`.
fn require_fields(object: &serde_json::Value, prefix: &str, fields: &[(&str, &str)]) -> CalcResult<()> {
    for (name, reason) in fields {
        if object.get(*name).map_or(true, serde_json::Value::is_null) {
            return Err(CalcError::invalid_input(format!("{}{}", prefix, name), "null", *reason));
        }
    }
    Ok(())
}

/// Parse a JSON body into a [`Request`].
///
/// The shape is chosen by the presence of `initialValue` so that parse errors
/// name the actual problem instead of "no variant matched". Missing or `null`
/// required fields are reported as [`CalcError::InvalidInput`].
pub fn parse_request(body: &str) -> CalcResult<Request> {
    let raw: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CalcError::serialization(format!("Invalid request format: {}", e)))?;
    if !raw.is_object() {
        return Err(CalcError::serialization("Invalid request format: expected a JSON object"));
    }

    let request = if raw.get("initialValue").is_some() {
        require_fields(&raw, "", CHAIN_FIELDS)?;
        if let Some(steps) = raw.get("operations").and_then(serde_json::Value::as_array) {
            for (index, step) in steps.iter().enumerate() {
                require_fields(step, &format!("operations[{}].", index), STEP_FIELDS)?;
            }
        }
        serde_json::from_value(raw).map(Request::Chain)
    } else {
        require_fields(&raw, "", CALCULATE_FIELDS)?;
        serde_json::from_value(raw).map(Request::Calculate)
    };

    request.map_err(|e| {
        let reason = if e.to_string().contains("unknown variant") {
            "Invalid operation value. Supported operations are: ADD, SUBTRACT, MULTIPLY, DIVIDE".to_string()
        } else {
            format!("Invalid request format: {}", e)
        };
        CalcError::serialization(reason)
    })
}

//! End-to-end flows through the JSON service layer.

use calc_core::service::CalculatorService;
use calc_core::{CalcError, CalculateRequest, Calculator, ChainStep, NumericKind, NumericValue, OperationRegistry, OperationTag, Response};
use serde_json::json;

fn handle(body: serde_json::Value) -> Response {
    CalculatorService::new().handle_json(&body.to_string())
}

#[test]
fn basic_calculation() {
    let response = handle(json!({"operation": "ADD", "num1": 5, "num2": 3}));
    assert_eq!(response.code, "200");
    assert_eq!(response.message, "Success");
    assert_eq!(response.data, Some(json!(8)));
}

#[test]
fn decimal_calculation_keeps_fraction() {
    let response = handle(json!({"operation": "ADD", "num1": 5.5, "num2": 3.25}));
    assert_eq!(response.data, Some(json!(8.75)));
}

#[test]
fn exact_and_inexact_division_shapes() {
    let exact = handle(json!({"operation": "DIVIDE", "num1": 6, "num2": 3}));
    assert_eq!(serde_json::to_string(&exact.data).unwrap(), "2");

    let inexact = handle(json!({"operation": "DIVIDE", "num1": 5, "num2": 2}));
    assert_eq!(serde_json::to_string(&inexact.data).unwrap(), "2.5");

    let floats = handle(json!({"operation": "DIVIDE", "num1": 10.0, "num2": 5.0}));
    assert_eq!(serde_json::to_string(&floats.data).unwrap(), "2.0");
}

#[test]
fn wide_integers_stay_integral() {
    let response = handle(json!({"operation": "MULTIPLY", "num1": 3_000_000_000i64, "num2": 2}));
    assert_eq!(response.data, Some(json!(6_000_000_000i64)));
}

#[test]
fn division_by_zero() {
    for zero in [json!(0), json!(0.0), json!(-0.0)] {
        let response = handle(json!({"operation": "DIVIDE", "num1": 5, "num2": zero}));
        assert_eq!(response.code, "400");
        assert_eq!(response.message, "Division by zero is not allowed");
        assert_eq!(response.data, None);
    }
}

#[test]
fn invalid_operation() {
    let response = CalculatorService::new().handle_json(r#"{"operation":"INVALID","num1":5,"num2":3}"#);
    assert_eq!(response.code, "400");
    assert_eq!(
        response.message,
        "Invalid operation value. Supported operations are: ADD, SUBTRACT, MULTIPLY, DIVIDE"
    );
}

#[test]
fn missing_operand_reports_field() {
    let response = CalculatorService::new().handle_json(r#"{"operation":"ADD","num1":5,"num2":null}"#);
    assert_eq!(response.code, "400");
    assert_eq!(response.message, "Invalid parameters");
    assert_eq!(response.data, Some(json!({"num2": "Second operand is required"})));

    let response = CalculatorService::new().handle_json(r#"{"initialValue":5,"operations":[{"value":1}]}"#);
    assert_eq!(response.data, Some(json!({"operations[0].operation": "Operation is required"})));
}

#[test]
fn float_overflow_is_reported_as_infinity() {
    let response = CalculatorService::new().handle_json(r#"{"operation":"MULTIPLY","num1":1e308,"num2":10}"#);
    assert_eq!(response.code, "200");
    assert_eq!(response.data, Some(json!("Infinity")));

    let value: NumericValue = serde_json::from_value(response.data.unwrap()).unwrap();
    assert_eq!(value, NumericValue::Float64(f64::INFINITY));

    let response = handle(json!({"operation": "SUBTRACT", "num1": -1e308, "num2": 1e308}));
    assert_eq!(response.data, Some(json!("-Infinity")));
}

#[test]
fn float32_result_keeps_its_digits() {
    let service = CalculatorService::new();
    let result = service.calculate(&CalculateRequest::new(OperationTag::Add, 0.1f32, 0)).unwrap();
    let response = Response::from_result(Ok(result));
    assert_eq!(serde_json::to_string(&response.data).unwrap(), "0.1");
}

#[test]
fn chain_calculation() {
    let response = handle(json!({
        "initialValue": 10,
        "operations": [
            {"operation": "ADD", "value": 5},
            {"operation": "MULTIPLY", "value": 2},
            {"operation": "SUBTRACT", "value": 5}
        ]
    }));
    assert_eq!(response.code, "200");
    assert_eq!(response.data, Some(json!(25)));
}

#[test]
fn complex_chain_with_mixed_operations() {
    let response = handle(json!({
        "initialValue": 100,
        "operations": [
            {"operation": "DIVIDE", "value": 4},
            {"operation": "ADD", "value": 15},
            {"operation": "SUBTRACT", "value": 5},
            {"operation": "MULTIPLY", "value": 2}
        ]
    }));
    assert_eq!(response.data, Some(json!(70)));
}

#[test]
fn chain_failing_midway_reports_error() {
    let response = handle(json!({
        "initialValue": 10,
        "operations": [
            {"operation": "ADD", "value": 5},
            {"operation": "DIVIDE", "value": 0},
            {"operation": "MULTIPLY", "value": 2}
        ]
    }));
    assert_eq!(response.code, "400");
    assert_eq!(response.message, "Division by zero is not allowed");
}

#[test]
fn empty_chain_rejected_by_service_but_identity_in_engine() {
    let response = handle(json!({"initialValue": 5, "operations": []}));
    assert_eq!(response.code, "400");
    assert_eq!(response.message, "Invalid parameters");

    let calculator = Calculator::standard();
    let result = calculator.evaluate_chain(NumericValue::from(5), &[]).unwrap();
    assert_eq!(result, NumericValue::Int32(5));
}

#[test]
fn unsupported_operation_from_restricted_registry() {
    let mut registry = OperationRegistry::standard();
    registry.unregister(OperationTag::Divide);
    let service = CalculatorService::with_calculator(Calculator::with_registry(registry));

    let response = service.handle_json(r#"{"operation":"DIVIDE","num1":6,"num2":3}"#);
    assert_eq!(response.code, "400");
    assert_eq!(response.message, "Unsupported operation: DIVIDE");

    let err = service
        .calculator()
        .evaluate_chain(NumericValue::from(1), &[ChainStep::new(OperationTag::Divide, 1)])
        .unwrap_err();
    assert_eq!(err, CalcError::unsupported_operation(OperationTag::Divide));
}

#[test]
fn mixed_representation_chain_promotes() {
    let calculator = Calculator::standard();
    let steps = [
        ChainStep::new(OperationTag::Add, 1i64),
        ChainStep::new(OperationTag::Multiply, 1.5f32),
        ChainStep::new(OperationTag::Add, 0.25),
    ];
    let result = calculator.evaluate_chain(NumericValue::from(1), &steps).unwrap();
    assert_eq!(result.kind(), NumericKind::Float64);
    assert_eq!(result, NumericValue::Float64(3.25));
}

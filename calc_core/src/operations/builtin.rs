//! Built-in arithmetic strategies.
//!
//! Add, subtract and multiply compute in the promoted kind of their operands
//! (see [`crate::numeric::promote`]); integer kinds wrap on overflow, so these
//! three never fail. Division always computes an `f64` quotient first and
//! then picks the result kind:
//!
//! | Operands              | Quotient       | Result    |
//! |-----------------------|----------------|-----------|
//! | divisor is zero       | -              | error     |
//! | both `Int32`          | whole, finite  | `Int32`   |
//! | any `Float64`         | any            | `Float64` |
//! | any `Float32`         | any            | `Float32` |
//! | any `Int64`           | whole, finite  | `Int64`   |
//! | otherwise             | any            | `Float64` |

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{promote, NumericKind, NumericValue};

use super::{Operation, OperationTag};

/// The four standard strategies, one per [`OperationTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BuiltinOperation {
    /// Every built-in strategy, the fixed table the standard registry is built from
    pub const ALL: [BuiltinOperation; 4] = [
        BuiltinOperation::Add,
        BuiltinOperation::Subtract,
        BuiltinOperation::Multiply,
        BuiltinOperation::Divide,
    ];

    /// The built-in strategy for a tag
    pub fn for_tag(tag: OperationTag) -> Self {
        match tag {
            OperationTag::Add => BuiltinOperation::Add,
            OperationTag::Subtract => BuiltinOperation::Subtract,
            OperationTag::Multiply => BuiltinOperation::Multiply,
            OperationTag::Divide => BuiltinOperation::Divide,
        }
    }
}

impl Operation for BuiltinOperation {
    fn tag(&self) -> OperationTag {
        match self {
            BuiltinOperation::Add => OperationTag::Add,
            BuiltinOperation::Subtract => OperationTag::Subtract,
            BuiltinOperation::Multiply => OperationTag::Multiply,
            BuiltinOperation::Divide => OperationTag::Divide,
        }
    }

    fn execute(&self, a: NumericValue, b: NumericValue) -> CalcResult<NumericValue> {
        match self {
            BuiltinOperation::Add => Ok(add(a, b)),
            BuiltinOperation::Subtract => Ok(subtract(a, b)),
            BuiltinOperation::Multiply => Ok(multiply(a, b)),
            BuiltinOperation::Divide => divide(a, b),
        }
    }
}

/// Per-kind implementations of one binary operation.
struct KindOps {
    int32: fn(i32, i32) -> i32,
    int64: fn(i64, i64) -> i64,
    float32: fn(f32, f32) -> f32,
    float64: fn(f64, f64) -> f64,
}

fn promoted(a: NumericValue, b: NumericValue, ops: KindOps) -> NumericValue {
    match promote(a, b) {
        NumericKind::Float64 => NumericValue::Float64((ops.float64)(a.as_f64(), b.as_f64())),
        NumericKind::Float32 => NumericValue::Float32((ops.float32)(a.as_f32(), b.as_f32())),
        NumericKind::Int64 => NumericValue::Int64((ops.int64)(a.as_i64(), b.as_i64())),
        NumericKind::Int32 => NumericValue::Int32((ops.int32)(a.as_i32(), b.as_i32())),
    }
}

/// `a + b` in the promoted kind.
pub fn add(a: NumericValue, b: NumericValue) -> NumericValue {
    promoted(
        a,
        b,
        KindOps {
            int32: i32::wrapping_add,
            int64: i64::wrapping_add,
            float32: |x, y| x + y,
            float64: |x, y| x + y,
        },
    )
}

/// `a - b` in the promoted kind.
pub fn subtract(a: NumericValue, b: NumericValue) -> NumericValue {
    promoted(
        a,
        b,
        KindOps {
            int32: i32::wrapping_sub,
            int64: i64::wrapping_sub,
            float32: |x, y| x - y,
            float64: |x, y| x - y,
        },
    )
}

/// `a * b` in the promoted kind.
pub fn multiply(a: NumericValue, b: NumericValue) -> NumericValue {
    promoted(
        a,
        b,
        KindOps {
            int32: i32::wrapping_mul,
            int64: i64::wrapping_mul,
            float32: |x, y| x * y,
            float64: |x, y| x * y,
        },
    )
}

/// `a / b` following the division table in the module docs.
///
/// # Errors
///
/// [`CalcError::DivisionByZero`] when `b` is numerically zero, whatever its kind.
pub fn divide(a: NumericValue, b: NumericValue) -> CalcResult<NumericValue> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }

    let quotient = a.as_f64() / b.as_f64();
    let whole = quotient.is_finite() && quotient == quotient.floor();

    // Only an Int32 pair short-circuits to an exact integer result.
    if whole && matches!((a, b), (NumericValue::Int32(_), NumericValue::Int32(_))) {
        return Ok(NumericValue::Int32(quotient as i32));
    }

    let value = match promote(a, b) {
        NumericKind::Float64 => NumericValue::Float64(quotient),
        NumericKind::Float32 => NumericValue::Float32(quotient as f32),
        NumericKind::Int64 if whole => NumericValue::Int64(quotient as i64),
        NumericKind::Int64 | NumericKind::Int32 => NumericValue::Float64(quotient),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i32) -> NumericValue {
        NumericValue::Int32(v)
    }

    fn long(v: i64) -> NumericValue {
        NumericValue::Int64(v)
    }

    fn float(v: f32) -> NumericValue {
        NumericValue::Float32(v)
    }

    fn double(v: f64) -> NumericValue {
        NumericValue::Float64(v)
    }

    fn assert_close(value: NumericValue, expected: f64) {
        assert!(
            (value.as_f64() - expected).abs() < 1e-9,
            "expected {} but got {}",
            expected,
            value
        );
    }

    // ------------------------------------------------------------------------
    // Add / Subtract / Multiply
    // ------------------------------------------------------------------------

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(add(int(5), int(3)), int(8));
        assert_eq!(add(int(-5), int(-3)), int(-8));
        assert_eq!(subtract(int(5), int(8)), int(-3));
        assert_eq!(multiply(int(-4), int(6)), int(-24));
        assert_eq!(multiply(int(0), int(123)), int(0));
    }

    #[test]
    fn test_int64_arithmetic_is_exact() {
        assert_eq!(add(long(i64::MAX - 1), long(1)), long(i64::MAX));
        assert_eq!(subtract(long(10_000_000_000), long(1)), long(9_999_999_999));
        assert_eq!(multiply(long(3_000_000_000), long(3)), long(9_000_000_000));
    }

    #[test]
    fn test_promotion_rules() {
        assert_eq!(add(int(1), double(2.5)).kind(), NumericKind::Float64);
        assert_eq!(add(int(1), long(2)), long(3));
        assert_eq!(add(float(1.5), double(2.25)), double(3.75));
        assert_eq!(add(float(1.5), long(2)), float(3.5));
        assert_eq!(subtract(long(10), float(0.5)), float(9.5));
        assert_eq!(multiply(int(3), float(0.5)), float(1.5));
    }

    #[test]
    fn test_decimal_arithmetic() {
        assert_eq!(add(double(5.5), double(3.25)), double(8.75));
        assert_close(subtract(double(5.5), double(2.2)), 3.3);
        assert_eq!(multiply(double(2.5), double(4.0)), double(10.0));
    }

    #[test]
    fn test_integer_overflow_wraps() {
        assert_eq!(add(int(i32::MAX), int(1)), int(i32::MIN));
        assert_eq!(subtract(int(i32::MIN), int(1)), int(i32::MAX));
        assert_eq!(multiply(long(i64::MAX), long(2)), long(-2));
    }

    // ------------------------------------------------------------------------
    // Divide
    // ------------------------------------------------------------------------

    #[test]
    fn test_exact_int32_division_stays_int32() {
        assert_eq!(divide(int(6), int(3)).unwrap(), int(2));
        assert_eq!(divide(int(-6), int(-3)).unwrap(), int(2));
        assert_eq!(divide(int(-6), int(3)).unwrap(), int(-2));
        assert_eq!(divide(int(0), int(7)).unwrap(), int(0));
    }

    #[test]
    fn test_inexact_int32_division_is_float64() {
        assert_eq!(divide(int(5), int(2)).unwrap(), double(2.5));
        let third = divide(int(10), int(3)).unwrap();
        assert_eq!(third.kind(), NumericKind::Float64);
        assert_close(third, 3.333_333_333_3);
    }

    #[test]
    fn test_int32_min_by_minus_one_saturates() {
        assert_eq!(divide(int(i32::MIN), int(-1)).unwrap(), int(i32::MAX));
    }

    #[test]
    fn test_float64_division_is_not_collapsed() {
        assert_eq!(divide(double(10.0), double(2.0)).unwrap(), double(5.0));
        let third = divide(double(10.0), double(3.0)).unwrap();
        assert_eq!(third.kind(), NumericKind::Float64);
        assert_close(third, 3.333_333_333_3);
        assert_eq!(divide(int(6), double(3.0)).unwrap(), double(2.0));
    }

    #[test]
    fn test_float32_division_narrows() {
        assert_eq!(divide(float(5.0), int(2)).unwrap(), float(2.5));
        assert_eq!(divide(long(6), float(3.0)).unwrap(), float(2.0));
    }

    #[test]
    fn test_int64_division() {
        assert_eq!(divide(long(10), long(2)).unwrap(), long(5));
        assert_eq!(divide(long(10), int(4)).unwrap(), double(2.5));
        assert_eq!(divide(int(9), long(3)).unwrap(), long(3));
    }

    #[test]
    fn test_division_by_any_zero_fails() {
        let zeros = [int(0), long(0), float(0.0), float(-0.0), double(0.0), double(-0.0)];
        let dividends = [int(5), long(-5), float(1.5), double(0.0)];
        for zero in zeros {
            for dividend in dividends {
                assert_eq!(divide(dividend, zero), Err(CalcError::DivisionByZero));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Strategy dispatch
    // ------------------------------------------------------------------------

    #[test]
    fn test_builtin_tags_round_trip() {
        for tag in OperationTag::ALL {
            assert_eq!(BuiltinOperation::for_tag(tag).tag(), tag);
        }
        assert_eq!(BuiltinOperation::ALL.len(), OperationTag::ALL.len());
    }

    #[test]
    fn test_execute_dispatches() {
        assert_eq!(BuiltinOperation::Add.execute(int(2), int(3)).unwrap(), int(5));
        assert_eq!(BuiltinOperation::Subtract.execute(int(2), int(3)).unwrap(), int(-1));
        assert_eq!(BuiltinOperation::Multiply.execute(int(2), int(3)).unwrap(), int(6));
        assert_eq!(BuiltinOperation::Divide.execute(int(6), int(3)).unwrap(), int(2));
        assert_eq!(
            BuiltinOperation::Divide.execute(int(1), int(0)),
            Err(CalcError::DivisionByZero)
        );
    }
}

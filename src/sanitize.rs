//! Precision reduction of a single numeric column.
//!
//! Floats are rounded the way array libraries do it on binary doubles: scale
//! by a power of ten, round half to even, scale back. That means halfway
//! cases are decided on the binary value, e.g. `2.345` at two places becomes
//! `2.35` because `2.345 * 100` is `234.50000000000003`. Integers are rounded
//! exactly.

use log::{debug, error};

use crate::{data::Value, error::SanitizeError, frame::Table};

/// Largest magnitude below which an f64 can still carry a fractional part.
const F64_INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0; // 2^52

const MAX_I128_EXPONENT: u32 = 38;

/// Rounds `column_name` in `table` to `precision` decimal places and hands the
/// table back.
pub fn sanitize(
    mut table: Table,
    column_name: &str,
    precision: i32,
) -> Result<Table, SanitizeError> {
    sanitize_in_place(&mut table, column_name, precision)?;
    Ok(table)
}

/// Rounds `column_name` in place. Returns the number of non-null cells
/// rounded. The table is untouched on error.
pub fn sanitize_in_place(
    table: &mut Table,
    column_name: &str,
    precision: i32,
) -> Result<usize, SanitizeError> {
    let Some(column) = table.column_mut(column_name) else {
        let err = SanitizeError::ColumnNotFound {
            column: column_name.to_string(),
        };
        error!("{err}");
        return Err(err);
    };

    let dtype = column.dtype();
    if !dtype.is_numeric() {
        return Err(SanitizeError::NotNumericColumn {
            column: column_name.to_string(),
            actual: dtype,
        });
    }

    let mut rounded = 0usize;
    for cell in column.values.iter_mut().flatten() {
        *cell = round_value(cell, precision);
        rounded += 1;
    }
    debug!("Rounded {rounded} value(s) in '{column_name}' to precision {precision}");
    Ok(rounded)
}

/// Rounds a numeric cell; non-numeric values come back unchanged.
pub fn round_value(value: &Value, precision: i32) -> Value {
    match value {
        Value::Float(f) => Value::Float(round_float(*f, precision)),
        Value::Integer(i) => round_integer(*i, precision),
        other => other.clone(),
    }
}

/// Scales by `10^precision`, rounds half to even and scales back. Values the
/// scale can no longer change (non-finite, or already integral at f64
/// resolution) pass through untouched.
pub fn round_float(value: f64, precision: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if precision >= 0 {
        let factor = power_of_ten(precision.unsigned_abs());
        let scaled = value * factor;
        if !scaled.is_finite() || scaled.abs() >= F64_INTEGRAL_THRESHOLD {
            return value;
        }
        scaled.round_ties_even() / factor
    } else {
        let factor = power_of_ten(precision.unsigned_abs());
        if !factor.is_finite() {
            return 0.0f64.copysign(value);
        }
        (value / factor).round_ties_even() * factor
    }
}

/// Integers only change for negative precision, where they snap to the
/// nearest multiple of `10^-precision`, ties to the even multiple.
pub fn round_integer(value: i64, precision: i32) -> Value {
    if precision >= 0 {
        return Value::Integer(value);
    }
    let exponent = precision.unsigned_abs();
    // 10^38 is the largest power of ten an i128 holds; past it every i64 is
    // closer to zero than to the step.
    if exponent > MAX_I128_EXPONENT {
        return Value::Integer(0);
    }
    let step = 10i128.pow(exponent);
    let value = i128::from(value);
    let remainder = value.rem_euclid(step);
    let floor = value - remainder;
    let result = match remainder.cmp(&(step - remainder)) {
        std::cmp::Ordering::Less => floor,
        std::cmp::Ordering::Greater => floor + step,
        std::cmp::Ordering::Equal => {
            if (floor / step) % 2 == 0 {
                floor
            } else {
                floor + step
            }
        }
    };
    i64::try_from(result)
        .map(Value::Integer)
        .unwrap_or(Value::Float(result as f64))
}

fn power_of_ten(exponent: u32) -> f64 {
    // Powers up to 10^22 are exact in f64, so the multiply chain is too.
    if exponent <= 22 {
        10f64.powi(exponent as i32)
    } else {
        10f64.powf(f64::from(exponent))
    }
}

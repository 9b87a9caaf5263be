//! Conversion of source cells into the declared type of a target field.
//!
//! [`coerce`] always produces the canonical [`Value`] variant for the target
//! [`FieldType`]: integers as `Integer` (range-checked for the field width),
//! floats as `Float`, and so on. Optional wrappers never reach this layer; the
//! caller passes the underlying type and [`FieldValue`](crate::field::FieldValue)
//! re-wraps the result.

use chrono::NaiveTime;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::{
    data::{Value, parse_boolean, parse_guid, parse_naive_date, parse_naive_datetime, parse_naive_time},
    error::ConversionError,
    field::FieldType,
    locale::Locale,
};

// Bounds of the f64 values that truncate into i64 without saturating.
const I64_LOWER_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER_F64: f64 = 9_223_372_036_854_775_808.0;

pub fn coerce(raw: &Value, target: FieldType, locale: &Locale) -> Result<Value, ConversionError> {
    let converted = match target {
        FieldType::String => Ok(Value::String(render_string(raw, locale))),
        FieldType::Boolean => to_boolean(raw).map(Value::Boolean),
        FieldType::I16 | FieldType::I32 | FieldType::I64 | FieldType::U32 => {
            to_integer(raw, target, locale).map(Value::Integer)
        }
        FieldType::F32 | FieldType::F64 => to_float(raw, target, locale).map(Value::Float),
        FieldType::Decimal => to_decimal(raw, locale).map(Value::Decimal),
        FieldType::Date => to_date(raw),
        FieldType::DateTime => to_datetime(raw),
        FieldType::Time => to_time(raw),
        FieldType::Guid => to_guid(raw),
    };
    converted.map_err(|reason| ConversionError::new(raw.as_display(), target, reason))
}

fn unsupported(raw: &Value) -> String {
    format!("{} values are not convertible to this type", raw.column_type())
}

fn render_string(raw: &Value, locale: &Locale) -> String {
    match raw {
        Value::Float(_) | Value::Decimal(_) => locale.format_number(&raw.as_display()),
        other => other.as_display(),
    }
}

fn to_boolean(raw: &Value) -> Result<bool, String> {
    match raw {
        Value::Boolean(b) => Ok(*b),
        Value::Integer(i) => Ok(*i != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::Decimal(d) => Ok(!d.is_zero()),
        Value::String(s) => parse_boolean(s).map_err(|err| err.to_string()),
        other => Err(unsupported(other)),
    }
}

fn float_to_i64(value: f64) -> Result<i64, String> {
    if !value.is_finite() {
        return Err(format!("{value} is not a finite number"));
    }
    let rounded = value.round_ties_even();
    if !(I64_LOWER_F64..I64_UPPER_F64).contains(&rounded) {
        return Err("value is outside the range of i64".to_string());
    }
    Ok(rounded as i64)
}

fn to_integer(raw: &Value, target: FieldType, locale: &Locale) -> Result<i64, String> {
    let wide = match raw {
        Value::Integer(i) => *i,
        Value::Float(f) => float_to_i64(*f)?,
        Value::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64()
            .ok_or_else(|| "value is outside the range of i64".to_string())?,
        Value::Boolean(b) => i64::from(*b),
        Value::String(s) => locale.parse_integer(s)?,
        other => return Err(unsupported(other)),
    };
    let (min, max) = target.integer_bounds().unwrap_or((i64::MIN, i64::MAX));
    if wide < min || wide > max {
        return Err(format!("{wide} is outside the range of {target}"));
    }
    Ok(wide)
}

fn to_float(raw: &Value, target: FieldType, locale: &Locale) -> Result<f64, String> {
    let value = match raw {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        Value::Decimal(d) => d
            .to_f64()
            .ok_or_else(|| "decimal is outside the range of f64".to_string())?,
        Value::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => locale.parse_float(s)?,
        other => return Err(unsupported(other)),
    };
    if target == FieldType::F32 && value.is_finite() && value.abs() > f64::from(f32::MAX) {
        return Err(format!("{value} is outside the range of f32"));
    }
    Ok(value)
}

fn to_decimal(raw: &Value, locale: &Locale) -> Result<Decimal, String> {
    match raw {
        Value::Integer(i) => Ok(Decimal::from(*i)),
        Value::Float(f) => {
            Decimal::from_f64(*f).ok_or_else(|| format!("{f} cannot be represented as a decimal"))
        }
        Value::Decimal(d) => Ok(*d),
        Value::Boolean(b) => Ok(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::String(s) => locale.parse_decimal(s),
        other => Err(unsupported(other)),
    }
}

fn to_date(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::DateTime(dt) => Ok(Value::Date(dt.date())),
        Value::String(s) => {
            let trimmed = s.trim();
            parse_naive_date(trimmed)
                .or_else(|_| parse_naive_datetime(trimmed).map(|dt| dt.date()))
                .map(Value::Date)
                .map_err(|err| err.to_string())
        }
        other => Err(unsupported(other)),
    }
}

fn to_datetime(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
        Value::Date(d) => Ok(Value::DateTime(d.and_time(NaiveTime::MIN))),
        Value::String(s) => {
            let trimmed = s.trim();
            parse_naive_datetime(trimmed)
                .or_else(|_| parse_naive_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
                .map(Value::DateTime)
                .map_err(|err| err.to_string())
        }
        other => Err(unsupported(other)),
    }
}

fn to_time(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Time(t) => Ok(Value::Time(*t)),
        Value::DateTime(dt) => Ok(Value::Time(dt.time())),
        Value::String(s) => parse_naive_time(s.trim())
            .map(Value::Time)
            .map_err(|err| err.to_string()),
        other => Err(unsupported(other)),
    }
}

fn to_guid(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Guid(g) => Ok(Value::Guid(*g)),
        Value::String(s) => parse_guid(s)
            .map(Value::Guid)
            .map_err(|err| err.to_string()),
        other => Err(unsupported(other)),
    }
}

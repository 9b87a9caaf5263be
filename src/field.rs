//! Target-side field metadata.
//!
//! [`FieldDescriptor`] pairs a field name with its declared [`FieldType`] and an
//! explicit `optional` tag; [`FieldValue`] moves a concrete Rust field in and out
//! of the dynamic [`Value`] representation.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{data::Value, error::ConversionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Boolean,
    I16,
    I32,
    I64,
    U32,
    F32,
    F64,
    Decimal,
    Date,
    DateTime,
    Time,
    Guid,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "bool",
            FieldType::I16 => "i16",
            FieldType::I32 => "i32",
            FieldType::I64 => "i64",
            FieldType::U32 => "u32",
            FieldType::F32 => "f32",
            FieldType::F64 => "f64",
            FieldType::Decimal => "decimal",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Time => "time",
            FieldType::Guid => "guid",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FieldType::I16 | FieldType::I32 | FieldType::I64 | FieldType::U32
        )
    }

    /// Inclusive bounds of an integer field type.
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        match self {
            FieldType::I16 => Some((i64::from(i16::MIN), i64::from(i16::MAX))),
            FieldType::I32 => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
            FieldType::I64 => Some((i64::MIN, i64::MAX)),
            FieldType::U32 => Some((0, i64::from(u32::MAX))),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and declared type of one settable field on a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub optional: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, field_type: FieldType, optional: bool) -> Self {
        Self {
            name,
            field_type,
            optional,
        }
    }

    /// Describes a field of Rust type `T`.
    pub const fn of<T: FieldValue>(name: &'static str) -> Self {
        Self::new(name, T::FIELD_TYPE, T::OPTIONAL)
    }

    pub fn is_string(&self) -> bool {
        self.field_type == FieldType::String
    }
}

/// A Rust type that can live in a bindable record field.
///
/// `from_value` expects a value already coerced to [`Self::FIELD_TYPE`]; a null
/// written into a non-optional field resets it to [`FieldValue::zero`].
pub trait FieldValue: Sized {
    const FIELD_TYPE: FieldType;
    const OPTIONAL: bool = false;

    fn zero() -> Self;

    fn to_value(&self) -> Option<Value>;

    fn from_value(value: Option<Value>) -> Result<Self, ConversionError>;
}

fn mismatch(value: &Value, target: FieldType) -> ConversionError {
    ConversionError::new(
        value.as_display(),
        target,
        format!("expected a {target} value but found {}", value.column_type()),
    )
}

impl FieldValue for String {
    const FIELD_TYPE: FieldType = FieldType::String;

    fn zero() -> Self {
        String::new()
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }

    fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
        match value {
            None => Ok(Self::zero()),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(mismatch(&other, Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for bool {
    const FIELD_TYPE: FieldType = FieldType::Boolean;

    fn zero() -> Self {
        false
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Boolean(*self))
    }

    fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
        match value {
            None => Ok(Self::zero()),
            Some(Value::Boolean(b)) => Ok(b),
            Some(other) => Err(mismatch(&other, Self::FIELD_TYPE)),
        }
    }
}

macro_rules! impl_integer_field {
    ($($ty:ty => $field_type:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::$field_type;

                fn zero() -> Self {
                    0
                }

                fn to_value(&self) -> Option<Value> {
                    Some(Value::Integer(i64::from(*self)))
                }

                fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
                    match value {
                        None => Ok(Self::zero()),
                        Some(Value::Integer(i)) => <$ty>::try_from(i).map_err(|_| {
                            ConversionError::new(
                                i.to_string(),
                                Self::FIELD_TYPE,
                                "value is outside the range of the field type",
                            )
                        }),
                        Some(other) => Err(mismatch(&other, Self::FIELD_TYPE)),
                    }
                }
            }
        )*
    };
}

impl_integer_field!(i16 => I16, i32 => I32, i64 => I64, u32 => U32);

impl FieldValue for f64 {
    const FIELD_TYPE: FieldType = FieldType::F64;

    fn zero() -> Self {
        0.0
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(*self))
    }

    fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
        match value {
            None => Ok(Self::zero()),
            Some(Value::Float(f)) => Ok(f),
            Some(other) => Err(mismatch(&other, Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for f32 {
    const FIELD_TYPE: FieldType = FieldType::F32;

    fn zero() -> Self {
        0.0
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(f64::from(*self)))
    }

    fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
        match value {
            None => Ok(Self::zero()),
            Some(Value::Float(f)) => Ok(f as f32),
            Some(other) => Err(mismatch(&other, Self::FIELD_TYPE)),
        }
    }
}

macro_rules! impl_variant_field {
    ($($ty:ty => $field_type:ident, $variant:ident, $zero:expr);* $(;)?) => {
        $(
            impl FieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::$field_type;

                fn zero() -> Self {
                    $zero
                }

                fn to_value(&self) -> Option<Value> {
                    Some(Value::$variant(*self))
                }

                fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
                    match value {
                        None => Ok(Self::zero()),
                        Some(Value::$variant(inner)) => Ok(inner),
                        Some(other) => Err(mismatch(&other, Self::FIELD_TYPE)),
                    }
                }
            }
        )*
    };
}

impl_variant_field! {
    Decimal => Decimal, Decimal, Decimal::ZERO;
    NaiveDate => Date, Date, NaiveDate::default();
    NaiveDateTime => DateTime, DateTime, NaiveDateTime::default();
    NaiveTime => Time, Time, NaiveTime::default();
    Uuid => Guid, Guid, Uuid::nil();
}

impl<T: FieldValue> FieldValue for Option<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;
    const OPTIONAL: bool = true;

    fn zero() -> Self {
        None
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Option<Value>) -> Result<Self, ConversionError> {
        match value {
            None => Ok(None),
            Some(inner) => T::from_value(Some(inner)).map(Some),
        }
    }
}

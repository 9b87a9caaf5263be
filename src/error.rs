use thiserror::Error;

use crate::field::FieldType;

/// A raw cell value could not be converted to a field's declared type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert '{value}' to {target}: {reason}")]
pub struct ConversionError {
    pub value: String,
    pub target: FieldType,
    pub reason: String,
}

impl ConversionError {
    pub fn new(value: impl Into<String>, target: FieldType, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            target,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error("Field '{field}': {source}")]
    Conversion {
        field: String,
        #[source]
        source: ConversionError,
    },
    #[error("Unable to construct an instance of {type_name}")]
    Construction { type_name: &'static str },
    #[error("Field '{field}' is not declared on {type_name}")]
    UnknownField {
        field: String,
        type_name: &'static str,
    },
    #[error("Column '{0}' does not exist in the source")]
    MissingColumn(String),
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

impl BindError {
    pub fn conversion(field: impl Into<String>, source: ConversionError) -> Self {
        BindError::Conversion {
            field: field.into(),
            source,
        }
    }
}

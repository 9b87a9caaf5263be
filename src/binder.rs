//! Binding of records, tables, and readers onto [`Record`] types.
//!
//! Per record the binder starts from a working instance (a clone of the
//! caller's template, or a default instance), overwrites every declared field
//! whose column is present and non-null with the coerced cell value, and
//! finally normalizes null strings when enabled. Fields the source lacks or
//! holds null keep the working instance's value; source columns the record
//! type does not declare are never read.

use std::any::type_name;

use log::debug;

use crate::{
    coerce::coerce,
    data::Value,
    error::{BindError, ConversionError},
    field::{FieldDescriptor, FieldValue},
    options::BindOptions,
    record::{Record, clone_template, new_instance, normalize_null_strings},
    source::{CurrentRecord, DataReader, FieldLookup, SourceRecord},
    table::DataTable,
};

/// True when `field` names a source column (case-insensitively) whose value
/// in this record is non-null.
pub fn is_assignable<S: SourceRecord + ?Sized>(record: &S, field: &FieldDescriptor) -> bool {
    assignable_value(record, field).is_some()
}

fn assignable_value<'a, S: SourceRecord + ?Sized>(
    record: &'a S,
    field: &FieldDescriptor,
) -> Option<&'a Value> {
    let ordinal = record.ordinal(field.name)?;
    if record.is_null(ordinal) {
        return None;
    }
    record.value(ordinal)
}

#[derive(Debug, Clone, Default)]
pub struct Binder {
    options: BindOptions,
}

impl Binder {
    pub fn new(options: BindOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Binds one record. `template` is never modified; the result starts as a
    /// copy of it, or as a default instance when no template is given.
    pub fn bind_row<R, S>(&self, record: &S, template: Option<&R>) -> Result<R, BindError>
    where
        R: Record,
        S: SourceRecord + ?Sized,
    {
        let mut instance = match template {
            Some(template) => clone_template(template)?,
            None => new_instance::<R>()?,
        };
        self.assign_fields(&mut instance, record)?;
        if self.options.normalize_nulls {
            normalize_null_strings(&mut instance)?;
        }
        Ok(instance)
    }

    /// Binds every row of `table` in order.
    pub fn bind_table<R: Record>(
        &self,
        table: &DataTable,
        template: Option<&R>,
    ) -> Result<Vec<R>, BindError> {
        let bound = table
            .rows()
            .map(|row| self.bind_row(&row, template))
            .collect::<Result<Vec<R>, BindError>>()?;
        debug!(
            "Bound {} table row(s) into {}",
            bound.len(),
            type_name::<R>()
        );
        Ok(bound)
    }

    /// Drains `reader` in a single forward pass. Column names are resolved
    /// once, before the first record is read.
    pub fn bind_reader<R, D>(&self, reader: &mut D, template: Option<&R>) -> Result<Vec<R>, BindError>
    where
        R: Record,
        D: DataReader + ?Sized,
    {
        let lookup = FieldLookup::from_reader(&*reader);
        let mut bound = Vec::new();
        while reader.read()? {
            let current = CurrentRecord::new(&*reader, &lookup);
            bound.push(self.bind_row(&current, template)?);
        }
        debug!(
            "Bound {} reader record(s) into {}",
            bound.len(),
            type_name::<R>()
        );
        Ok(bound)
    }

    /// Converts one cell to `T`. A null cell yields `None` for optional
    /// targets and a conversion error otherwise.
    pub fn convert_cell<T, S>(&self, record: &S, column: &str) -> Result<T, BindError>
    where
        T: FieldValue,
        S: SourceRecord + ?Sized,
    {
        let ordinal = record
            .ordinal(column)
            .ok_or_else(|| BindError::MissingColumn(column.to_string()))?;
        match record.value(ordinal).filter(|_| !record.is_null(ordinal)) {
            Some(raw) => self.convert_value(raw, column),
            None if T::OPTIONAL => T::from_value(None)
                .map_err(|source| BindError::conversion(column, source)),
            None => Err(BindError::conversion(
                column,
                ConversionError::new("null", T::FIELD_TYPE, "cell is null"),
            )),
        }
    }

    /// Like [`Binder::convert_cell`], but returns `default` for a null cell
    /// without attempting any conversion.
    pub fn convert_cell_or<T, S>(&self, record: &S, column: &str, default: T) -> Result<T, BindError>
    where
        T: FieldValue,
        S: SourceRecord + ?Sized,
    {
        let ordinal = record
            .ordinal(column)
            .ok_or_else(|| BindError::MissingColumn(column.to_string()))?;
        if record.is_null(ordinal) {
            return Ok(default);
        }
        match record.value(ordinal) {
            Some(raw) => self.convert_value(raw, column),
            None => Ok(default),
        }
    }

    fn convert_value<T: FieldValue>(&self, raw: &Value, column: &str) -> Result<T, BindError> {
        coerce(raw, T::FIELD_TYPE, &self.options.locale)
            .and_then(|value| T::from_value(Some(value)))
            .map_err(|source| BindError::conversion(column, source))
    }

    fn assign_fields<R, S>(&self, instance: &mut R, record: &S) -> Result<(), BindError>
    where
        R: Record,
        S: SourceRecord + ?Sized,
    {
        for descriptor in R::descriptors() {
            let Some(raw) = assignable_value(record, descriptor) else {
                continue;
            };
            let value = coerce(raw, descriptor.field_type, &self.options.locale)
                .map_err(|source| BindError::conversion(descriptor.name, source))?;
            instance.set(descriptor.name, Some(value))?;
        }
        Ok(())
    }
}

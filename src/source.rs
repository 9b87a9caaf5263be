//! Capabilities a tabular source must offer to be bound.

use std::collections::HashMap;

use log::warn;

use crate::{data::Value, error::BindError};

/// Random access to the cells of one record.
pub trait SourceRecord {
    /// Position of the column called `name`, matched case-insensitively.
    fn ordinal(&self, name: &str) -> Option<usize>;

    fn is_null(&self, ordinal: usize) -> bool;

    fn value(&self, ordinal: usize) -> Option<&Value>;

    fn value_by_name(&self, name: &str) -> Option<&Value> {
        self.ordinal(name).and_then(|ordinal| self.value(ordinal))
    }
}

/// Forward-only cursor over records. Each call to [`DataReader::read`]
/// advances to the next record; cell accessors refer to the current one.
pub trait DataReader {
    fn field_count(&self) -> usize;

    fn field_name(&self, ordinal: usize) -> Option<&str>;

    /// Advances the cursor; `Ok(false)` once the source is exhausted.
    fn read(&mut self) -> Result<bool, BindError>;

    fn is_null(&self, ordinal: usize) -> bool;

    fn value(&self, ordinal: usize) -> Option<&Value>;
}

/// Case-insensitive column name to ordinal map.
#[derive(Debug, Clone, Default)]
pub struct FieldLookup {
    ordinals: HashMap<String, usize>,
}

impl FieldLookup {
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_ordinals(names.into_iter().enumerate())
    }

    /// Ordinals are the reader's own; unnamed fields are skipped without
    /// shifting the ones after them.
    pub fn from_reader<D: DataReader + ?Sized>(reader: &D) -> Self {
        Self::from_ordinals(
            (0..reader.field_count())
                .filter_map(|ordinal| reader.field_name(ordinal).map(|name| (ordinal, name))),
        )
    }

    fn from_ordinals<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut ordinals = HashMap::new();
        for (ordinal, name) in entries {
            let key = lookup_key(name);
            if ordinals.contains_key(&key) {
                warn!("Duplicate column '{name}' at position {ordinal} ignored");
                continue;
            }
            ordinals.insert(key, ordinal);
        }
        Self { ordinals }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.ordinals.get(&lookup_key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}

fn lookup_key(name: &str) -> String {
    name.to_lowercase()
}

/// The reader's current record, resolved through a lookup built before the
/// first read.
pub struct CurrentRecord<'a, D: ?Sized> {
    reader: &'a D,
    lookup: &'a FieldLookup,
}

impl<'a, D: DataReader + ?Sized> CurrentRecord<'a, D> {
    pub fn new(reader: &'a D, lookup: &'a FieldLookup) -> Self {
        Self { reader, lookup }
    }
}

impl<D: DataReader + ?Sized> SourceRecord for CurrentRecord<'_, D> {
    fn ordinal(&self, name: &str) -> Option<usize> {
        self.lookup.get(name)
    }

    fn is_null(&self, ordinal: usize) -> bool {
        self.reader.is_null(ordinal)
    }

    fn value(&self, ordinal: usize) -> Option<&Value> {
        self.reader.value(ordinal)
    }
}

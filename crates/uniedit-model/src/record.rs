//! In-memory record store for one loaded survey dataset.
//!
//! The store holds the header schema once and keeps every record as a
//! positionally aligned value vector, so records never carry their own
//! field-name copies. Row order from the source file is preserved through
//! a per-record sequence number and restored on serialization.

use std::collections::BTreeMap;

use crate::error::{Result, StoreError};

/// Reserved header column holding the unique record ID.
pub const ID_FIELD: &str = "答题序号";

/// Prefix prepended to every question field of an outdated record.
pub const OUTDATED_MARKER: &str = "[过时]：";

/// Separator between old and new name in one alias line. Guaranteed not to
/// occur in school names.
pub const ALIAS_SEPARATOR: char = '🚮';

/// First numbered question column (`Q5`).
pub const QUESTION_INDEX_START: u32 = 5;

/// Last numbered question column (`Q29`).
pub const QUESTION_INDEX_END: u32 = 29;

/// Iterates the fixed question field names, `Q5` through `Q29`.
pub fn question_fields() -> impl Iterator<Item = String> {
    (QUESTION_INDEX_START..=QUESTION_INDEX_END).map(|i| format!("Q{i}"))
}

/// One survey response, positionally aligned with the store schema.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    /// Zero-based row position in the source file, used to keep output
    /// row order stable across deletes.
    pub seq: usize,
    /// Field values in schema order.
    pub values: Vec<String>,
}

/// The currently loaded dataset plus the alias line sequence.
///
/// Replaced wholesale on each `load`; mutated in place by delete/outdate.
/// The store itself never logs edits; callers validate and append to the
/// change log after a successful mutation.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    schema: Vec<String>,
    records: BTreeMap<String, Record>,
    alias_lines: Vec<String>,
    encoding: String,
    next_seq: usize,
}

impl RecordStore {
    /// Creates an empty store with the given header schema and the text
    /// encoding label detected at load time.
    #[must_use]
    pub fn new(schema: Vec<String>, encoding: impl Into<String>) -> Self {
        Self {
            schema,
            records: BTreeMap::new(),
            alias_lines: Vec::new(),
            encoding: encoding.into(),
            next_seq: 0,
        }
    }

    /// Inserts one record in source-file order. Values shorter than the
    /// schema are padded with empty strings.
    pub fn insert(&mut self, id: impl Into<String>, mut values: Vec<String>) {
        values.resize(self.schema.len(), String::new());
        let record = Record {
            seq: self.next_seq,
            values,
        };
        self.next_seq += 1;
        self.records.insert(id.into(), record);
    }

    /// Replaces the alias line sequence (used at load time).
    pub fn set_alias_lines(&mut self, lines: Vec<String>) {
        self.alias_lines = lines;
    }

    #[must_use]
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    #[must_use]
    pub fn alias_lines(&self) -> &[String] {
        &self.alias_lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// Looks up one field of one record by schema position.
    #[must_use]
    pub fn field_value(&self, id: &str, field: &str) -> Option<&str> {
        let index = self.schema.iter().position(|name| name == field)?;
        self.records
            .get(id)
            .and_then(|record| record.values.get(index))
            .map(String::as_str)
    }

    /// Records sorted by source row position, for serialization.
    #[must_use]
    pub fn rows_in_load_order(&self) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self.records.values().collect();
        rows.sort_by_key(|record| record.seq);
        rows
    }

    /// Removes one record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] when the ID is not loaded.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::RecordNotFound { id: id.to_string() })
    }

    /// Prefixes the outdated marker onto every question field of one record.
    ///
    /// Intentionally not idempotent: outdating the same record twice
    /// prefixes the marker twice.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] when the ID is not loaded.
    pub fn mark_outdated(&mut self, id: &str) -> Result<()> {
        if !self.records.contains_key(id) {
            return Err(StoreError::RecordNotFound { id: id.to_string() });
        }
        let indices: Vec<usize> = question_fields()
            .filter_map(|field| self.schema.iter().position(|name| *name == field))
            .collect();
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::RecordNotFound { id: id.to_string() })?;
        for index in indices {
            if let Some(value) = record.values.get_mut(index) {
                value.insert_str(0, OUTDATED_MARKER);
            }
        }
        Ok(())
    }

    /// Appends one formatted alias line. Pure append, never fails.
    pub fn append_alias(&mut self, old_name: &str, new_name: &str) {
        self.alias_lines
            .push(format!("{old_name}{ALIAS_SEPARATOR}{new_name}"));
    }
}

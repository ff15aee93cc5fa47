//! Structured change log accumulated over one editing session.
//!
//! Record edits (delete/outdate) are keyed by record ID with last-write-wins
//! semantics: a later edit to the same ID replaces the entry's kind and
//! attribution but keeps the ID's first-insertion position, which is the
//! iteration order the report generator renders. Alias entries are
//! append-only and never deduplicated.

/// The kind of edit applied to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChangeKind {
    /// The record was removed from the dataset.
    Deletion,
    /// The record's question fields were marked with the outdated prefix.
    Outdate,
}

/// One logged record edit. At most one entry exists per record ID.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChangeEntry {
    pub id: String,
    pub kind: ChangeKind,
    /// Operator-supplied reference tokens; empty means unattributed.
    pub issue_ids: Vec<String>,
}

/// One logged school rename, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AliasEntry {
    pub old_name: String,
    pub new_name: String,
    pub issue_ids: Vec<String>,
}

/// Accumulated edits for the session, consumed by the report generator.
///
/// Existence validation belongs to the command layer; the log accepts any
/// ID it is handed.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ChangeLog {
    edits: Vec<ChangeEntry>,
    aliases: Vec<AliasEntry>,
}

impl ChangeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a deletion, overwriting any earlier entry for the same ID.
    pub fn record_deletion(&mut self, id: &str, issue_ids: Vec<String>) {
        self.record_edit(id, ChangeKind::Deletion, issue_ids);
    }

    /// Logs an outdate marking, overwriting any earlier entry for the same ID.
    pub fn record_outdate(&mut self, id: &str, issue_ids: Vec<String>) {
        self.record_edit(id, ChangeKind::Outdate, issue_ids);
    }

    fn record_edit(&mut self, id: &str, kind: ChangeKind, issue_ids: Vec<String>) {
        if let Some(entry) = self.edits.iter_mut().find(|entry| entry.id == id) {
            entry.kind = kind;
            entry.issue_ids = issue_ids;
        } else {
            self.edits.push(ChangeEntry {
                id: id.to_string(),
                kind,
                issue_ids,
            });
        }
    }

    /// Logs one alias invocation. Always appends, even for a repeated pair.
    pub fn record_alias(&mut self, old_name: &str, new_name: &str, issue_ids: Vec<String>) {
        self.aliases.push(AliasEntry {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            issue_ids,
        });
    }

    /// Record edits in first-insertion order of their IDs.
    #[must_use]
    pub fn edits(&self) -> &[ChangeEntry] {
        &self.edits
    }

    /// Alias entries in invocation order.
    #[must_use]
    pub fn aliases(&self) -> &[AliasEntry] {
        &self.aliases
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty() && self.aliases.is_empty()
    }
}

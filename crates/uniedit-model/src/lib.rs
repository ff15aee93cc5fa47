pub mod changelog;
pub mod error;
pub mod record;

pub use changelog::{AliasEntry, ChangeEntry, ChangeKind, ChangeLog};
pub use error::{Result, StoreError};
pub use record::{
    ALIAS_SEPARATOR, ID_FIELD, OUTDATED_MARKER, QUESTION_INDEX_END, QUESTION_INDEX_START, Record,
    RecordStore, question_fields,
};

pub mod dataset;
pub mod discovery;
pub mod encoding;
pub mod error;

pub use dataset::{load_alias, load_dataset, write_alias, write_dataset};
pub use discovery::{
    ALIAS_EXTENSION, DATASET_EXTENSION, DEFAULT_ALIAS_NAME, DEFAULT_DATASET_NAME,
    DEFAULT_SCAN_FOLDERS, scan_folders,
};
pub use encoding::{DETECTION_PREFIX_LEN, detect_encoding};
pub use error::{LoadError, SerializeError};

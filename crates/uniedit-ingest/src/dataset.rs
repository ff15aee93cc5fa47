//! Loading and serializing the delimited dataset and the alias list.
//!
//! The dataset file is delimited text with a header row; the header schema
//! is inferred from that row at load time and drives re-serialization. The
//! detected encoding is recorded on the store so `dump` writes bytes in the
//! same encoding the file was loaded with. The alias file is plain UTF-8,
//! one rename per line.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, info};

use uniedit_model::{ID_FIELD, RecordStore};

use crate::encoding::{DETECTION_PREFIX_LEN, detect_encoding};
use crate::error::{LoadError, SerializeError};

/// Reads the dataset file into a fresh record store keyed by the ID column.
///
/// # Errors
///
/// - [`LoadError::MissingFile`] when the path does not exist;
/// - [`LoadError::Schema`] when there is no header row or no ID column;
/// - [`LoadError::Encoding`] when the bytes cannot be decoded under the
///   detected encoding.
pub fn load_dataset(path: &Path) -> Result<RecordStore, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let prefix = &bytes[..bytes.len().min(DETECTION_PREFIX_LEN)];
    let encoding = detect_encoding(prefix);
    debug!(encoding = encoding.name(), path = %path.display(), "detected dataset encoding");
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(LoadError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|error| LoadError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?
        .clone();
    let schema: Vec<String> = headers
        .iter()
        .map(|header| header.trim_matches('\u{feff}').to_string())
        .collect();
    if schema.iter().all(String::is_empty) {
        return Err(LoadError::Schema {
            path: path.to_path_buf(),
            reason: "no header row".to_string(),
        });
    }
    let Some(id_index) = schema.iter().position(|field| field == ID_FIELD) else {
        return Err(LoadError::Schema {
            path: path.to_path_buf(),
            reason: format!("missing ID column {ID_FIELD}"),
        });
    };

    let mut store = RecordStore::new(schema, encoding.name());
    for result in reader.records() {
        let record = result.map_err(|error| LoadError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        let id = values.get(id_index).cloned().unwrap_or_default();
        store.insert(id, values);
    }
    info!(records = store.len(), "dataset loaded");
    Ok(store)
}

/// Reads the alias file as UTF-8 lines.
///
/// # Errors
///
/// [`LoadError::MissingFile`] when the path does not exist,
/// [`LoadError::Encoding`] when the content is not valid UTF-8.
pub fn load_alias(path: &Path) -> Result<Vec<String>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
        path: path.to_path_buf(),
        encoding: UTF_8.name().to_string(),
    })?;
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    info!(lines = lines.len(), "alias file loaded");
    Ok(lines)
}

/// Serializes the dataset back to delimited bytes in the stored encoding
/// and original row order.
///
/// # Errors
///
/// [`SerializeError::EmptyDataset`] when no records remain; there is no
/// stored header independent of the data.
pub fn write_dataset(store: &RecordStore, path: &Path) -> Result<(), SerializeError> {
    if store.is_empty() {
        return Err(SerializeError::EmptyDataset);
    }
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(store.schema())
        .map_err(|error| SerializeError::CsvWrite {
            message: error.to_string(),
        })?;
    for record in store.rows_in_load_order() {
        writer
            .write_record(&record.values)
            .map_err(|error| SerializeError::CsvWrite {
                message: error.to_string(),
            })?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|error| SerializeError::CsvWrite {
            message: error.to_string(),
        })?;
    let text = String::from_utf8(buffer).map_err(|error| SerializeError::CsvWrite {
        message: error.to_string(),
    })?;

    let encoding = Encoding::for_label(store.encoding().as_bytes()).unwrap_or(UTF_8);
    let (bytes, _, _) = encoding.encode(&text);
    fs::write(path, &bytes).map_err(|source| SerializeError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(records = store.len(), encoding = encoding.name(), path = %path.display(), "dataset written");
    Ok(())
}

/// Writes the alias line sequence as newline-joined UTF-8.
///
/// # Errors
///
/// [`SerializeError::FileWrite`] when the file cannot be written.
pub fn write_alias(store: &RecordStore, path: &Path) -> Result<(), SerializeError> {
    let text = store.alias_lines().join("\n");
    fs::write(path, text).map_err(|source| SerializeError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(lines = store.alias_lines().len(), path = %path.display(), "alias file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_sample_csv(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("results.csv");
        fs::write(&path, "答题序号,Q5,Q6\n1,alpha,beta\n2,gamma,delta\n").unwrap();
        path
    }

    #[test]
    fn test_load_dataset_keys_by_id() {
        let dir = TempDir::new().unwrap();
        let path = write_sample_csv(&dir);

        let store = load_dataset(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.field_value("1", "Q5"), Some("alpha"));
        assert_eq!(store.field_value("2", "Q6"), Some("delta"));
        assert_eq!(store.encoding(), "UTF-8");
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }

    #[test]
    fn test_load_dataset_empty_file_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
    }

    #[test]
    fn test_load_dataset_missing_id_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noid.csv");
        fs::write(&path, "Q5,Q6\na,b\n").unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
    }

    #[test]
    fn test_load_gbk_dataset_and_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gbk.csv");
        let text = "答题序号,Q5\n1,清华大学\n";
        let (bytes, _, _) = encoding_rs::GBK.encode(text);
        fs::write(&path, &bytes).unwrap();

        let store = load_dataset(&path).unwrap();
        assert_eq!(store.encoding(), "GBK");
        assert_eq!(store.field_value("1", "Q5"), Some("清华大学"));

        let out = dir.path().join("out.csv");
        write_dataset(&store, &out).unwrap();
        assert_eq!(fs::read(&out).unwrap(), bytes.as_ref());
    }

    #[test]
    fn test_write_dataset_round_trips_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write_sample_csv(&dir);
        let store = load_dataset(&path).unwrap();

        let out = dir.path().join("out.csv");
        write_dataset(&store, &out).unwrap();
        assert_eq!(fs::read(&out).unwrap(), fs::read(&path).unwrap());
    }

    #[test]
    fn test_write_dataset_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = write_sample_csv(&dir);
        let mut store = load_dataset(&path).unwrap();
        store.delete("1").unwrap();
        store.delete("2").unwrap();

        let err = write_dataset(&store, &dir.path().join("out.csv")).unwrap_err();
        assert!(matches!(err, SerializeError::EmptyDataset));
    }

    #[test]
    fn test_alias_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alias.txt");
        fs::write(&path, "旧名🚮新名\n甲校🚮乙校").unwrap();

        let lines = load_alias(&path).unwrap();
        assert_eq!(lines, ["旧名🚮新名", "甲校🚮乙校"]);

        let mut store = RecordStore::new(vec![ID_FIELD.to_string()], "UTF-8");
        store.set_alias_lines(lines);
        store.append_alias("丙校", "丁校");
        let out = dir.path().join("alias-out.txt");
        write_alias(&store, &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "旧名🚮新名\n甲校🚮乙校\n丙校🚮丁校"
        );
    }

    #[test]
    fn test_load_alias_rejects_non_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alias.txt");
        fs::write(&path, [0xFF, 0xFE, 0x80]).unwrap();
        let err = load_alias(&path).unwrap_err();
        assert!(matches!(err, LoadError::Encoding { .. }));
    }
}

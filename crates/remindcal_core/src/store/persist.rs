//! JSON file persistence for the reminder store.
//!
//! # Responsibility
//! - Hydrate a store from the data file at startup.
//! - Replace the data file wholesale on save.
//!
//! # Invariants
//! - A missing or malformed data file never aborts startup.
//! - Saves never leave a partially written data file behind.
//! - Log events carry counts and durations only, never reminder text.

use super::ReminderStore;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const JSON_INDENT: &[u8] = b"    ";
const TEMP_SUFFIX: &str = ".tmp";

pub type PersistResult<T> = Result<T, PersistError>;

/// Unrecoverable persistence failure.
#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode reminders: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// How the data file contributed to a loaded store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No data file yet; the store starts empty.
    Missing,
    /// Data file parsed successfully.
    Restored { dates: usize },
    /// Data file exists but is not a `date -> [text]` JSON object; the store
    /// starts empty.
    Malformed { reason: String },
}

/// Result of [`load_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedStore {
    pub store: ReminderStore,
    pub status: LoadStatus,
}

/// Loads the store from `path`.
///
/// # Errors
/// - Returns `PersistError::Io` when the file exists but cannot be read.
///   Missing and malformed files are reported through [`LoadStatus`] instead.
pub fn load_store(path: impl AsRef<Path>) -> PersistResult<LoadedStore> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_load module=store status=start");

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=store_load module=store status=ok source=missing duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(LoadedStore {
                store: ReminderStore::new(),
                status: LoadStatus::Missing,
            });
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    match serde_json::from_slice::<BTreeMap<String, Vec<String>>>(&bytes) {
        Ok(entries) => {
            let store = ReminderStore::from_entries(entries);
            let dates = store.len();
            info!(
                "event=store_load module=store status=ok source=file duration_ms={} dates={} reminders={}",
                started_at.elapsed().as_millis(),
                dates,
                store.reminder_count()
            );
            Ok(LoadedStore {
                store,
                status: LoadStatus::Restored { dates },
            })
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=recovered duration_ms={} error_code=malformed_data line={} column={}",
                started_at.elapsed().as_millis(),
                err.line(),
                err.column()
            );
            Ok(LoadedStore {
                store: ReminderStore::new(),
                status: LoadStatus::Malformed {
                    reason: err.to_string(),
                },
            })
        }
    }
}

/// Serializes the full store to `path`, replacing previous contents.
///
/// Output is a pretty-printed JSON object with four-space indentation. The
/// file is written to a sibling temporary path and renamed into place.
pub fn save_store(path: impl AsRef<Path>, store: &ReminderStore) -> PersistResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let encoded = encode_store(store)?;
    let temp_path = temp_path_for(path);
    let written = std::fs::write(&temp_path, &encoded)
        .map_err(|source| PersistError::Io {
            path: temp_path.clone(),
            source,
        })
        .and_then(|()| {
            std::fs::rename(&temp_path, path).map_err(|source| PersistError::Io {
                path: path.to_path_buf(),
                source,
            })
        });

    match written {
        Ok(()) => {
            info!(
                "event=store_save module=store status=ok duration_ms={} dates={} bytes={}",
                started_at.elapsed().as_millis(),
                store.len(),
                encoded.len()
            );
            Ok(())
        }
        Err(err) => {
            let _ = std::fs::remove_file(&temp_path);
            error!(
                "event=store_save module=store status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn encode_store(store: &ReminderStore) -> PersistResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    store.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("reminders"));
    file_name.push(TEMP_SUFFIX);
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::{encode_store, temp_path_for};
    use crate::store::ReminderStore;
    use chrono::NaiveDate;
    use std::path::Path;

    #[test]
    fn encode_uses_four_space_indent_and_trailing_newline() {
        let mut store = ReminderStore::new();
        store
            .add(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), "Pay rent")
            .unwrap();

        let encoded = String::from_utf8(encode_store(&store).unwrap()).unwrap();
        assert_eq!(
            encoded,
            "{\n    \"2025-06-01\": [\n        \"Pay rent\"\n    ]\n}\n"
        );
    }

    #[test]
    fn encode_empty_store_is_empty_object() {
        let encoded = encode_store(&ReminderStore::new()).unwrap();
        assert_eq!(encoded, b"{}\n");
    }

    #[test]
    fn temp_path_is_sibling_of_target() {
        let temp = temp_path_for(Path::new("/data/calendar_data.json"));
        assert_eq!(temp, Path::new("/data/calendar_data.json.tmp"));
    }
}

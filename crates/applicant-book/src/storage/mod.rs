//! Persistence for the address book.

mod csv_import;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{AddressBook, Applicant, ListError};

pub use csv_import::{import_csv, import_csv_path, CsvImportError, ImportReport};

/// Storage abstraction so the logic layer can be exercised in isolation.
pub trait AddressBookStorage: Send + Sync {
    /// Loads the stored book, `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<AddressBook>, StorageError>;
    fn save(&self, book: &AddressBook) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' is not a valid address book file: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{}' contains duplicate applicants", .path.display())]
    DuplicateApplicants { path: PathBuf },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedAddressBook {
    applicants: Vec<Applicant>,
}

/// JSON file holding `{"applicants": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonAddressBookStorage {
    path: PathBuf,
}

impl JsonAddressBookStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AddressBookStorage for JsonAddressBookStorage {
    fn read(&self) -> Result<Option<AddressBook>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no address book file yet, starting empty");
                return Ok(None);
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let stored: SerializedAddressBook =
            serde_json::from_str(&raw).map_err(|source| StorageError::Format {
                path: self.path.clone(),
                source,
            })?;
        let book = AddressBook::from_applicants(stored.applicants).map_err(|_: ListError| {
            StorageError::DuplicateApplicants {
                path: self.path.clone(),
            }
        })?;

        info!(path = %self.path.display(), applicants = book.len(), "address book loaded");
        Ok(Some(book))
    }

    fn save(&self, book: &AddressBook) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let stored = SerializedAddressBook {
            applicants: book.applicants().to_vec(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|err| self.io_error(err))?;

        debug!(path = %self.path.display(), applicants = book.len(), "address book saved");
        Ok(())
    }
}

/// Keeps the last saved snapshot in memory instead of on disk.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    snapshot: Arc<Mutex<Option<Vec<Applicant>>>>,
}

impl InMemoryStorage {
    pub fn saved(&self) -> Option<Vec<Applicant>> {
        self.snapshot
            .lock()
            .expect("storage mutex poisoned")
            .clone()
    }
}

impl AddressBookStorage for InMemoryStorage {
    fn read(&self) -> Result<Option<AddressBook>, StorageError> {
        match self.saved() {
            Some(applicants) => AddressBook::from_applicants(applicants)
                .map(Some)
                .map_err(|err| StorageError::Unavailable(err.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, book: &AddressBook) -> Result<(), StorageError> {
        let mut guard = self.snapshot.lock().expect("storage mutex poisoned");
        *guard = Some(book.applicants().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{applicant, rated};
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = JsonAddressBookStorage::new(dir.path().join("absent.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn save_then_read_preserves_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let storage = JsonAddressBookStorage::new(dir.path().join("nested/book.json"));
        let book = AddressBook::from_applicants(vec![
            rated("Zed", "Engineer", 2),
            applicant("Amy", "Designer"),
        ])
        .unwrap();

        storage.save(&book).expect("save");
        let loaded = storage.read().expect("read").expect("present");

        assert_eq!(loaded, book);
    }

    #[test]
    fn invalid_values_are_format_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        let book = AddressBook::from_applicants(vec![applicant("Amy", "Designer")]).unwrap();
        let storage = JsonAddressBookStorage::new(&path);
        storage.save(&book).unwrap();

        let tampered = fs::read_to_string(&path)
            .unwrap()
            .replace("\"rating\": -1", "\"rating\": 9");
        fs::write(&path, tampered).unwrap();

        assert!(matches!(storage.read(), Err(StorageError::Format { .. })));
    }

    #[test]
    fn duplicate_applicants_in_file_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        let amy = serde_json::to_value(applicant("Amy", "Designer")).unwrap();
        let doc = serde_json::json!({ "applicants": [amy.clone(), amy] });
        fs::write(&path, doc.to_string()).unwrap();

        let result = JsonAddressBookStorage::new(&path).read();
        assert!(matches!(result, Err(StorageError::DuplicateApplicants { .. })));
    }
}

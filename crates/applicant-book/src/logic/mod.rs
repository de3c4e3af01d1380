//! Command execution on top of the address book: parse, run, persist.

pub mod commands;
pub mod parser;
mod session;

use std::io::Read;

use tracing::{debug, info, warn};

use crate::model::{AddressBook, Applicant};
use crate::photo::ProfilePhotoStore;
use crate::storage::{import_csv, AddressBookStorage, CsvImportError, ImportReport, StorageError};

use commands::{Command, CommandError, CommandResult};
use parser::{AddressBookParser, ParseError};

pub use session::Session;

#[derive(Debug, thiserror::Error)]
pub enum LogicError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Import(#[from] CsvImportError),
}

/// Owns the session and saves the book after every command that changed it.
pub struct Logic<S> {
    session: Session,
    storage: S,
}

impl<S> Logic<S>
where
    S: AddressBookStorage,
{
    pub fn new(mut book: AddressBook, photos: ProfilePhotoStore, storage: S) -> Self {
        book.subscribe(|event| debug!(?event, "address book changed"));
        Self {
            session: Session::new(book, photos),
            storage,
        }
    }

    /// Reads the stored book, starting empty when nothing was saved yet.
    pub fn load(storage: S, photos: ProfilePhotoStore) -> Result<Self, LogicError> {
        let book = storage.read()?.unwrap_or_default();
        Ok(Self::new(book, photos, storage))
    }

    pub fn execute(&mut self, input: &str) -> Result<CommandResult, LogicError> {
        let command = AddressBookParser::parse(input).map_err(|err| {
            debug!(input, error = %err, "command rejected by parser");
            err
        })?;
        self.run(command)
    }

    pub fn run(&mut self, command: Command) -> Result<CommandResult, LogicError> {
        let word = command.word();
        let result = command.execute(&mut self.session).map_err(|err| {
            warn!(command = word, error = %err, "command failed");
            err
        })?;
        info!(command = word, changed = result.changed, "command executed");

        if result.changed {
            self.storage.save(self.session.book())?;
        }
        Ok(result)
    }

    /// Adds every CSV row to the book and saves when anything was added.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<ImportReport, LogicError> {
        let report = import_csv(reader, self.session.book_mut())?;
        if report.added > 0 {
            self.storage.save(self.session.book())?;
        }
        Ok(report)
    }

    pub fn displayed(&self) -> Vec<&Applicant> {
        self.session.displayed()
    }

    pub fn book(&self) -> &AddressBook {
        self.session.book()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

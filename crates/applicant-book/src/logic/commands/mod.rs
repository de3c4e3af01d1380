//! Executable commands. Each one is produced by the parser and runs against a
//! [`Session`].

mod mutate;
mod sort;
mod summary;

use std::path::PathBuf;

use crate::model::{ApplicantFilter, ListError};
use crate::photo::PhotoError;

use super::session::Session;

pub use mutate::{AddCommand, EditCommand, EditDescriptor};
pub use sort::SortCommand;
pub use summary::{ApplicantSummary, SummaryCommand};

/// One-based position in the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    pub fn from_one_based(value: usize) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn one_based(self) -> usize {
        self.0
    }

    pub fn zero_based(self) -> usize {
        self.0 - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
    /// Whether the address book changed and should be persisted.
    pub changed: bool,
}

impl CommandResult {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
            changed: false,
        }
    }

    pub fn changed(feedback: impl Into<String>) -> Self {
        Self {
            changed: true,
            ..Self::message(feedback)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("The applicant index provided is invalid")]
    InvalidIndex,
    #[error("This applicant already exists in the address book")]
    DuplicateApplicant,
    #[error("The applicant could not be found in the address book")]
    ApplicantNotFound,
    #[error(transparent)]
    Photo(#[from] PhotoError),
}

impl From<ListError> for CommandError {
    fn from(value: ListError) -> Self {
        match value {
            ListError::DuplicateEntity => Self::DuplicateApplicant,
            ListError::EntityNotFound => Self::ApplicantNotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Delete(Index),
    List,
    Search(ApplicantFilter),
    Summary(SummaryCommand),
    Sort(SortCommand),
    Photo { index: Index, source: PathBuf },
    Clear,
    Help,
    Exit,
}

pub const ADD_USAGE: &str = "add: Adds an applicant to the address book.\n\
    Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS j/JOB_POSITION [s/STATUS] [r/RATING] [t/TAG]...\n\
    Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 j/Software Engineer t/referral";
pub const EDIT_USAGE: &str = "edit: Edits the applicant at INDEX in the displayed list. Existing values are overwritten.\n\
    Parameters: INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [j/JOB_POSITION] [s/STATUS] [r/RATING] [t/TAG]...\n\
    Example: edit 1 s/Interview r/4";
pub const DELETE_USAGE: &str = "delete: Deletes the applicant at INDEX in the displayed list.\n\
    Example: delete 1";
pub const LIST_USAGE: &str = "list: Shows every applicant.";
pub const SEARCH_USAGE: &str = "search: Shows applicants matching every given field (case-insensitive keywords).\n\
    Parameters: [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [j/JOB_POSITION] [s/STATUS] [t/TAG] (at least one)\n\
    Example: search j/engineer s/interview";
pub const SUMMARY_USAGE: &str = "summary: Summarises applicants by status, job position and rating.\n\
    Parameters: same filters as search, all optional\n\
    Example: summary j/engineer";
pub const SORT_USAGE: &str = "sort: Sorts the applicants based on [CRITERIA] [asc|desc].\n\
    Accepted [CRITERIA]: n/ (name), e/ (email), d/ (added time), j/ (job position), s/ (status), r/ (rating)\n\
    Example: sort n/\n\
    Example: sort r/ desc";
pub const PHOTO_USAGE: &str = "photo: Sets the profile photo of the applicant at INDEX from a png or jpeg file.\n\
    Example: photo 2 /home/user/pictures/alex.png";
pub const CLEAR_USAGE: &str = "clear: Deletes every applicant and their stored photos.";
pub const HELP_USAGE: &str = "help: Shows program usage instructions.";
pub const EXIT_USAGE: &str = "exit: Exits the program.";

pub fn help_text() -> String {
    [
        ADD_USAGE,
        EDIT_USAGE,
        DELETE_USAGE,
        LIST_USAGE,
        SEARCH_USAGE,
        SUMMARY_USAGE,
        SORT_USAGE,
        PHOTO_USAGE,
        CLEAR_USAGE,
        HELP_USAGE,
        EXIT_USAGE,
    ]
    .join("\n\n")
}

impl Command {
    pub const fn word(&self) -> &'static str {
        match self {
            Command::Add(_) => "add",
            Command::Edit(_) => "edit",
            Command::Delete(_) => "delete",
            Command::List => "list",
            Command::Search(_) => "search",
            Command::Summary(_) => "summary",
            Command::Sort(_) => "sort",
            Command::Photo { .. } => "photo",
            Command::Clear => "clear",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    pub fn execute(self, session: &mut Session) -> Result<CommandResult, CommandError> {
        match self {
            Command::Add(command) => command.execute(session),
            Command::Edit(command) => command.execute(session),
            Command::Delete(index) => mutate::delete(session, index),
            Command::Photo { index, source } => mutate::set_photo(session, index, &source),
            Command::Clear => {
                session.book_mut().clear();
                session.set_filter(ApplicantFilter::all());
                Ok(CommandResult::changed("Address book has been cleared!"))
            }
            Command::List => {
                session.set_filter(ApplicantFilter::all());
                Ok(CommandResult::message("Listed all applicants"))
            }
            Command::Search(filter) => {
                session.set_filter(filter);
                let shown = session.displayed().len();
                Ok(CommandResult::message(format!("{shown} applicants listed!")))
            }
            Command::Summary(command) => Ok(command.execute(session)),
            Command::Sort(command) => Ok(command.execute(session)),
            Command::Help => Ok(CommandResult {
                show_help: true,
                ..CommandResult::message(help_text())
            }),
            Command::Exit => Ok(CommandResult {
                exit: true,
                ..CommandResult::message("Exiting Address Book as requested ...")
            }),
        }
    }
}

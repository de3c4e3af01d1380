use crate::model::{SortDirection, SortField};

use super::{CommandResult, Session};

pub const MESSAGE_SORT_SUCCESS: &str = "Applicant list has been sorted successfully based on";

/// Reorders the whole book by one field. Only recognised fields can be
/// constructed, so unknown criteria are rejected before reaching the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCommand {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortCommand {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn criteria(&self) -> &'static str {
        self.field.label()
    }

    pub(super) fn execute(self, session: &mut Session) -> CommandResult {
        session
            .book_mut()
            .sort_applicants(self.field, self.direction);
        let mut feedback = format!("{MESSAGE_SORT_SUCCESS} {}", self.criteria());
        if self.direction == SortDirection::Descending {
            feedback.push_str(" (descending)");
        }
        CommandResult::changed(feedback)
    }
}

use std::collections::BTreeSet;
use std::path::Path;

use crate::model::{
    Address, Applicant, ApplicationStatus, Email, JobPosition, Name, Phone, Rating, Tag,
};

use super::{CommandError, CommandResult, Index, Session};

#[derive(Debug, Clone, PartialEq)]
pub struct AddCommand {
    pub applicant: Applicant,
}

impl AddCommand {
    pub fn new(applicant: Applicant) -> Self {
        Self { applicant }
    }

    pub(super) fn execute(self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let summary = self.applicant.to_string();
        session.book_mut().add_applicant(self.applicant)?;
        Ok(CommandResult::changed(format!("New applicant added: {summary}")))
    }
}

/// Fields to overwrite on an existing applicant. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub job_position: Option<JobPosition>,
    pub status: Option<ApplicationStatus>,
    pub rating: Option<Rating>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.job_position.is_some()
            || self.status.is_some()
            || self.rating.is_some()
            || self.tags.is_some()
    }

    /// Edited copy of `original`; added time and photo are carried over.
    pub fn apply_to(&self, original: &Applicant) -> Applicant {
        let mut edited = original.clone();
        if let Some(name) = &self.name {
            edited.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            edited.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            edited.email = email.clone();
        }
        if let Some(address) = &self.address {
            edited.address = address.clone();
        }
        if let Some(job_position) = &self.job_position {
            edited.job_position = job_position.clone();
        }
        if let Some(status) = &self.status {
            edited.status = status.clone();
        }
        if let Some(rating) = self.rating {
            edited.rating = rating;
        }
        if let Some(tags) = &self.tags {
            edited.tags = tags.clone();
        }
        edited
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditCommand {
    pub index: Index,
    pub descriptor: EditDescriptor,
}

impl EditCommand {
    pub(super) fn execute(self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let target = session.displayed_at(self.index)?;
        let edited = self.descriptor.apply_to(&target);

        let summary = edited.to_string();
        session.book_mut().set_applicant(&target, edited)?;
        Ok(CommandResult::changed(format!("Edited Applicant: {summary}")))
    }
}

pub(super) fn delete(session: &mut Session, index: Index) -> Result<CommandResult, CommandError> {
    let target = session.displayed_at(index)?;
    let removed = session.book_mut().remove_applicant(&target)?;
    Ok(CommandResult::changed(format!("Deleted Applicant: {removed}")))
}

pub(super) fn set_photo(
    session: &mut Session,
    index: Index,
    source: &Path,
) -> Result<CommandResult, CommandError> {
    let target = session.displayed_at(index)?;
    let stored = session.photos().import(source)?;
    let updated = target.clone().with_profile_photo(Some(stored.clone()));

    if let Err(err) = session.book_mut().set_applicant(&target, updated) {
        crate::photo::discard(&stored);
        return Err(err.into());
    }
    if let Some(previous) = &target.profile_photo {
        crate::photo::discard(previous);
    }

    Ok(CommandResult::changed(format!(
        "Updated profile photo of {}: {}",
        target.name,
        stored.display()
    )))
}

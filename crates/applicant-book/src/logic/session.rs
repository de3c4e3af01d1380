use crate::model::{AddressBook, Applicant, ApplicantFilter};
use crate::photo::ProfilePhotoStore;

use super::commands::{CommandError, Index};

/// State a command runs against: the book, the active filter, and the photo store.
#[derive(Debug)]
pub struct Session {
    book: AddressBook,
    filter: ApplicantFilter,
    photos: ProfilePhotoStore,
}

impl Session {
    pub fn new(book: AddressBook, photos: ProfilePhotoStore) -> Self {
        Self {
            book,
            filter: ApplicantFilter::all(),
            photos,
        }
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut AddressBook {
        &mut self.book
    }

    pub fn photos(&self) -> &ProfilePhotoStore {
        &self.photos
    }

    pub fn filter(&self) -> &ApplicantFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ApplicantFilter) {
        self.filter = filter;
    }

    /// Applicants currently shown, in book order.
    pub fn displayed(&self) -> Vec<&Applicant> {
        self.book
            .applicants()
            .iter()
            .filter(|applicant| self.filter.matches(applicant))
            .collect()
    }

    /// Copy of the applicant shown at `index`.
    pub fn displayed_at(&self, index: Index) -> Result<Applicant, CommandError> {
        self.displayed()
            .get(index.zero_based())
            .map(|applicant| (*applicant).clone())
            .ok_or(CommandError::InvalidIndex)
    }
}

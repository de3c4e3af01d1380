use std::fmt;

use super::applicant::{Applicant, UniqueApplicantList};
use super::sort::{SortDirection, SortField};
use super::unique_list::ListError;

/// Change pushed to listeners after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    Added { index: usize },
    Replaced { index: usize },
    Removed { index: usize },
    Sorted {
        field: SortField,
        direction: SortDirection,
    },
    Reset { len: usize },
}

type Listener = Box<dyn Fn(&BookEvent) + Send + Sync>;

/// Owns the applicant list and notifies listeners of every change.
#[derive(Default)]
pub struct AddressBook {
    applicants: UniqueApplicantList,
    listeners: Vec<Listener>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_applicants(applicants: Vec<Applicant>) -> Result<Self, ListError> {
        Ok(Self {
            applicants: UniqueApplicantList::from_vec(applicants)?,
            listeners: Vec::new(),
        })
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&BookEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn applicants(&self) -> &[Applicant] {
        self.applicants.as_slice()
    }

    pub fn list(&self) -> &UniqueApplicantList {
        &self.applicants
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }

    pub fn has_applicant(&self, applicant: &Applicant) -> bool {
        self.applicants.contains(applicant)
    }

    pub fn add_applicant(&mut self, applicant: Applicant) -> Result<(), ListError> {
        self.applicants.add(applicant)?;
        let index = self.applicants.len() - 1;
        self.notify(BookEvent::Added { index });
        Ok(())
    }

    pub fn set_applicant(
        &mut self,
        target: &Applicant,
        edited: Applicant,
    ) -> Result<(), ListError> {
        let index = self.position_of(target).ok_or(ListError::EntityNotFound)?;
        self.applicants.replace(target, edited)?;
        self.notify(BookEvent::Replaced { index });
        Ok(())
    }

    pub fn remove_applicant(&mut self, applicant: &Applicant) -> Result<Applicant, ListError> {
        let index = self
            .position_of(applicant)
            .ok_or(ListError::EntityNotFound)?;
        let removed = self.applicants.remove(applicant)?;
        self.notify(BookEvent::Removed { index });
        Ok(removed)
    }

    pub fn sort_applicants(&mut self, field: SortField, direction: SortDirection) {
        self.applicants.sort_by(field, direction);
        self.notify(BookEvent::Sorted { field, direction });
    }

    pub fn reset(&mut self, applicants: Vec<Applicant>) -> Result<(), ListError> {
        self.applicants.set_all(applicants)?;
        self.notify(BookEvent::Reset {
            len: self.applicants.len(),
        });
        Ok(())
    }

    pub fn reset_from(&mut self, other: &AddressBook) {
        self.applicants.set_from(&other.applicants);
        self.notify(BookEvent::Reset {
            len: self.applicants.len(),
        });
    }

    /// Discards every applicant's stored photo, then empties the book.
    pub fn clear(&mut self) {
        self.applicants.release_all_external_resources();
        self.applicants = UniqueApplicantList::new();
        self.notify(BookEvent::Reset { len: 0 });
    }

    fn position_of(&self, applicant: &Applicant) -> Option<usize> {
        self.applicants.iter().position(|item| item == applicant)
    }

    fn notify(&self, event: BookEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for AddressBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressBook")
            .field("applicants", &self.applicants)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PartialEq for AddressBook {
    fn eq(&self, other: &Self) -> bool {
        self.applicants == other.applicants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{applicant, rated};
    use std::sync::{Arc, Mutex};

    fn recording_book() -> (AddressBook, Arc<Mutex<Vec<BookEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let mut book = AddressBook::new();
        book.subscribe(move |event| sink.lock().expect("events mutex").push(event.clone()));
        (book, events)
    }

    #[test]
    fn successful_mutations_are_broadcast() {
        let (mut book, events) = recording_book();
        let alice = applicant("Alice", "Engineer");
        book.add_applicant(alice.clone()).unwrap();
        book.add_applicant(applicant("Bob", "Designer")).unwrap();
        book.set_applicant(&alice, rated("Alice", "Engineer", 4))
            .unwrap();
        book.sort_applicants(SortField::Name, SortDirection::Descending);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                BookEvent::Added { index: 0 },
                BookEvent::Added { index: 1 },
                BookEvent::Replaced { index: 0 },
                BookEvent::Sorted {
                    field: SortField::Name,
                    direction: SortDirection::Descending
                },
            ]
        );
    }

    #[test]
    fn failed_mutations_stay_silent() {
        let (mut book, events) = recording_book();
        book.add_applicant(applicant("Alice", "Engineer")).unwrap();
        events.lock().unwrap().clear();

        assert_eq!(
            book.add_applicant(applicant("Alice", "Designer")),
            Err(ListError::DuplicateEntity)
        );
        assert_eq!(
            book.remove_applicant(&applicant("Nobody", "Engineer"))
                .unwrap_err(),
            ListError::EntityNotFound
        );
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn sorting_by_rating_keeps_unassigned_last() {
        let mut book = AddressBook::from_applicants(vec![
            rated("Cara", "Engineer", 3),
            applicant("Dan", "Engineer"),
            rated("Eve", "Engineer", 1),
        ])
        .unwrap();

        book.sort_applicants(SortField::Rating, SortDirection::Ascending);
        let names: Vec<&str> = book.applicants().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Eve", "Cara", "Dan"]);

        book.sort_applicants(SortField::Rating, SortDirection::Descending);
        let names: Vec<&str> = book.applicants().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Cara", "Eve", "Dan"]);
    }
}

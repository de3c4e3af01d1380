//! Applicant domain: validated field values, the identity-unique applicant list,
//! its ordering policy, and the address book that owns it.

pub mod address_book;
pub mod applicant;
pub mod predicate;
pub mod rating;
pub mod sort;
pub mod unique_list;

#[cfg(test)]
pub(crate) mod test_support;

pub use address_book::{AddressBook, BookEvent};
pub use applicant::{
    AddedTime, Address, Applicant, ApplicationStatus, Email, FieldError, JobPosition, Name,
    Phone, Tag, UniqueApplicantList,
};
pub use predicate::{ApplicantFilter, FieldPredicate, SearchField};
pub use rating::{InvalidRating, Rating, RATING_CONSTRAINTS};
pub use sort::{compare_case_aware, FieldOrdered, SortDirection, SortField};
pub use unique_list::{Entity, ListError, UniqueList};

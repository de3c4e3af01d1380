use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::rating::Rating;
use super::sort::{compare_case_aware, FieldOrdered, SortDirection, SortField};
use super::unique_list::{Entity, UniqueList};

pub type UniqueApplicantList = UniqueList<Applicant>;

/// A field value that failed validation, carrying the user-facing constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{constraint}")]
pub struct FieldError {
    pub field: &'static str,
    pub constraint: &'static str,
}

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident, $field:literal, $constraints:literal, $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const CONSTRAINTS: &'static str = $constraints;

            pub fn parse(raw: &str) -> Result<Self, FieldError> {
                let value = raw.trim();
                let valid: fn(&str) -> bool = $check;
                if valid(value) {
                    Ok(Self(value.to_string()))
                } else {
                    Err(FieldError {
                        field: $field,
                        constraint: Self::CONSTRAINTS,
                    })
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_field!(
    /// Applicant's full name; the identity field.
    Name,
    "name",
    "Names should only contain alphanumeric characters and spaces, and it should not be blank",
    is_alphanumeric_words
);

text_field!(
    Phone,
    "phone",
    "Phone numbers should only contain numbers, and it should be at least 3 digits long",
    |value| value.len() >= 3 && value.bytes().all(|b| b.is_ascii_digit())
);

text_field!(
    Email,
    "email",
    "Emails should be of the format local-part@domain. The local-part may contain alphanumerics and + _ . - but may not start or end with them; the domain is made of labels separated by periods, and the last label is at least 2 characters long",
    is_valid_email
);

text_field!(
    Address,
    "address",
    "Addresses can take any values, and it should not be blank",
    |value| !value.is_empty()
);

text_field!(
    JobPosition,
    "job position",
    "Job positions can take any values, and it should not be blank",
    |value| !value.is_empty()
);

text_field!(
    /// Free-form pipeline stage such as `Applied` or `Interview`.
    ApplicationStatus,
    "status",
    "Statuses should only contain alphanumeric characters and spaces, and it should not be blank",
    is_alphanumeric_words
);

text_field!(
    Tag,
    "tag",
    "Tag names should be alphanumeric",
    |value| !value.is_empty() && value.chars().all(char::is_alphanumeric)
);

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self("Applied".to_string())
    }
}

fn is_alphanumeric_words(value: &str) -> bool {
    value.chars().next().is_some_and(char::is_alphanumeric)
        && value.chars().all(|c| c.is_alphanumeric() || c == ' ')
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: [char; 4] = ['+', '_', '.', '-'];
    let (Some(first), Some(last)) = (local.chars().next(), local.chars().last()) else {
        return false;
    };
    first.is_alphanumeric()
        && last.is_alphanumeric()
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || SPECIALS.contains(&c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let label_ok = |label: &&str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    labels.iter().all(label_ok) && labels.last().is_some_and(|last| last.chars().count() >= 2)
}

/// When the applicant was entered into the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddedTime(NaiveDateTime);

impl AddedTime {
    const DISPLAY_FORMAT: &'static str = "%Y-%m-%d %H:%M";

    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    pub fn at(moment: NaiveDateTime) -> Self {
        Self(moment)
    }

    pub fn value(self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for AddedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::DISPLAY_FORMAT))
    }
}

/// A tracked job applicant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Applicant {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    pub job_position: JobPosition,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub added_time: AddedTime,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<PathBuf>,
}

impl Applicant {
    /// New applicant with default status, no rating, no tags and the default photo.
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        job_position: JobPosition,
        added_time: AddedTime,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            job_position,
            status: ApplicationStatus::default(),
            added_time,
            rating: Rating::UNASSIGNED,
            tags: BTreeSet::new(),
            profile_photo: None,
        }
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_profile_photo(mut self, path: Option<PathBuf>) -> Self {
        self.profile_photo = path;
        self
    }
}

impl Entity for Applicant {
    fn is_same_entity(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn release_external_resource(&self) {
        if let Some(path) = &self.profile_photo {
            crate::photo::discard(path);
        }
    }
}

impl FieldOrdered for Applicant {
    type Field = SortField;

    fn resolve_field(selector: &str) -> Option<SortField> {
        SortField::from_selector(selector)
    }

    fn compare_field(&self, other: &Self, field: SortField, direction: SortDirection) -> Ordering {
        let text = |left: &str, right: &str| direction.apply(compare_case_aware(left, right));
        match field {
            SortField::Name => text(self.name.as_str(), other.name.as_str()),
            SortField::Email => text(self.email.as_str(), other.email.as_str()),
            SortField::JobPosition => text(self.job_position.as_str(), other.job_position.as_str()),
            SortField::Status => text(self.status.as_str(), other.status.as_str()),
            SortField::AddedTime => direction.apply(self.added_time.cmp(&other.added_time)),
            SortField::Rating => self.rating.compare_directed(other.rating, direction),
        }
    }
}

impl fmt::Display for Applicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Job Position: {}; Status: {}; Rating: {}; Added: {}",
            self.name,
            self.phone,
            self.email,
            self.address,
            self.job_position,
            self.status,
            self.rating,
            self.added_time
        )?;
        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(Tag::as_str).collect();
            write!(f, "; Tags: [{}]", tags.join(", "))?;
        }
        Ok(())
    }
}

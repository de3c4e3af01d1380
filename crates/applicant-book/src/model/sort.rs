//! Ordering policy for the applicant list.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::unique_list::{Entity, UniqueList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Applicant fields the list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Email,
    AddedTime,
    JobPosition,
    Status,
    Rating,
}

impl SortField {
    pub const fn ordered() -> [SortField; 6] {
        [
            SortField::Name,
            SortField::Email,
            SortField::AddedTime,
            SortField::JobPosition,
            SortField::Status,
            SortField::Rating,
        ]
    }

    /// Command-line prefix selecting this field, e.g. `n/`.
    pub const fn prefix(self) -> &'static str {
        match self {
            SortField::Name => "n/",
            SortField::Email => "e/",
            SortField::AddedTime => "d/",
            SortField::JobPosition => "j/",
            SortField::Status => "s/",
            SortField::Rating => "r/",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Email => "Email Address",
            SortField::AddedTime => "Added Time",
            SortField::JobPosition => "Job Position",
            SortField::Status => "Application Status",
            SortField::Rating => "Rating",
        }
    }

    /// Resolves a prefix (`n/`) or a field name (`name`, `added_time`).
    pub fn from_selector(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        Self::ordered().into_iter().find(|field| {
            field.prefix() == selector
                || field.api_name().eq_ignore_ascii_case(selector)
        })
    }

    const fn api_name(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::AddedTime => "added_time",
            SortField::JobPosition => "job_position",
            SortField::Status => "status",
            SortField::Rating => "rating",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records that know how to compare themselves on a selectable key.
pub trait FieldOrdered: Entity {
    type Field: Copy;

    fn resolve_field(selector: &str) -> Option<Self::Field>;

    fn compare_field(&self, other: &Self, field: Self::Field, direction: SortDirection)
        -> Ordering;
}

impl<T: FieldOrdered> UniqueList<T> {
    pub fn sort_by(&mut self, field: T::Field, direction: SortDirection) {
        self.sort_with(|left, right| left.compare_field(right, field, direction));
    }

    /// Sorts by a textual selector. Unknown selectors leave the order untouched
    /// and return `false`.
    pub fn sort_by_selector(&mut self, selector: &str, direction: SortDirection) -> bool {
        match T::resolve_field(selector) {
            Some(field) => {
                self.sort_by(field, direction);
                true
            }
            None => false,
        }
    }
}

/// Lexicographic order in which each letter's lowercase form directly follows
/// its uppercase form: `A, a, B, b, ...`. A strict prefix sorts first.
pub fn compare_case_aware(left: &str, right: &str) -> Ordering {
    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            continue;
        }
        let (fold_l, fold_r) = (fold_case(l), fold_case(r));
        if fold_l == fold_r {
            return l.cmp(&r);
        }
        return fold_l.cmp(&fold_r);
    }
    left.chars().count().cmp(&right.chars().count())
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut words: Vec<&str>) -> Vec<&str> {
        words.sort_by(|a, b| compare_case_aware(a, b));
        words
    }

    #[test]
    fn uppercase_precedes_its_lowercase_partner() {
        assert_eq!(sorted(vec!["b", "B", "a", "A"]), vec!["A", "a", "B", "b"]);
    }

    #[test]
    fn first_differing_character_decides() {
        assert_eq!(
            sorted(vec!["bob", "alex", "Alice", "Bea"]),
            vec!["Alice", "alex", "Bea", "bob"]
        );
    }

    #[test]
    fn digits_precede_letters_and_prefixes_go_first() {
        assert_eq!(
            sorted(vec!["Zed", "9lives", "Ann", "An"]),
            vec!["9lives", "An", "Ann", "Zed"]
        );
    }

    #[test]
    fn selectors_accept_prefixes_and_names() {
        assert_eq!(SortField::from_selector("n/"), Some(SortField::Name));
        assert_eq!(SortField::from_selector("Added_Time"), Some(SortField::AddedTime));
        assert_eq!(SortField::from_selector("r/"), Some(SortField::Rating));
        assert_eq!(SortField::from_selector("x/"), None);
    }

    #[test]
    fn direction_tokens() {
        assert_eq!(SortDirection::from_token("DESC"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::from_token("asc"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::from_token("up"), None);
    }
}

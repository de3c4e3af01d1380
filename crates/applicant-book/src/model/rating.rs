use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sort::SortDirection;

pub const RATING_CONSTRAINTS: &str =
    "Ratings should be on a scale of 1 to 5, with 5 being the most promising. (-1 can be given for an Unassigned rating)";

const UNASSIGNED_VALUE: i8 = -1;

/// Applicant rating: 1 to 5, or unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Rating {
    value: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", RATING_CONSTRAINTS)]
pub struct InvalidRating;

impl Rating {
    pub const UNASSIGNED: Rating = Rating {
        value: UNASSIGNED_VALUE,
    };

    pub fn new(value: i8) -> Result<Self, InvalidRating> {
        match value {
            1..=5 | UNASSIGNED_VALUE => Ok(Self { value }),
            _ => Err(InvalidRating),
        }
    }

    pub fn is_assigned(self) -> bool {
        self.value != UNASSIGNED_VALUE
    }

    /// Star count, `None` when unassigned.
    pub fn stars(self) -> Option<u8> {
        u8::try_from(self.value).ok()
    }

    /// Orders two ratings for a sort in `direction`. Unassigned always goes last.
    pub fn compare_directed(self, other: Rating, direction: SortDirection) -> Ordering {
        match (self.is_assigned(), other.is_assigned()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (true, true) => direction.apply(self.value.cmp(&other.value)),
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl FromStr for Rating {
    type Err = InvalidRating;

    /// Accepts exactly `1`..`5` or `-1`; no signs, padding or leading zeros.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "-1" => Ok(Self::UNASSIGNED),
            digit if digit.len() == 1 => match digit.as_bytes()[0] {
                b @ b'1'..=b'5' => Self::new((b - b'0') as i8),
                _ => Err(InvalidRating),
            },
            _ => Err(InvalidRating),
        }
    }
}

impl TryFrom<i8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i8 {
    fn from(rating: Rating) -> Self {
        rating.value
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_assigned() {
            write!(f, "{} / 5", self.value)
        } else {
            f.write_str("Unassigned")
        }
    }
}

use std::collections::HashMap;
use std::fmt;

use super::ParseError;

/// Argument marker such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix("n/");
pub const PREFIX_PHONE: Prefix = Prefix("p/");
pub const PREFIX_EMAIL: Prefix = Prefix("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix("a/");
pub const PREFIX_JOB_POSITION: Prefix = Prefix("j/");
pub const PREFIX_STATUS: Prefix = Prefix("s/");
pub const PREFIX_RATING: Prefix = Prefix("r/");
pub const PREFIX_TAG: Prefix = Prefix("t/");

/// Values found for each prefix plus the text before the first prefix.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values
            .get(&prefix)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Fails when any of `prefixes` was given more than once.
    pub fn verify_no_duplicate_prefixes(&self, prefixes: &[Prefix]) -> Result<(), ParseError> {
        let repeated: Vec<&str> = prefixes
            .iter()
            .filter(|prefix| self.all_values(**prefix).len() > 1)
            .map(|prefix| prefix.as_str())
            .collect();
        if repeated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(repeated.join(" ")))
        }
    }
}

/// Splits `args` on the given prefixes. A prefix only counts when it follows
/// whitespace, so `a/12 Main St/3` keeps its inner slash.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let text = format!(" {args}");
    let mut marks: Vec<(usize, Prefix)> = Vec::new();

    for prefix in prefixes {
        let needle = prefix.as_str();
        let mut from = 0;
        while let Some(offset) = text[from..].find(needle) {
            let at = from + offset;
            if text[..at].ends_with(char::is_whitespace) {
                marks.push((at, *prefix));
            }
            from = at + needle.len();
        }
    }
    marks.sort_by_key(|(at, _)| *at);

    let preamble_end = marks.first().map_or(text.len(), |(at, _)| *at);
    let mut map = ArgumentMultimap {
        preamble: text[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (position, (at, prefix)) in marks.iter().enumerate() {
        let start = at + prefix.as_str().len();
        let end = marks.get(position + 1).map_or(text.len(), |(next, _)| *next);
        map.values
            .entry(*prefix)
            .or_default()
            .push(text[start..end].trim().to_string());
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_preamble_and_values() {
        let map = tokenize(
            " 2 n/Alex Yeoh a/Blk 30, #06-40 t/friend t/remote",
            &[PREFIX_NAME, PREFIX_ADDRESS, PREFIX_TAG],
        );
        assert_eq!(map.preamble(), "2");
        assert_eq!(map.value(PREFIX_NAME), Some("Alex Yeoh"));
        assert_eq!(map.value(PREFIX_ADDRESS), Some("Blk 30, #06-40"));
        assert_eq!(map.all_values(PREFIX_TAG), ["friend", "remote"]);
        assert!(!map.contains(PREFIX_PHONE));
    }

    #[test]
    fn prefix_inside_a_word_is_not_a_marker() {
        let map = tokenize("n/Ann a/12 Main St/n/3", &[PREFIX_NAME, PREFIX_ADDRESS]);
        assert_eq!(map.value(PREFIX_ADDRESS), Some("12 Main St/n/3"));
        assert_eq!(map.value(PREFIX_NAME), Some("Ann"));
    }

    #[test]
    fn repeated_single_valued_prefix_is_reported() {
        let map = tokenize("n/Ann n/Bob p/123", &[PREFIX_NAME, PREFIX_PHONE]);
        assert_eq!(map.value(PREFIX_NAME), Some("Bob"));
        let err = map
            .verify_no_duplicate_prefixes(&[PREFIX_NAME, PREFIX_PHONE])
            .unwrap_err();
        assert!(err.to_string().contains("n/"));
    }

    #[test]
    fn empty_value_is_kept() {
        let map = tokenize("1 t/", &[PREFIX_TAG]);
        assert_eq!(map.all_values(PREFIX_TAG), [""]);
    }
}

//! Turns one line of user input into a [`Command`].

mod arguments;
pub mod tokenizer;

use crate::model::{FieldError, InvalidRating};

use super::commands::{self, Command, Index};

pub use tokenizer::{tokenize, ArgumentMultimap, Prefix};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },
    #[error("Invalid sorting criteria: '{criteria}'\n{usage}")]
    InvalidCriteria {
        criteria: String,
        usage: &'static str,
    },
    #[error("Index is not a non-zero unsigned integer.")]
    InvalidIndex,
    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),
    #[error("At least one field to edit must be provided.")]
    NothingToEdit,
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Rating(#[from] InvalidRating),
}

/// Entry point of the text command syntax.
pub struct AddressBookParser;

impl AddressBookParser {
    pub fn parse(input: &str) -> Result<Command, ParseError> {
        let input = input.trim();
        let (word, args) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (input, ""),
        };

        match word {
            "add" => arguments::parse_add(args).map(Command::Add),
            "edit" => arguments::parse_edit(args).map(Command::Edit),
            "delete" => parse_index(args)
                .map_err(|_| ParseError::InvalidFormat {
                    usage: commands::DELETE_USAGE,
                })
                .map(Command::Delete),
            "list" => Ok(Command::List),
            "search" => arguments::parse_search(args).map(Command::Search),
            "summary" => arguments::parse_summary(args).map(Command::Summary),
            "sort" => arguments::parse_sort(args).map(Command::Sort),
            "photo" => arguments::parse_photo(args),
            "clear" => Ok(Command::Clear),
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            "" => Err(ParseError::InvalidFormat {
                usage: commands::HELP_USAGE,
            }),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

pub(crate) fn parse_index(raw: &str) -> Result<Index, ParseError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SortDirection, SortField};

    #[test]
    fn dispatches_simple_words() {
        assert_eq!(AddressBookParser::parse("help").unwrap(), Command::Help);
        assert_eq!(AddressBookParser::parse("  list ").unwrap(), Command::List);
        assert_eq!(AddressBookParser::parse("exit").unwrap(), Command::Exit);
        assert_eq!(AddressBookParser::parse("clear").unwrap(), Command::Clear);
    }

    #[test]
    fn unknown_word_is_reported() {
        assert_eq!(
            AddressBookParser::parse("frobnicate 3").unwrap_err(),
            ParseError::UnknownCommand("frobnicate".to_string())
        );
    }

    #[test]
    fn blank_input_is_invalid_format() {
        assert!(matches!(
            AddressBookParser::parse("   ").unwrap_err(),
            ParseError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn delete_requires_positive_index() {
        assert_eq!(
            AddressBookParser::parse("delete 2").unwrap(),
            Command::Delete(Index::from_one_based(2).unwrap())
        );
        for bad in ["delete", "delete 0", "delete -1", "delete two"] {
            assert!(matches!(
                AddressBookParser::parse(bad).unwrap_err(),
                ParseError::InvalidFormat { .. }
            ));
        }
    }

    #[test]
    fn sort_reaches_the_sort_parser() {
        match AddressBookParser::parse("sort r/ desc").unwrap() {
            Command::Sort(command) => {
                assert_eq!(command.field, SortField::Rating);
                assert_eq!(command.direction, SortDirection::Descending);
            }
            other => panic!("expected sort command, got {other:?}"),
        }
    }
}

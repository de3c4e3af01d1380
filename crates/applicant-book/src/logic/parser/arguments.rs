use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::model::{
    AddedTime, Address, Applicant, ApplicantFilter, ApplicationStatus, Email, FieldPredicate,
    JobPosition, Name, Phone, Rating, SearchField, SortDirection, SortField, Tag,
};

use super::super::commands::{
    self, AddCommand, Command, EditCommand, EditDescriptor, SortCommand, SummaryCommand,
};
use super::tokenizer::{
    tokenize, ArgumentMultimap, Prefix, PREFIX_ADDRESS, PREFIX_EMAIL, PREFIX_JOB_POSITION,
    PREFIX_NAME, PREFIX_PHONE, PREFIX_RATING, PREFIX_STATUS, PREFIX_TAG,
};
use super::{parse_index, ParseError};

const APPLICANT_PREFIXES: [Prefix; 8] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_JOB_POSITION,
    PREFIX_STATUS,
    PREFIX_RATING,
    PREFIX_TAG,
];

const SINGLE_VALUED: [Prefix; 7] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_JOB_POSITION,
    PREFIX_STATUS,
    PREFIX_RATING,
];

const SEARCH_PREFIXES: [(Prefix, SearchField); 7] = [
    (PREFIX_NAME, SearchField::Name),
    (PREFIX_PHONE, SearchField::Phone),
    (PREFIX_EMAIL, SearchField::Email),
    (PREFIX_ADDRESS, SearchField::Address),
    (PREFIX_JOB_POSITION, SearchField::JobPosition),
    (PREFIX_STATUS, SearchField::Status),
    (PREFIX_TAG, SearchField::Tag),
];

pub(super) fn parse_add(args: &str) -> Result<AddCommand, ParseError> {
    let map = tokenize(args, &APPLICANT_PREFIXES);
    let required = [
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_JOB_POSITION,
    ];
    if !map.preamble().is_empty() || !required.iter().all(|prefix| map.contains(*prefix)) {
        return Err(ParseError::InvalidFormat {
            usage: commands::ADD_USAGE,
        });
    }
    map.verify_no_duplicate_prefixes(&SINGLE_VALUED)?;

    let applicant = Applicant::new(
        Name::parse(value_of(&map, PREFIX_NAME))?,
        Phone::parse(value_of(&map, PREFIX_PHONE))?,
        Email::parse(value_of(&map, PREFIX_EMAIL))?,
        Address::parse(value_of(&map, PREFIX_ADDRESS))?,
        JobPosition::parse(value_of(&map, PREFIX_JOB_POSITION))?,
        AddedTime::now(),
    );
    let status = map
        .value(PREFIX_STATUS)
        .map(ApplicationStatus::parse)
        .transpose()?
        .unwrap_or_default();
    let rating = map
        .value(PREFIX_RATING)
        .map(str::parse::<Rating>)
        .transpose()?
        .unwrap_or_default();
    let tags = parse_tags(map.all_values(PREFIX_TAG))?;

    Ok(AddCommand::new(
        applicant
            .with_status(status)
            .with_rating(rating)
            .with_tags(tags),
    ))
}

pub(super) fn parse_edit(args: &str) -> Result<EditCommand, ParseError> {
    let map = tokenize(args, &APPLICANT_PREFIXES);
    let index = parse_index(map.preamble()).map_err(|_| ParseError::InvalidFormat {
        usage: commands::EDIT_USAGE,
    })?;
    map.verify_no_duplicate_prefixes(&SINGLE_VALUED)?;

    let descriptor = EditDescriptor {
        name: map.value(PREFIX_NAME).map(Name::parse).transpose()?,
        phone: map.value(PREFIX_PHONE).map(Phone::parse).transpose()?,
        email: map.value(PREFIX_EMAIL).map(Email::parse).transpose()?,
        address: map.value(PREFIX_ADDRESS).map(Address::parse).transpose()?,
        job_position: map
            .value(PREFIX_JOB_POSITION)
            .map(JobPosition::parse)
            .transpose()?,
        status: map
            .value(PREFIX_STATUS)
            .map(ApplicationStatus::parse)
            .transpose()?,
        rating: map
            .value(PREFIX_RATING)
            .map(str::parse::<Rating>)
            .transpose()?,
        tags: parse_tags_for_edit(map.all_values(PREFIX_TAG))?,
    };

    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NothingToEdit);
    }
    Ok(EditCommand { index, descriptor })
}

pub(super) fn parse_search(args: &str) -> Result<ApplicantFilter, ParseError> {
    let filter = parse_filter(args, commands::SEARCH_USAGE)?;
    if filter.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: commands::SEARCH_USAGE,
        });
    }
    Ok(filter)
}

pub(super) fn parse_summary(args: &str) -> Result<SummaryCommand, ParseError> {
    let filter = parse_filter(args, commands::SUMMARY_USAGE)?;
    Ok(SummaryCommand { filter })
}

/// `CRITERIA [asc|desc]`; only recognised criteria produce a command.
pub(super) fn parse_sort(args: &str) -> Result<SortCommand, ParseError> {
    let mut tokens = args.split_whitespace();
    let criteria = tokens.next().ok_or(ParseError::InvalidFormat {
        usage: commands::SORT_USAGE,
    })?;
    let field = SortField::from_selector(criteria).ok_or_else(|| ParseError::InvalidCriteria {
        criteria: criteria.to_string(),
        usage: commands::SORT_USAGE,
    })?;
    let direction = match tokens.next() {
        Some(token) => SortDirection::from_token(token).ok_or(ParseError::InvalidFormat {
            usage: commands::SORT_USAGE,
        })?,
        None => SortDirection::Ascending,
    };
    if tokens.next().is_some() {
        return Err(ParseError::InvalidFormat {
            usage: commands::SORT_USAGE,
        });
    }
    Ok(SortCommand::new(field, direction))
}

/// `INDEX PATH`, where the path may contain spaces.
pub(super) fn parse_photo(args: &str) -> Result<Command, ParseError> {
    let invalid = || ParseError::InvalidFormat {
        usage: commands::PHOTO_USAGE,
    };
    let (raw_index, raw_path) = args.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;
    let index = parse_index(raw_index).map_err(|_| invalid())?;
    let source = raw_path.trim();
    if source.is_empty() {
        return Err(invalid());
    }
    Ok(Command::Photo {
        index,
        source: PathBuf::from(source),
    })
}

fn parse_filter(args: &str, usage: &'static str) -> Result<ApplicantFilter, ParseError> {
    let prefixes: Vec<Prefix> = SEARCH_PREFIXES.iter().map(|(prefix, _)| *prefix).collect();
    let map = tokenize(args, &prefixes);
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }

    let mut predicates = Vec::new();
    for (prefix, field) in SEARCH_PREFIXES {
        for raw in map.all_values(prefix) {
            if raw.trim().is_empty() {
                return Err(ParseError::InvalidFormat { usage });
            }
            predicates.push(FieldPredicate::new(field, raw));
        }
    }
    Ok(ApplicantFilter::new(predicates))
}

fn value_of(map: &ArgumentMultimap, prefix: Prefix) -> &str {
    map.value(prefix).unwrap_or_default()
}

fn parse_tags(raw: &[String]) -> Result<BTreeSet<Tag>, ParseError> {
    raw.iter()
        .map(|value| Tag::parse(value).map_err(ParseError::from))
        .collect()
}

/// A lone empty `t/` clears every tag; no `t/` leaves tags untouched.
fn parse_tags_for_edit(raw: &[String]) -> Result<Option<BTreeSet<Tag>>, ParseError> {
    match raw {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        values => parse_tags(values).map(Some),
    }
}

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::model::{
    AddedTime, Address, AddressBook, Applicant, ApplicationStatus, Email, FieldError,
    InvalidRating, JobPosition, ListError, Name, Phone, Rating, Tag,
};

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    /// Names of rows skipped because an applicant with that name already exists.
    pub duplicates: Vec<String>,
}

#[derive(Debug)]
pub enum CsvImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// `row` is one-based and counts data rows only.
    Field { row: usize, source: FieldError },
    Rating { row: usize, source: InvalidRating },
}

impl std::fmt::Display for CsvImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvImportError::Io(err) => write!(f, "failed to read applicant CSV: {}", err),
            CsvImportError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
            CsvImportError::Field { row, source } => {
                write!(f, "row {}: invalid {}: {}", row, source.field, source)
            }
            CsvImportError::Rating { row, source } => write!(f, "row {}: {}", row, source),
        }
    }
}

impl std::error::Error for CsvImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvImportError::Io(err) => Some(err),
            CsvImportError::Csv(err) => Some(err),
            CsvImportError::Field { source, .. } => Some(source),
            CsvImportError::Rating { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for CsvImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CsvImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub fn import_csv_path<P: AsRef<Path>>(
    path: P,
    book: &mut AddressBook,
) -> Result<ImportReport, CsvImportError> {
    let file = std::fs::File::open(path)?;
    import_csv(file, book)
}

/// Adds every row of `reader` to `book`.
///
/// All rows are validated before the first one is added, so a malformed row
/// leaves the book untouched. Rows naming an applicant already in the book
/// (or earlier in the file) are skipped and listed in the report.
pub fn import_csv<R: Read>(
    reader: R,
    book: &mut AddressBook,
) -> Result<ImportReport, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut applicants = Vec::new();
    for (offset, record) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
        let row = record?;
        applicants.push(row.into_applicant(offset + 1)?);
    }

    let mut report = ImportReport::default();
    for applicant in applicants {
        let name = applicant.name.to_string();
        match book.add_applicant(applicant) {
            Ok(()) => report.added += 1,
            Err(ListError::DuplicateEntity) => {
                debug!(%name, "skipping duplicate applicant from CSV");
                report.duplicates.push(name);
            }
            Err(ListError::EntityNotFound) => {}
        }
    }

    info!(
        added = report.added,
        skipped = report.duplicates.len(),
        "applicant CSV imported"
    );
    Ok(report)
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    name: String,
    phone: String,
    email: String,
    address: String,
    job_position: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
}

impl ApplicantRow {
    fn into_applicant(self, row: usize) -> Result<Applicant, CsvImportError> {
        let field = |source: FieldError| CsvImportError::Field { row, source };

        let mut applicant = Applicant::new(
            Name::parse(&self.name).map_err(field)?,
            Phone::parse(&self.phone).map_err(field)?,
            Email::parse(&self.email).map_err(field)?,
            Address::parse(&self.address).map_err(field)?,
            JobPosition::parse(&self.job_position).map_err(field)?,
            AddedTime::now(),
        );

        if let Some(status) = self.status.as_deref() {
            applicant = applicant.with_status(ApplicationStatus::parse(status).map_err(field)?);
        }
        if let Some(rating) = self.rating.as_deref() {
            let rating = rating
                .parse::<Rating>()
                .map_err(|source| CsvImportError::Rating { row, source })?;
            applicant = applicant.with_rating(rating);
        }
        if let Some(tags) = self.tags.as_deref() {
            let tags = tags
                .split(';')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(Tag::parse)
                .collect::<Result<Vec<_>, _>>()
                .map_err(field)?;
            applicant = applicant.with_tags(tags);
        }

        Ok(applicant)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::applicant;
    use std::io::Cursor;

    const HEADER: &str = "name,phone,email,address,job_position,status,rating,tags\n";

    fn csv(rows: &str) -> Cursor<String> {
        Cursor::new(format!("{HEADER}{rows}"))
    }

    #[test]
    fn imports_rows_with_optional_columns() {
        let mut book = AddressBook::new();
        let report = import_csv(
            csv("Alex Yeoh,87438807,alexyeoh@example.com,Blk 30 Geylang Street 29,Engineer,Interview,4,friends; remote\n\
                 Bernice Yu,99272758,berniceyu@example.com,Blk 30 Lorong 3,Designer,,,\n"),
            &mut book,
        )
        .expect("import");

        assert_eq!(report.added, 2);
        assert!(report.duplicates.is_empty());

        let alex = &book.applicants()[0];
        assert_eq!(alex.status.as_str(), "Interview");
        assert_eq!(alex.rating, Rating::new(4).unwrap());
        assert_eq!(alex.tags.len(), 2);

        let bernice = &book.applicants()[1];
        assert_eq!(bernice.status, ApplicationStatus::default());
        assert!(!bernice.rating.is_assigned());
        assert!(bernice.tags.is_empty());
    }

    #[test]
    fn duplicate_names_are_skipped_and_reported() {
        let mut book = AddressBook::from_applicants(vec![applicant("Alex Yeoh", "Engineer")])
            .unwrap();
        let report = import_csv(
            csv("Alex Yeoh,87438807,alex@example.com,Somewhere,Chef,,,\n\
                 Roy Balakrishnan,92624417,royb@example.com,Blk 45,Analyst,,,\n\
                 Roy Balakrishnan,92624417,royb@example.com,Blk 45,Analyst,,,\n"),
            &mut book,
        )
        .unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, vec!["Alex Yeoh", "Roy Balakrishnan"]);
        assert_eq!(book.len(), 2);
        assert_eq!(book.applicants()[0].job_position.as_str(), "Engineer");
    }

    #[test]
    fn invalid_row_leaves_book_untouched() {
        let mut book = AddressBook::new();
        let err = import_csv(
            csv("Alex Yeoh,87438807,alex@example.com,Somewhere,Engineer,,,\n\
                 Bad Phone,12ab,bad@example.com,Somewhere,Engineer,,,\n"),
            &mut book,
        )
        .unwrap_err();

        match err {
            CsvImportError::Field { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source.field, "phone");
            }
            other => panic!("expected field error, got {other:?}"),
        }
        assert!(book.is_empty());
    }

    #[test]
    fn out_of_range_rating_is_reported_with_row() {
        let mut book = AddressBook::new();
        let err = import_csv(
            csv("Alex Yeoh,87438807,alex@example.com,Somewhere,Engineer,,7,\n"),
            &mut book,
        )
        .unwrap_err();

        assert!(matches!(err, CsvImportError::Rating { row: 1, .. }));
        assert!(err.to_string().starts_with("row 1:"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut book = AddressBook::new();
        let err = import_csv_path("/definitely/not/here.csv", &mut book).unwrap_err();
        assert!(matches!(err, CsvImportError::Io(_)));
    }
}

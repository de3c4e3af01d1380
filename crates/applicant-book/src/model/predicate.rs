use super::applicant::Applicant;

/// Applicant field a keyword filter can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Phone,
    Email,
    Address,
    JobPosition,
    Status,
    Tag,
}

impl SearchField {
    pub const fn label(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Phone => "phone",
            SearchField::Email => "email",
            SearchField::Address => "address",
            SearchField::JobPosition => "job position",
            SearchField::Status => "status",
            SearchField::Tag => "tag",
        }
    }
}

/// Matches when the field contains any of the keywords, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPredicate {
    pub field: SearchField,
    pub keywords: Vec<String>,
}

impl FieldPredicate {
    pub fn new(field: SearchField, raw: &str) -> Self {
        let keywords = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        Self { field, keywords }
    }

    pub fn matches(&self, applicant: &Applicant) -> bool {
        let haystacks: Vec<String> = match self.field {
            SearchField::Name => vec![applicant.name.as_str().to_lowercase()],
            SearchField::Phone => vec![applicant.phone.as_str().to_lowercase()],
            SearchField::Email => vec![applicant.email.as_str().to_lowercase()],
            SearchField::Address => vec![applicant.address.as_str().to_lowercase()],
            SearchField::JobPosition => vec![applicant.job_position.as_str().to_lowercase()],
            SearchField::Status => vec![applicant.status.as_str().to_lowercase()],
            SearchField::Tag => applicant
                .tags
                .iter()
                .map(|tag| tag.as_str().to_lowercase())
                .collect(),
        };

        self.keywords.iter().any(|keyword| {
            haystacks
                .iter()
                .any(|haystack| haystack.contains(keyword.as_str()))
        })
    }
}

/// Conjunction of field predicates. An empty filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFilter {
    predicates: Vec<FieldPredicate>,
}

impl ApplicantFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(predicates: Vec<FieldPredicate>) -> Self {
        Self { predicates }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[FieldPredicate] {
        &self.predicates
    }

    pub fn matches(&self, applicant: &Applicant) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(applicant))
    }
}

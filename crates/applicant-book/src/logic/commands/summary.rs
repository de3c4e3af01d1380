use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{Applicant, ApplicantFilter};

use super::{CommandResult, Session};

/// Aggregate view over the applicants matching a filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicantSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_job_position: BTreeMap<String, usize>,
    pub rated: usize,
    pub average_rating: Option<f32>,
}

impl ApplicantSummary {
    pub fn collect<'a>(applicants: impl IntoIterator<Item = &'a Applicant>) -> Self {
        let mut summary = Self::default();
        let mut star_total = 0u32;

        for applicant in applicants {
            summary.total += 1;
            *summary
                .by_status
                .entry(applicant.status.to_string())
                .or_default() += 1;
            *summary
                .by_job_position
                .entry(applicant.job_position.to_string())
                .or_default() += 1;
            if let Some(stars) = applicant.rating.stars() {
                summary.rated += 1;
                star_total += u32::from(stars);
            }
        }

        if summary.rated > 0 {
            summary.average_rating = Some(star_total as f32 / summary.rated as f32);
        }
        summary
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &BTreeMap<String, usize>) -> fmt::Result {
    let parts: Vec<String> = counts
        .iter()
        .map(|(label, count)| format!("{label}: {count}"))
        .collect();
    if parts.is_empty() {
        f.write_str("-")
    } else {
        f.write_str(&parts.join(", "))
    }
}

impl fmt::Display for ApplicantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary of {} applicant(s)", self.total)?;
        f.write_str("By status: ")?;
        write_counts(f, &self.by_status)?;
        f.write_str("\nBy job position: ")?;
        write_counts(f, &self.by_job_position)?;
        match self.average_rating {
            Some(average) => write!(
                f,
                "\nAverage rating: {average:.1} / 5 ({} rated)",
                self.rated
            ),
            None => f.write_str("\nAverage rating: Unassigned"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryCommand {
    pub filter: ApplicantFilter,
}

impl SummaryCommand {
    pub(super) fn execute(self, session: &mut Session) -> CommandResult {
        let matching = session
            .book()
            .applicants()
            .iter()
            .filter(|applicant| self.filter.matches(applicant));
        CommandResult::message(ApplicantSummary::collect(matching).to_string())
    }
}

use chrono::NaiveDate;

use super::applicant::{AddedTime, Address, Applicant, Email, JobPosition, Name, Phone};
use super::rating::Rating;

pub(crate) fn added_on(day: u32) -> AddedTime {
    let moment = NaiveDate::from_ymd_opt(2025, 3, day)
        .expect("valid date")
        .and_hms_opt(9, 30, 0)
        .expect("valid time");
    AddedTime::at(moment)
}

pub(crate) fn applicant(name: &str, job: &str) -> Applicant {
    let local = name.replace(' ', ".").to_lowercase();
    Applicant::new(
        Name::parse(name).expect("valid name"),
        Phone::parse("94351253").expect("valid phone"),
        Email::parse(&format!("{local}@example.com")).expect("valid email"),
        Address::parse("123, Jurong West Ave 6, #08-111").expect("valid address"),
        JobPosition::parse(job).expect("valid job"),
        added_on(1),
    )
}

pub(crate) fn rated(name: &str, job: &str, stars: i8) -> Applicant {
    applicant(name, job).with_rating(Rating::new(stars).expect("valid rating"))
}

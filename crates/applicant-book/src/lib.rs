//! Applicant tracking address book: an identity-unique applicant list with a
//! sortable ordering policy, a text command language, JSON persistence and an
//! HTTP surface.

pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod photo;
pub mod router;
pub mod storage;
pub mod telemetry;

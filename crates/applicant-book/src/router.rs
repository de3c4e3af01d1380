//! HTTP surface over [`Logic`]: list the displayed applicants and run text commands.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::logic::commands::SORT_USAGE;
use crate::logic::parser::ParseError;
use crate::logic::{Logic, LogicError};
use crate::model::{Applicant, SortDirection, UniqueApplicantList};
use crate::storage::AddressBookStorage;

pub type SharedLogic<S> = Arc<Mutex<Logic<S>>>;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Sort selector, either a prefix such as `n/` or a name such as `added_time`.
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// An applicant with its one-based position in the displayed list.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantView {
    pub index: usize,
    #[serde(flatten)]
    pub applicant: Applicant,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub feedback: String,
    pub changed: bool,
    pub applicants: Vec<ApplicantView>,
}

/// Router builder exposing the address book over HTTP.
pub fn applicant_router<S>(logic: SharedLogic<S>) -> Router
where
    S: AddressBookStorage + 'static,
{
    Router::new()
        .route("/api/v1/applicants", get(list_handler::<S>))
        .route("/api/v1/commands", post(command_handler::<S>))
        .with_state(logic)
}

/// Returns the displayed applicants. A `sort` query orders this response only;
/// the stored order changes through the `sort` command.
pub(crate) async fn list_handler<S>(
    State(logic): State<SharedLogic<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ApplicantView>>, AppError>
where
    S: AddressBookStorage + 'static,
{
    let displayed: Vec<Applicant> = {
        let guard = logic.lock().expect("logic mutex poisoned");
        guard.displayed().into_iter().cloned().collect()
    };

    let Some(selector) = query.sort.as_deref() else {
        return Ok(Json(views(displayed)));
    };

    let direction = match query.order.as_deref() {
        Some(token) => SortDirection::from_token(token).ok_or(ParseError::InvalidFormat {
            usage: SORT_USAGE,
        }),
        None => Ok(SortDirection::Ascending),
    }
    .map_err(LogicError::from)?;

    let mut view = UniqueApplicantList::from_vec(displayed)
        .map_err(|err| AppError::from(LogicError::Command(err.into())))?;
    if !view.sort_by_selector(selector, direction) {
        return Err(LogicError::from(ParseError::InvalidCriteria {
            criteria: selector.to_string(),
            usage: SORT_USAGE,
        })
        .into());
    }

    Ok(Json(views(view.iter().cloned().collect())))
}

pub(crate) async fn command_handler<S>(
    State(logic): State<SharedLogic<S>>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError>
where
    S: AddressBookStorage + 'static,
{
    let mut guard = logic.lock().expect("logic mutex poisoned");
    let result = guard.execute(&request.command)?;
    let applicants = views(guard.displayed().into_iter().cloned().collect());

    Ok(Json(CommandResponse {
        feedback: result.feedback,
        changed: result.changed,
        applicants,
    }))
}

fn views(applicants: Vec<Applicant>) -> Vec<ApplicantView> {
    applicants
        .into_iter()
        .enumerate()
        .map(|(position, applicant)| ApplicantView {
            index: position + 1,
            applicant,
        })
        .collect()
}

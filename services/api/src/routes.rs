use crate::infra::AppState;
use applicant_book::router::{applicant_router, SharedLogic};
use applicant_book::storage::AddressBookStorage;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

pub(crate) fn with_applicant_routes<S>(logic: SharedLogic<S>) -> axum::Router
where
    S: AddressBookStorage + 'static,
{
    applicant_router(logic)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use applicant_book::logic::Logic;
    use applicant_book::model::AddressBook;
    use applicant_book::photo::ProfilePhotoStore;
    use applicant_book::storage::InMemoryStorage;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let logic = Arc::new(Mutex::new(Logic::new(
            AddressBook::new(),
            ProfilePhotoStore::new("unused"),
            InMemoryStorage::default(),
        )));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_applicant_routes(logic).layer(Extension(state))
    }

    async fn status_of(ready: bool, path: &str) -> StatusCode {
        app(ready)
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        assert_eq!(status_of(false, "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        assert_eq!(
            status_of(false, "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(true, "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn applicant_routes_are_mounted() {
        assert_eq!(status_of(true, "/api/v1/applicants").await, StatusCode::OK);
        assert_eq!(status_of(true, "/metrics").await, StatusCode::OK);
    }
}

//! Response envelopes: server-driven pages and mutation results.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::{core_version, Outcome, RecordId, ResourceKind};

/// A view payload: which client component to render and its props.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub component: String,
    pub props: Value,
    pub version: &'static str,
}

impl Page {
    pub fn new(component: impl Into<String>, props: Value) -> Self {
        Self {
            component: component.into(),
            props,
            version: core_version(),
        }
    }

    /// Page for one of the resource views (`Index`, `Form`, `Show`).
    pub fn resource(kind: ResourceKind, view: &str, props: Value) -> Self {
        let folder = match kind {
            ResourceKind::Brand => "Brands",
            ResourceKind::Product => "Products",
        };
        Self::new(format!("{folder}/{view}"), props)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Result of a store/update/destroy request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
    pub record_id: Option<String>,
    /// Where the client should navigate next.
    pub redirect_to: String,
}

/// Navigation targets for a mutation.
#[derive(Debug, Clone)]
pub struct Redirects {
    /// After success or when the record is gone.
    pub index: String,
    /// After a failure, so the user can retry.
    pub back: String,
}

impl Redirects {
    pub fn new(kind: ResourceKind, back: impl Into<String>) -> Self {
        Self {
            index: collection_path(kind),
            back: back.into(),
        }
    }
}

pub fn collection_path(kind: ResourceKind) -> String {
    format!("/{}", kind.collection())
}

pub fn record_path(kind: ResourceKind, id: RecordId) -> String {
    format!("/{}/{id}", kind.collection())
}

/// Converts a lifecycle outcome into an HTTP response.
///
/// Success uses `success_status`; not-found is 404; generic failures are 500
/// and point back to the form.
pub fn outcome_response<T>(
    outcome: Outcome<T>,
    success_status: StatusCode,
    redirects: Redirects,
    record_id: impl FnOnce(&T) -> Option<RecordId>,
) -> Response {
    let (status, body) = match outcome {
        Outcome::Success { message, value } => (
            success_status,
            ActionResponse {
                ok: true,
                message,
                record_id: record_id(&value).map(|id| id.to_string()),
                redirect_to: redirects.index,
            },
        ),
        Outcome::NotFound { message, id } => (
            StatusCode::NOT_FOUND,
            ActionResponse {
                ok: false,
                message,
                record_id: Some(id.to_string()),
                redirect_to: redirects.index,
            },
        ),
        Outcome::Failure { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ActionResponse {
                ok: false,
                message,
                record_id: None,
                redirect_to: redirects.back,
            },
        ),
    };

    (status, Json(body)).into_response()
}

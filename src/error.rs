use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::{error, warn};

/// Failure signal of the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A table constraint rejected the write.
    #[error("constraint violation: {0}")]
    Conflict(#[source] sqlx::Error),
    #[error(transparent)]
    Other(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let is_conflict = match &e {
            sqlx::Error::Database(db) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        };
        if is_conflict {
            StoreError::Conflict(e)
        } else {
            StoreError::Other(e)
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("401 Unauthorized")]
    Unauthorized,
    #[error("422 Unprocessable Entity")]
    Unprocessable,
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Request rejected before reaching the handler; `status` is the one the
    /// extractor chose (400, 413, 415, ...).
    #[error("{reason}")]
    MalformedRequest { status: StatusCode, reason: String },
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Maps a store failure at the handler boundary. `context` names the
    /// operation and entity so unexpected failures are traceable in the logs.
    pub fn from_store(err: StoreError, context: impl Into<String>) -> Self {
        let context = context.into();
        match err {
            StoreError::Conflict(e) => {
                warn!(error = %e, %context, "store rejected write");
                ApiError::Unprocessable
            }
            StoreError::Other(e) => ApiError::Internal(anyhow::Error::new(e).context(context)),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MalformedRequest { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %format_args!("{e:#}"), "unexpected failure");
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `Json` whose rejection is reported as a malformed request in the
/// `{"error": ...}` shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let status = rejection.status();
                let reason = rejection.body_text();
                warn!(%status, %reason, "malformed request body");
                Err(ApiError::MalformedRequest { status, reason })
            }
        }
    }
}

/// `Path` counterpart of [`ApiJson`]: unparseable path segments answer in the
/// JSON error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => {
                let status = rejection.status();
                let reason = rejection.body_text();
                warn!(%status, %reason, "malformed path parameter");
                Err(ApiError::MalformedRequest { status, reason })
            }
        }
    }
}

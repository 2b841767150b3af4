use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Failure modes of a store adapter. Adapters never leak a raw `DbErr`
/// past their boundary; callers decide how to degrade.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sea_orm::DbErr),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::Unavailable(err)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            StoreError::Unavailable(db) => AppError::Internal(anyhow::Error::new(db)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, crate::templates::error_page("Invalid request", msg))
            },
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, crate::templates::not_found_page(what))
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    crate::templates::error_page("Something went wrong", &err.to_string()),
                )
            },
        };
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

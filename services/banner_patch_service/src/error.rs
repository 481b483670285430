use axum::response::{IntoResponse, Response};
use derive_new::new;
use http::StatusCode;
use strum::{EnumDiscriminants, IntoDiscriminant as _};
use theme_asset_client::AssetClientError;

use crate::{response::body::error_response, session::SessionStoreError};

#[derive(Debug, thiserror::Error, new)]
#[error(transparent)]
pub struct Error(pub(crate) ErrorInner);

impl Error {
    pub fn kind(&self) -> ErrorKind {
        self.0.discriminant()
    }

    pub fn custom(inner: impl Into<eyre::Report>) -> Self {
        Self(ErrorInner::Custom(inner.into()))
    }

    pub fn authentication() -> Self {
        Self(ErrorInner::Authentication)
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self(ErrorInner::new_validation(reason.into()))
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self(ErrorInner::new_resolution(message.into(), None))
    }

    pub fn resolution_with_source(
        message: impl Into<String>,
        source: AssetClientError,
    ) -> Self {
        Self(ErrorInner::new_resolution(message.into(), Some(source)))
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Resolution
            | ErrorKind::AssetClient
            | ErrorKind::Template
            | ErrorKind::SessionStore
            | ErrorKind::Custom => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match &self.0 {
            ErrorInner::Authentication => "Not authenticated".to_string(),
            ErrorInner::Validation { .. } => "Invalid form data".to_string(),
            ErrorInner::Resolution { message, .. } => message.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl<T: Into<ErrorInner>> From<T> for Error {
    fn from(inner: T) -> Self {
        let inner = inner.into();

        Self(inner)
    }
}

#[derive(Debug, thiserror::Error, EnumDiscriminants, new)]
#[strum_discriminants(vis(pub), name(ErrorKind))]
pub(crate) enum ErrorInner {
    #[error("not authenticated")]
    Authentication,

    #[error("invalid form data: {reason}")]
    Validation { reason: String },

    #[error("{message}")]
    Resolution {
        message: String,
        #[source]
        source: Option<AssetClientError>,
    },

    #[error(transparent)]
    AssetClient(#[from] AssetClientError),

    #[error(transparent)]
    Template(#[from] tera::Error),

    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),

    #[error(transparent)]
    Custom(#[from] eyre::Report),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        error_response(status, self.public_message())
    }
}

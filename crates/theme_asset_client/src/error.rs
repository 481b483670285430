use derive_new::new;
use http::StatusCode;
use strum::{EnumDiscriminants, IntoDiscriminant as _};

#[derive(Debug, thiserror::Error, new)]
#[error(transparent)]
pub struct AssetClientError(AssetClientErrorInner);

impl AssetClientError {
    pub fn custom<T: Into<eyre::Report>>(inner: T) -> Self {
        let inner = inner.into();
        Self(AssetClientErrorInner::Custom(inner))
    }

    pub fn unexpected_status(status: StatusCode, path: impl Into<String>) -> Self {
        Self(AssetClientErrorInner::new_unexpected_status(status, path.into()))
    }
}

impl AssetClientError {
    pub fn kind(&self) -> AssetClientErrorKind {
        self.0.discriminant()
    }
}

impl<T: Into<AssetClientErrorInner>> From<T> for AssetClientError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self(inner)
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error, new)]
#[strum_discriminants(vis(pub), name(AssetClientErrorKind))]
enum AssetClientErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("request to '{path}' failed: status code {status}")]
    UnexpectedStatus { status: StatusCode, path: String },
}

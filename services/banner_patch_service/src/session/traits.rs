use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use theme_asset_client::ShopAccess;

/// Credentials attached to a merchant session. Either field may be missing.
#[derive(Clone, PartialEq, Eq, Default, new)]
pub struct Session {
    pub shop: Option<String>,
    pub access_token: Option<String>,
}

impl Session {
    /// Both credentials, or `None` when either is absent or empty.
    pub fn shop_access(&self) -> Option<ShopAccess> {
        let shop = self.shop.as_deref().filter(|s| !s.is_empty())?;
        let token = self.access_token.as_deref().filter(|t| !t.is_empty())?;

        Some(ShopAccess::new(shop, token))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("shop", &self.shop)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<Session>, SessionStoreError>;
}

pub type DynSessionStore = Arc<dyn SessionStore>;

#[derive(Debug, thiserror::Error)]
#[error("session store error: {0}")]
pub struct SessionStoreError(SessionStoreErrorInner);

impl SessionStoreError {
    pub fn custom(inner: impl Into<eyre::Report>) -> Self {
        Self(SessionStoreErrorInner::Custom(inner.into()))
    }
}

impl<T: Into<SessionStoreErrorInner>> From<T> for SessionStoreError {
    fn from(inner: T) -> Self {
        Self(inner.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),
}

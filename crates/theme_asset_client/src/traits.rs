use std::sync::Arc;

use async_trait::async_trait;

use crate::{Asset, AssetClientError, ShopAccess, Theme};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AssetClient: Send + Sync + 'static {
    async fn list_themes(
        &self,
        shop: &ShopAccess,
    ) -> Result<Vec<Theme>, AssetClientError>;

    /// Returns `None` when the theme has no asset under `key`.
    async fn get_asset(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
        key: &str,
    ) -> Result<Option<Asset>, AssetClientError>;

    /// Creates the asset or replaces its value.
    async fn put_asset(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
        asset: &Asset,
    ) -> Result<(), AssetClientError>;
}

pub type DynAssetClient = Arc<dyn AssetClient>;

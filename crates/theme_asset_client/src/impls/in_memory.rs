use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;

use crate::{Asset, AssetClient, AssetClientError, ShopAccess, Theme};

/// A remote call observed by [`InMemoryAssetClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListThemes {
        shop: String,
    },
    GetAsset {
        shop: String,
        theme_id: u64,
        key: String,
    },
    PutAsset {
        shop: String,
        theme_id: u64,
        key: String,
        value: String,
    },
}

impl RecordedCall {
    pub fn is_write(&self) -> bool {
        matches!(self, RecordedCall::PutAsset { .. })
    }
}

#[derive(Debug, Default)]
struct ShopData {
    themes: Vec<Theme>,
    assets: HashMap<(u64, String), String>,
}

#[derive(Debug, Default)]
struct InMemoryData {
    shops: HashMap<String, ShopData>,
    calls: Vec<RecordedCall>,
}

/// Keeps themes and assets in process memory. Unknown shops have no themes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetClient {
    data: Arc<Mutex<InMemoryData>>,
}

impl InMemoryAssetClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_theme(&self, shop: &str, theme: Theme) {
        let mut data = self.data.lock();
        let shop = data.shops.entry(shop.to_string()).or_default();

        shop.themes.retain(|t| t.id != theme.id);
        shop.themes.push(theme);
    }

    pub fn insert_asset(&self, shop: &str, theme_id: u64, asset: Asset) {
        let mut data = self.data.lock();

        data.shops
            .entry(shop.to_string())
            .or_default()
            .assets
            .insert((theme_id, asset.key), asset.value);
    }

    pub fn asset_value(
        &self,
        shop: &str,
        theme_id: u64,
        key: &str,
    ) -> Option<String> {
        let data = self.data.lock();

        data.shops
            .get(shop)
            .and_then(|s| s.assets.get(&(theme_id, key.to_string())))
            .cloned()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.data.lock().calls.clone()
    }

    pub fn writes(&self) -> Vec<RecordedCall> {
        self.data
            .lock()
            .calls
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.data.lock().calls.clear();
    }
}

#[async_trait]
impl AssetClient for InMemoryAssetClient {
    async fn list_themes(
        &self,
        shop: &ShopAccess,
    ) -> Result<Vec<Theme>, AssetClientError> {
        let mut data = self.data.lock();

        data.calls.push(RecordedCall::ListThemes {
            shop: shop.shop.clone(),
        });

        Ok(data
            .shops
            .get(&shop.shop)
            .map(|s| s.themes.clone())
            .unwrap_or_default())
    }

    async fn get_asset(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
        key: &str,
    ) -> Result<Option<Asset>, AssetClientError> {
        let mut data = self.data.lock();

        data.calls.push(RecordedCall::GetAsset {
            shop: shop.shop.clone(),
            theme_id,
            key: key.to_string(),
        });

        Ok(data
            .shops
            .get(&shop.shop)
            .and_then(|s| s.assets.get(&(theme_id, key.to_string())))
            .map(|value| Asset::new(key, value.clone())))
    }

    async fn put_asset(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
        asset: &Asset,
    ) -> Result<(), AssetClientError> {
        let mut data = self.data.lock();

        data.calls.push(RecordedCall::PutAsset {
            shop: shop.shop.clone(),
            theme_id,
            key: asset.key.clone(),
            value: asset.value.clone(),
        });

        let shop_data = data.shops.get_mut(&shop.shop);

        match shop_data {
            Some(s) if s.themes.iter().any(|t| t.id == theme_id) => {
                s.assets
                    .insert((theme_id, asset.key.clone()), asset.value.clone());
                Ok(())
            }
            _ => Err(AssetClientError::unexpected_status(
                StatusCode::NOT_FOUND,
                format!("themes/{theme_id}/assets"),
            )),
        }
    }
}

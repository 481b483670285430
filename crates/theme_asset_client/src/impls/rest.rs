use std::time::Duration;

use async_trait::async_trait;
use derive_new::new;
use http::StatusCode;
use reqwest::{Client, redirect::Policy};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Asset, AssetClient, AssetClientError, ShopAccess, Theme};

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Where the Admin REST API of a shop lives.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RestEndpoint {
    #[new(into)]
    pub api_version: String,
    /// Replaces `https://{shop}` when set, e.g. for a proxy.
    #[new(default)]
    pub base_url: Option<String>,
}

impl Default for RestEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

impl RestEndpoint {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn url(&self, shop: &ShopAccess, path: &str) -> String {
        let origin = match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_string(),
            None => format!("https://{}", shop.shop),
        };

        format!(
            "{origin}/admin/api/{version}/{path}.json",
            version = self.api_version,
        )
    }
}

#[derive(Debug, Clone, new)]
pub struct RestAssetClient {
    client: Client,
    endpoint: RestEndpoint,
}

impl RestAssetClient {
    pub fn from_endpoint(
        endpoint: RestEndpoint,
    ) -> Result<Self, AssetClientError> {
        let client = Client::builder()
            .redirect(Policy::default())
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::new(client, endpoint))
    }

    /// `GET {path}`; a 404 yields `None`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        shop: &ShopAccess,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, AssetClientError> {
        let url = self.endpoint.url(shop, path);

        let response = self
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, &shop.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            Ok(Some(response.json::<T>().await?))
        } else {
            match status {
                StatusCode::NOT_FOUND => Ok(None),
                _ => Err(AssetClientError::unexpected_status(status, path)),
            }
        }
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        shop: &ShopAccess,
        path: &str,
        body: &B,
    ) -> Result<(), AssetClientError> {
        let url = self.endpoint.url(shop, path);

        let response = self
            .client
            .put(url)
            .header(ACCESS_TOKEN_HEADER, &shop.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(AssetClientError::unexpected_status(status, path))
        }
    }
}

#[derive(Deserialize)]
struct ThemesEnvelope {
    themes: Vec<Theme>,
}

#[derive(Deserialize)]
struct AssetEnvelope {
    asset: AssetPayload,
}

// Binary assets come back with `attachment` instead of `value`.
#[derive(Deserialize)]
struct AssetPayload {
    key: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Serialize)]
struct PutAssetEnvelope<'a> {
    asset: &'a Asset,
}

fn assets_path(theme_id: u64) -> String {
    format!("themes/{theme_id}/assets")
}

#[async_trait]
impl AssetClient for RestAssetClient {
    #[tracing::instrument(skip(self))]
    async fn list_themes(
        &self,
        shop: &ShopAccess,
    ) -> Result<Vec<Theme>, AssetClientError> {
        let envelope = self
            .get::<ThemesEnvelope>(shop, "themes", &[])
            .await?
            .ok_or_else(|| {
                AssetClientError::unexpected_status(
                    StatusCode::NOT_FOUND,
                    "themes",
                )
            })?;

        Ok(envelope.themes)
    }

    #[tracing::instrument(skip(self))]
    async fn get_asset(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
        key: &str,
    ) -> Result<Option<Asset>, AssetClientError> {
        let envelope = self
            .get::<AssetEnvelope>(
                shop,
                &assets_path(theme_id),
                &[("asset[key]", key)],
            )
            .await?;

        let Some(AssetEnvelope { asset }) = envelope else {
            return Ok(None);
        };

        match asset.value {
            Some(value) => Ok(Some(Asset::new(asset.key, value))),
            None => Err(AssetClientError::custom(eyre::eyre!(
                "asset '{}' has no text value",
                asset.key
            ))),
        }
    }

    #[tracing::instrument(skip(self, asset), fields(key = %asset.key))]
    async fn put_asset(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
        asset: &Asset,
    ) -> Result<(), AssetClientError> {
        self.put(shop, &assets_path(theme_id), &PutAssetEnvelope { asset })
            .await
    }
}

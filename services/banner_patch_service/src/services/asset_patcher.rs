use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use serde::Serialize;
use strum::Display;
use theme_asset_client::ShopAccess;

use crate::error::Error;

pub const DEFAULT_BUTTON_TEXT: &str = "Learn more";

/// The values rendered into the banner snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerContent {
    pub headline_text: String,
    pub image_url: String,
    pub button_url: String,
    pub button_text: String,
}

impl BannerContent {
    /// A missing or empty `button_text` falls back to [`DEFAULT_BUTTON_TEXT`].
    pub fn new(
        headline_text: impl Into<String>,
        image_url: impl Into<String>,
        button_url: impl Into<String>,
        button_text: Option<String>,
    ) -> Self {
        Self {
            headline_text: headline_text.into(),
            image_url: image_url.into(),
            button_url: button_url.into(),
            button_text: button_text
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()),
        }
    }
}

/// What happened to the section asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SectionPatch {
    #[strum(serialize = "already-present")]
    AlreadyPresent,
    #[strum(serialize = "injected")]
    Injected,
    /// Rewritten unchanged, no opening section tag was found.
    #[strum(serialize = "anchor-not-found")]
    AnchorNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct PatchOutcome {
    pub theme_id: u64,
    pub section: SectionPatch,
}

#[async_trait]
pub trait AssetPatcher: Send + Sync + 'static {
    /// Writes the banner snippet to the live theme and makes sure the target
    /// section renders it.
    async fn patch(
        &self,
        shop: &ShopAccess,
        banner: &BannerContent,
    ) -> Result<PatchOutcome, Error>;
}

pub type DynAssetPatcher = Arc<dyn AssetPatcher>;

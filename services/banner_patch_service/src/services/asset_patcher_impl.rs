use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use theme_asset_client::{Asset, DynAssetClient, ShopAccess, Theme};

use crate::{
    config::PatchConfiguration,
    error::Error,
    services::{
        AssetPatcher, BannerContent, PatchOutcome, SectionPatch,
        injection::{Injection, inject_render_tag},
        snippet::render_snippet,
    },
};

#[derive(new)]
pub struct DefaultAssetPatcher {
    client: DynAssetClient,
    settings: Arc<PatchConfiguration>,
}

impl DefaultAssetPatcher {
    /// The first theme with the `main` role.
    async fn resolve_live_theme(
        &self,
        shop: &ShopAccess,
    ) -> Result<Theme, Error> {
        let themes = self.client.list_themes(shop).await?;

        themes
            .into_iter()
            .find(|t| t.role.is_main())
            .ok_or_else(|| Error::resolution("No published theme found"))
    }

    async fn read_section(
        &self,
        shop: &ShopAccess,
        theme_id: u64,
    ) -> Result<Asset, Error> {
        let key = &self.settings.section_key;
        let message = format!("Could not read section asset '{key}'");

        self.client
            .get_asset(shop, theme_id, key)
            .await
            .map_err(|e| Error::resolution_with_source(message.clone(), e))?
            .ok_or_else(|| Error::resolution(message))
    }
}

#[async_trait]
impl AssetPatcher for DefaultAssetPatcher {
    #[tracing::instrument(skip(self, banner))]
    async fn patch(
        &self,
        shop: &ShopAccess,
        banner: &BannerContent,
    ) -> Result<PatchOutcome, Error> {
        let theme = self.resolve_live_theme(shop).await?;

        tracing::debug!(theme_id = theme.id, name = ?theme.name, "resolved live theme");

        let snippet =
            Asset::new(self.settings.snippet_key.clone(), render_snippet(banner)?);

        self.client.put_asset(shop, theme.id, &snippet).await?;

        tracing::debug!(key = %snippet.key, "wrote snippet");

        let section = self.read_section(shop, theme.id).await?;
        let render_tag = self.settings.render_tag();

        let patch = match inject_render_tag(&section.value, &render_tag) {
            Injection::AlreadyPresent => SectionPatch::AlreadyPresent,
            Injection::Injected(value) => {
                self.client
                    .put_asset(shop, theme.id, &Asset::new(section.key, value))
                    .await?;

                SectionPatch::Injected
            }
            Injection::AnchorNotFound => {
                tracing::warn!(
                    key = %section.key,
                    "no opening section tag found, writing section back unchanged"
                );

                self.client.put_asset(shop, theme.id, &section).await?;

                SectionPatch::AnchorNotFound
            }
        };

        Ok(PatchOutcome::new(theme.id, patch))
    }
}

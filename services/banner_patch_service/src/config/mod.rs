use std::{collections::HashMap, path::Path};

use garde::Validate;
use serde::{Deserialize, Serialize};
use theme_asset_client::{Asset, InMemoryAssetClient, Theme, ThemeRole};

use crate::session::Session;

pub const DEFAULT_SNIPPET_KEY: &str = "snippets/customizer-banner.liquid";
pub const DEFAULT_SECTION_KEY: &str = "sections/main-collection.liquid";

#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Validate,
)]
pub struct Configuration {
    /// Sessions known to the in-memory session store, keyed by session id.
    #[serde(default)]
    #[garde(skip)]
    pub sessions: HashMap<String, SessionConfiguration>,

    #[serde(default)]
    #[garde(dive)]
    pub patch: PatchConfiguration,

    /// Seed data for the in-memory backend.
    #[serde(default)]
    #[garde(skip)]
    pub in_memory: InMemoryBackendConfiguration,
}

impl Configuration {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, eyre::Report> {
        let config = std::fs::read_to_string(path)?;

        Self::from_inline(config)
    }

    pub fn from_inline(config: impl AsRef<str>) -> Result<Self, eyre::Report> {
        let config: Configuration = serde_json::from_str(config.as_ref())?;

        config.validate()?;

        Ok(config)
    }
}

impl Configuration {
    pub fn to_sessions(&self) -> HashMap<String, Session> {
        self.sessions
            .iter()
            .map(|(id, s)| {
                (
                    id.clone(),
                    Session::new(s.shop.clone(), s.access_token.clone()),
                )
            })
            .collect()
    }

    pub fn to_in_memory_asset_client(&self) -> InMemoryAssetClient {
        let client = InMemoryAssetClient::new();

        for (shop, shop_config) in &self.in_memory.shops {
            for theme in &shop_config.themes {
                client.insert_theme(
                    shop,
                    Theme {
                        id: theme.id,
                        role: theme.role,
                        name: theme.name.clone(),
                    },
                );

                for (key, value) in &theme.assets {
                    client.insert_asset(
                        shop,
                        theme.id,
                        Asset::new(key.clone(), value.clone()),
                    );
                }
            }
        }

        client
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SessionConfiguration {
    #[serde(default)]
    pub shop: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,
}

/// Which theme assets the banner is written to.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Validate)]
pub struct PatchConfiguration {
    #[serde(default = "default_snippet_key")]
    #[garde(pattern(r"^snippets/[^/]+\.liquid$"))]
    pub snippet_key: String,

    #[serde(default = "default_section_key")]
    #[garde(pattern(r"^sections/[^/]+\.liquid$"))]
    pub section_key: String,
}

fn default_snippet_key() -> String {
    DEFAULT_SNIPPET_KEY.to_string()
}

fn default_section_key() -> String {
    DEFAULT_SECTION_KEY.to_string()
}

impl Default for PatchConfiguration {
    fn default() -> Self {
        Self {
            snippet_key: default_snippet_key(),
            section_key: default_section_key(),
        }
    }
}

impl PatchConfiguration {
    /// The Liquid tag rendering the snippet, e.g.
    /// `{% render 'customizer-banner' %}`.
    pub fn render_tag(&self) -> String {
        let name = self
            .snippet_key
            .strip_prefix("snippets/")
            .unwrap_or(&self.snippet_key);
        let name = name.strip_suffix(".liquid").unwrap_or(name);

        format!("{{% render '{name}' %}}")
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct InMemoryBackendConfiguration {
    #[serde(default)]
    pub shops: HashMap<String, InMemoryShopConfiguration>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct InMemoryShopConfiguration {
    #[serde(default)]
    pub themes: Vec<InMemoryThemeConfiguration>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct InMemoryThemeConfiguration {
    pub id: u64,
    pub role: ThemeRole,

    #[serde(default)]
    pub name: Option<String>,

    /// Asset key to text value.
    #[serde(default)]
    pub assets: HashMap<String, String>,
}

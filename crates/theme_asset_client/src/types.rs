use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIs};

/// Credentials addressing a single storefront.
#[derive(Clone, PartialEq, Eq, Hash, new)]
pub struct ShopAccess {
    #[new(into)]
    pub shop: String,
    #[new(into)]
    pub access_token: String,
}

impl std::fmt::Debug for ShopAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopAccess")
            .field("shop", &self.shop)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new,
)]
pub struct Theme {
    pub id: u64,
    pub role: ThemeRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[new(default)]
    pub name: Option<String>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIs,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeRole {
    /// The theme currently rendering the storefront.
    #[strum(serialize = "main")]
    Main,
    #[strum(serialize = "unpublished")]
    Unpublished,
    #[strum(serialize = "demo")]
    Demo,
    #[strum(serialize = "development")]
    Development,
    #[serde(other)]
    #[strum(serialize = "other")]
    Other,
}

/// A named text resource belonging to a theme.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new,
)]
pub struct Asset {
    #[new(into)]
    pub key: String,
    #[new(into)]
    pub value: String,
}

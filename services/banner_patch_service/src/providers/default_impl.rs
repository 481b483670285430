use std::sync::Arc;

use derive_new::new;
use theme_asset_client::DynAssetClient;

use crate::{
    config::PatchConfiguration,
    providers::DependencyProvider,
    services::{DefaultAssetPatcher, DynAssetPatcher},
    session::DynSessionStore,
};

#[derive(Clone, new)]
pub struct DefaultDependencyProvider {
    session_store: DynSessionStore,
    asset_client: DynAssetClient,
    patch: Arc<PatchConfiguration>,
}

impl DependencyProvider for DefaultDependencyProvider {
    fn session_store(&self) -> DynSessionStore {
        self.session_store.clone()
    }

    fn asset_patcher(&self) -> DynAssetPatcher {
        Arc::new(DefaultAssetPatcher::new(
            self.asset_client.clone(),
            self.patch.clone(),
        ))
    }
}

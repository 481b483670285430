use std::sync::Arc;

use derive_new::new;
use theme_asset_client::{DynAssetClient, RestAssetClient};

use crate::{
    args::{BackendType, ConfigType, ServeArgs},
    config::Configuration,
    providers::{DefaultDependencyProvider, DependencyProvider},
    session::InMemorySessionStore,
};

#[derive(new, Clone)]
pub struct ServiceState {
    pub args: Arc<ServeArgs>,
    pub provider: Arc<dyn DependencyProvider>,
}

impl ServiceState {
    pub fn from_args(args: &ServeArgs) -> eyre::Result<Self> {
        let config = load_configuration(args)?;

        let asset_client: DynAssetClient = match args.backend {
            BackendType::Shopify => Arc::new(RestAssetClient::from_endpoint(
                args.shopify.to_endpoint(),
            )?),
            BackendType::InMemory => {
                Arc::new(config.to_in_memory_asset_client())
            }
        };

        let session_store =
            Arc::new(InMemorySessionStore::new(Arc::new(config.to_sessions())));

        let provider = DefaultDependencyProvider::new(
            session_store,
            asset_client,
            Arc::new(config.patch.clone()),
        );

        Ok(Self::new(
            Arc::new(args.clone()),
            Arc::new(provider),
        ))
    }
}

fn load_configuration(args: &ServeArgs) -> eyre::Result<Configuration> {
    let Some(config) = &args.config else {
        return Ok(Configuration::default());
    };

    match args.config_type.unwrap_or(ConfigType::File) {
        ConfigType::File => Configuration::from_file(config),
        ConfigType::Inline => Configuration::from_inline(config),
    }
}

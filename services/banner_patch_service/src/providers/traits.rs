use crate::{services::DynAssetPatcher, session::DynSessionStore};

pub trait DependencyProvider: Send + Sync + 'static {
    fn session_store(&self) -> DynSessionStore;
    fn asset_patcher(&self) -> DynAssetPatcher;
}

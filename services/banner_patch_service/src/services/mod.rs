mod asset_patcher;
mod asset_patcher_impl;
pub mod injection;
pub mod snippet;

pub use asset_patcher::*;
pub use asset_patcher_impl::*;

mod error;
pub mod impls;
mod traits;
mod types;

pub use error::*;
pub use impls::{InMemoryAssetClient, RecordedCall, RestAssetClient, RestEndpoint};
pub use traits::*;
pub use types::*;

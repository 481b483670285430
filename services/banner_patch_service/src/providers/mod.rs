mod default_impl;
mod traits;

pub use default_impl::*;
pub use traits::*;

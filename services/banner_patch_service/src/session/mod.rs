mod in_memory;
mod traits;

pub use in_memory::*;
pub use traits::*;

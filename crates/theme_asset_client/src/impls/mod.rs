mod in_memory;
mod rest;

pub use in_memory::*;
pub use rest::*;

pub mod api;
pub mod root;

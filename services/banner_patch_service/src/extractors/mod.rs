mod authenticated_shop;
mod form_fields;

pub use authenticated_shop::*;
pub use form_fields::*;

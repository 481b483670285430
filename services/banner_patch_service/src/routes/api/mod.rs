mod open_api;
mod snippet;

pub use open_api::*;
pub use snippet::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::{
    response::body::{ErrorBody, SuccessBody},
    state::ServiceState,
};

pub fn build_router(enable_openapi: bool) -> Router<ServiceState> {
    let router = Router::new().typed_post(post_snippet);

    if enable_openapi {
        router.typed_get(get_open_api_doc)
    } else {
        router
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "banner_patch_service",
        description = "Writes a banner snippet into the live storefront theme",
    ),
    paths(post_snippet),
    components(schemas(SnippetForm, SuccessBody, ErrorBody))
)]
pub struct ApiDoc;

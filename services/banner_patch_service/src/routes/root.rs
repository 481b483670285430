use axum::{Router, routing::get};
use derive_new::new;

use crate::{routes::api, state::ServiceState};

#[derive(clap::Args, Clone, Debug, PartialEq, Eq, new)]
pub struct RouterConfig {
    #[arg(
        long = "routes.api-prefix",
        default_value = "/api",
        env = "BANNER_PATCH_SERVICE_ROUTES_API_PREFIX",
        help = "Path prefix of the API routes"
    )]
    pub api_prefix: String,

    #[arg(
        long = "routes.enable-openapi",
        env = "BANNER_PATCH_SERVICE_ROUTES_ENABLE_OPENAPI",
        help = "Serve the OpenAPI document at {api-prefix}/openapi.json"
    )]
    pub enable_openapi: bool,
}

impl RouterConfig {
    /// `api_prefix` with a leading slash and no trailing slash; empty for the
    /// root.
    pub fn normalized_api_prefix(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');

        if prefix.is_empty() {
            String::new()
        } else {
            format!("/{prefix}")
        }
    }
}

pub fn build_router(config: &RouterConfig) -> Router<ServiceState> {
    let router = Router::new().route("/", get(index));
    let api = api::build_router(config.enable_openapi);
    let prefix = config.normalized_api_prefix();

    if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&prefix, api)
    }
}

async fn index() -> &'static str {
    "banner_patch_service is running"
}

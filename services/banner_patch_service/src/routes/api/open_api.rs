use axum::{Json, extract::State};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::{OpenApi as _, openapi::OpenApi};

use crate::{routes::api::ApiDoc, state::ServiceState};

#[derive(TypedPath, Deserialize)]
#[typed_path("/openapi.json")]
pub struct GetOpenApiDocPath;

#[tracing::instrument(skip_all)]
pub async fn get_open_api_doc(
    _: GetOpenApiDocPath,
    State(state): State<ServiceState>,
) -> Json<OpenApi> {
    let prefix = state.args.routes.normalized_api_prefix();
    let mut openapi = ApiDoc::openapi();

    openapi.paths.paths = std::mem::take(&mut openapi.paths.paths)
        .into_iter()
        .map(|(k, v)| (format!("{prefix}{k}"), v))
        .collect();

    Json(openapi)
}

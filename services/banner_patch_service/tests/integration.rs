use std::{collections::HashMap, sync::Arc};

use axum_test::{
    TestRequest, TestResponse, TestServer,
    multipart::{MultipartForm, Part},
};
use banner_patch_service::{
    args::{BackendType, ConfigType, ServeArgs, ShopifyArgs},
    config::PatchConfiguration,
    init_tracing::TraceLevel,
    providers::DefaultDependencyProvider,
    response::body::{ErrorBody, SuccessBody},
    routes::root::{RouterConfig, build_router},
    session::{InMemorySessionStore, Session},
    state::ServiceState,
};
use http::StatusCode;
use theme_asset_client::{
    Asset, InMemoryAssetClient, RecordedCall, Theme, ThemeRole,
};

const DEFAULT_SHOP: &str = "test-shop.myshopify.com";
const DEFAULT_TOKEN: &str = "shpat_test";
const DEFAULT_SESSION: &str = "session-1";
const DEFAULT_THEME_ID: u64 = 42;
const SNIPPET_KEY: &str = "snippets/customizer-banner.liquid";
const SECTION_KEY: &str = "sections/main-collection.liquid";
const RENDER_TAG: &str = "{% render 'customizer-banner' %}";
const DEFAULT_SECTION: &str =
    "<section class=\"collection\">\n  {{ products }}\n</section>";

fn serve_args(config: Option<String>, backend: BackendType) -> ServeArgs {
    ServeArgs::new(
        // the test server doesn't listen
        "".to_string(),
        config,
        Some(ConfigType::Inline),
        backend,
        ShopifyArgs::new("2024-10".to_string(), None),
        "__session".to_string(),
        RouterConfig::new("/api".to_string(), true),
        TraceLevel::None,
        None,
    )
}

fn default_sessions() -> HashMap<String, Session> {
    HashMap::from([
        (
            DEFAULT_SESSION.to_string(),
            Session::new(
                Some(DEFAULT_SHOP.to_string()),
                Some(DEFAULT_TOKEN.to_string()),
            ),
        ),
        (
            "no-token".to_string(),
            Session::new(Some(DEFAULT_SHOP.to_string()), None),
        ),
        (
            "no-shop".to_string(),
            Session::new(None, Some(DEFAULT_TOKEN.to_string())),
        ),
    ])
}

fn default_client(section: Option<&str>) -> InMemoryAssetClient {
    let client = InMemoryAssetClient::new();
    client.insert_theme(DEFAULT_SHOP, Theme::new(7, ThemeRole::Unpublished));
    client.insert_theme(
        DEFAULT_SHOP,
        Theme::new(DEFAULT_THEME_ID, ThemeRole::Main),
    );

    if let Some(section) = section {
        client.insert_asset(
            DEFAULT_SHOP,
            DEFAULT_THEME_ID,
            Asset::new(SECTION_KEY, section),
        );
    }

    client
}

fn create_server(client: &InMemoryAssetClient) -> TestServer {
    let args = serve_args(None, BackendType::InMemory);

    let provider = DefaultDependencyProvider::new(
        Arc::new(InMemorySessionStore::new(Arc::new(default_sessions()))),
        Arc::new(client.clone()),
        Arc::new(PatchConfiguration::default()),
    );

    let state = ServiceState::new(
        Arc::new(args.clone()),
        Arc::new(provider),
    );

    let router = build_router(&args.routes).with_state(state);

    TestServer::new(router).expect("should be able to create test server")
}

fn default_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("headlineText", "Sale"),
        ("imageUrl", "https://x/img.png"),
        ("buttonUrl", "https://x/shop"),
    ]
}

async fn post_snippet(
    server: &TestServer,
    session: Option<&str>,
    form: &[(&str, &str)],
) -> TestResponse {
    let request = server.post("/api/snippet");

    let request = match session {
        Some(session) => {
            request.add_header("Cookie", format!("__session={session}"))
        }
        None => request,
    };

    request.form(&form).await
}

fn written(client: &InMemoryAssetClient) -> Vec<(u64, String, String)> {
    client
        .writes()
        .into_iter()
        .filter_map(|c| match c {
            RecordedCall::PutAsset {
                theme_id,
                key,
                value,
                ..
            } => Some((theme_id, key, value)),
            _ => None,
        })
        .collect()
}

fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status);
    assert_eq!(response.json::<ErrorBody>(), ErrorBody::new(message));
}

#[tokio::test]
async fn test_index() {
    let server = create_server(&default_client(None));

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_patch_snippet_and_section() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let response =
        post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<SuccessBody>(), SuccessBody::new(true));

    let writes = written(&client);
    assert_eq!(writes.len(), 2);

    let (theme_id, key, value) = &writes[0];
    assert_eq!(*theme_id, DEFAULT_THEME_ID);
    assert_eq!(key, SNIPPET_KEY);
    assert!(value.contains("<h1>Sale</h1>"));
    assert!(value.contains("<img src=\"https://x/img.png\""));
    assert!(value.contains("<a href=\"https://x/shop\" class=\"btn\">Learn more</a>"));

    let (_, key, value) = &writes[1];
    assert_eq!(key, SECTION_KEY);
    assert_eq!(
        value,
        &format!(
            "<section class=\"collection\">\n  {RENDER_TAG}\n  {{{{ products }}}}\n</section>"
        )
    );
}

#[tokio::test]
async fn test_custom_button_text() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let mut form = default_form();
    form.push(("buttonText", "Shop now"));

    let response = post_snippet(&server, Some(DEFAULT_SESSION), &form).await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let snippet = client
        .asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SNIPPET_KEY)
        .expect("snippet should exist");
    assert!(snippet.contains(">Shop now</a>"));
    assert!(!snippet.contains("Learn more"));
}

#[tokio::test]
async fn test_repeated_request_skips_section_write() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;
    let patched = client.asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SECTION_KEY);
    client.clear_calls();

    let response =
        post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let keys = written(&client)
        .into_iter()
        .map(|(_, key, _)| key)
        .collect::<Vec<_>>();
    assert_eq!(keys, vec![SNIPPET_KEY]);
    assert_eq!(
        client.asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SECTION_KEY),
        patched
    );
}

#[tokio::test]
async fn test_section_with_tag_is_not_rewritten() {
    let section = format!("<section>\n  {RENDER_TAG}\n</section>");
    let client = default_client(Some(&section));
    let server = create_server(&client);

    let response =
        post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(written(&client).len(), 1);
    assert_eq!(written(&client)[0].1, SNIPPET_KEY);
}

#[tokio::test]
async fn test_missing_cookie_is_unauthenticated() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let response = post_snippet(&server, None, &default_form()).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authenticated");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_incomplete_sessions_are_unauthenticated() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    for session in ["no-token", "no-shop", "unknown-session"] {
        let response =
            post_snippet(&server, Some(session), &default_form()).await;

        assert_error(&response, StatusCode::UNAUTHORIZED, "Not authenticated");
    }

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_authentication_is_checked_before_form() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let response = post_snippet(&server, None, &[]).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authenticated");
}

#[tokio::test]
async fn test_missing_fields_are_invalid() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    for missing in ["headlineText", "imageUrl", "buttonUrl"] {
        let form = default_form()
            .into_iter()
            .filter(|(k, _)| *k != missing)
            .collect::<Vec<_>>();

        let response =
            post_snippet(&server, Some(DEFAULT_SESSION), &form).await;

        assert_error(&response, StatusCode::BAD_REQUEST, "Invalid form data");
    }

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_non_form_body_is_invalid() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let response = server
        .post("/api/snippet")
        .add_header("Cookie", format!("__session={DEFAULT_SESSION}"))
        .json(&serde_json::json!({ "headlineText": "Sale" }))
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "Invalid form data");
    assert!(client.calls().is_empty());
}

fn authenticated_multipart(
    server: &TestServer,
    form: MultipartForm,
) -> TestRequest {
    server
        .post("/api/snippet")
        .add_header("Cookie", format!("__session={DEFAULT_SESSION}"))
        .multipart(form)
}

#[tokio::test]
async fn test_multipart_form_is_accepted() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let form = default_form()
        .into_iter()
        .fold(MultipartForm::new(), |form, (k, v)| form.add_text(k, v));

    let response = authenticated_multipart(&server, form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<SuccessBody>(), SuccessBody::new(true));

    let snippet = client
        .asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SNIPPET_KEY)
        .expect("snippet should exist");
    assert!(snippet.contains("<h1>Sale</h1>"));
}

#[tokio::test]
async fn test_file_field_is_invalid() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let form = MultipartForm::new()
        .add_part(
            "headlineText",
            Part::bytes(b"not text".as_slice())
                .file_name("headline.txt")
                .mime_type("text/plain"),
        )
        .add_text("imageUrl", "https://x/img.png")
        .add_text("buttonUrl", "https://x/shop");

    let response = authenticated_multipart(&server, form).await;

    assert_error(&response, StatusCode::BAD_REQUEST, "Invalid form data");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_field_uses_first_value() {
    let client = default_client(Some(DEFAULT_SECTION));
    let server = create_server(&client);

    let mut form = default_form();
    form.push(("headlineText", "Other"));

    let response = post_snippet(&server, Some(DEFAULT_SESSION), &form).await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let snippet = client
        .asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SNIPPET_KEY)
        .expect("snippet should exist");
    assert!(snippet.contains("<h1>Sale</h1>"));
    assert!(!snippet.contains("Other"));
}

#[tokio::test]
async fn test_no_published_theme() {
    let client = InMemoryAssetClient::new();
    client.insert_theme(DEFAULT_SHOP, Theme::new(7, ThemeRole::Unpublished));
    let server = create_server(&client);

    let response =
        post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;

    assert_error(
        &response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "No published theme found",
    );
    assert_eq!(
        client.calls(),
        vec![RecordedCall::ListThemes {
            shop: DEFAULT_SHOP.to_string()
        }]
    );
}

#[tokio::test]
async fn test_missing_section_leaves_snippet_behind() {
    let client = default_client(None);
    let server = create_server(&client);

    let response =
        post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        client
            .asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SNIPPET_KEY)
            .is_some()
    );
    assert!(
        client
            .asset_value(DEFAULT_SHOP, DEFAULT_THEME_ID, SECTION_KEY)
            .is_none()
    );
}

#[tokio::test]
async fn test_open_api_document() {
    let server = create_server(&default_client(None));

    let response = server.get("/api/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let doc = response.json::<serde_json::Value>();
    assert!(doc["paths"]["/api/snippet"]["post"].is_object());
}

#[tokio::test]
async fn test_state_from_inline_config() {
    let config = serde_json::json!({
        "sessions": {
            DEFAULT_SESSION: {
                "shop": DEFAULT_SHOP,
                "access_token": DEFAULT_TOKEN,
            }
        },
        "in_memory": {
            "shops": {
                DEFAULT_SHOP: {
                    "themes": [
                        {
                            "id": DEFAULT_THEME_ID,
                            "role": "main",
                            "assets": { SECTION_KEY: DEFAULT_SECTION },
                        }
                    ]
                }
            }
        }
    });

    let args = serve_args(Some(config.to_string()), BackendType::InMemory);
    let state =
        ServiceState::from_args(&args).expect("must be able to build state");
    let server = TestServer::new(build_router(&args.routes).with_state(state))
        .expect("should be able to create test server");

    let response =
        post_snippet(&server, Some(DEFAULT_SESSION), &default_form()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<SuccessBody>(), SuccessBody::ok());
}

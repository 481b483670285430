use std::path::PathBuf;

use derive_new::new;
use strum::Display;
use theme_asset_client::RestEndpoint;

use crate::{init_tracing::TraceLevel, routes::root::RouterConfig};

#[derive(clap::Parser)]
#[command(version, about = "Patches a banner snippet into the live storefront theme")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: CliSubcommands,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum CliSubcommands {
    /// Start the HTTP server
    Serve(ServeCommand),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeCommand {
    #[command(flatten)]
    pub args: ServeArgs,
}

#[derive(clap::Args, Clone, Debug, new)]
pub struct ServeArgs {
    #[arg(
        long,
        short,
        default_value = "0.0.0.0:3000",
        env = "BANNER_PATCH_SERVICE_LISTEN",
        help = "The address to listen on"
    )]
    pub listen: String,

    #[arg(
        long,
        short,
        env = "BANNER_PATCH_SERVICE_CONFIG",
        help = "Path to a JSON configuration file, or the JSON itself when --config-type is inline"
    )]
    pub config: Option<String>,

    #[arg(
        long,
        value_enum,
        env = "BANNER_PATCH_SERVICE_CONFIG_TYPE",
        help = "How to interpret --config"
    )]
    pub config_type: Option<ConfigType>,

    #[arg(
        long,
        short,
        default_value = "shopify",
        value_enum,
        env = "BANNER_PATCH_SERVICE_BACKEND",
        help = "The backend theme assets are read from and written to"
    )]
    pub backend: BackendType,

    #[command(flatten)]
    pub shopify: ShopifyArgs,

    #[arg(
        long,
        default_value = "__session",
        env = "BANNER_PATCH_SERVICE_SESSION_COOKIE",
        help = "Name of the cookie carrying the session id"
    )]
    pub session_cookie: String,

    #[command(flatten)]
    pub routes: RouterConfig,

    #[arg(
        long,
        default_value = "info",
        value_enum,
        env = "BANNER_PATCH_SERVICE_TRACE_LEVEL",
        help = "Trace level of the stdout output"
    )]
    pub trace_level: TraceLevel,

    #[arg(
        long,
        env = "BANNER_PATCH_SERVICE_TRACE_FILE",
        help = "Write JSON traces to this file"
    )]
    pub trace_file: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Debug, PartialEq, Eq, new)]
pub struct ShopifyArgs {
    #[arg(
        long = "shopify.api-version",
        default_value = theme_asset_client::impls::DEFAULT_API_VERSION,
        env = "BANNER_PATCH_SERVICE_SHOPIFY_API_VERSION",
        help = "Admin REST API version"
    )]
    pub api_version: String,

    #[arg(
        long = "shopify.base-url",
        env = "BANNER_PATCH_SERVICE_SHOPIFY_BASE_URL",
        help = "Send Admin API requests here instead of https://{shop}"
    )]
    pub base_url: Option<String>,
}

impl ShopifyArgs {
    pub fn to_endpoint(&self) -> RestEndpoint {
        let endpoint = RestEndpoint::new(self.api_version.clone());

        match &self.base_url {
            Some(base_url) => endpoint.with_base_url(base_url.clone()),
            None => endpoint,
        }
    }
}

#[derive(
    clap::ValueEnum,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
)]
pub enum BackendType {
    #[strum(serialize = "shopify")]
    Shopify,
    #[strum(serialize = "in-memory")]
    InMemory,
}

#[derive(
    clap::ValueEnum,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
)]
pub enum ConfigType {
    #[strum(serialize = "file")]
    File,
    #[strum(serialize = "inline")]
    Inline,
}

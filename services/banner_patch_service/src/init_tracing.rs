use std::{fs, fs::File, path::PathBuf, sync::Arc};

use derive_new::new;
use eyre::OptionExt as _;
use strum::{Display, EnumIs};
use tracing_core::LevelFilter;
use tracing_subscriber::{
    Layer as _, Registry, filter::Targets, layer::SubscriberExt as _,
};

use crate::args::ServeArgs;

#[derive(
    clap::ValueEnum,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumIs,
)]
pub enum TraceLevel {
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "error")]
    Error,
    #[strum(serialize = "warn")]
    Warn,
    #[strum(serialize = "info")]
    #[default]
    Info,
    #[strum(serialize = "debug")]
    Debug,
    #[strum(serialize = "trace")]
    Trace,
}

impl From<TraceLevel> for LevelFilter {
    fn from(value: TraceLevel) -> Self {
        match value {
            TraceLevel::None => LevelFilter::OFF,
            TraceLevel::Error => LevelFilter::ERROR,
            TraceLevel::Warn => LevelFilter::WARN,
            TraceLevel::Info => LevelFilter::INFO,
            TraceLevel::Debug => LevelFilter::DEBUG,
            TraceLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default, new)]
pub struct TracingConfig {
    pub stdout_trace_level: TraceLevel,
    pub file_trace_level: TraceLevel,
    pub file_path: Option<PathBuf>,
    pub stderr_trace_enabled: bool,
}

impl TracingConfig {
    pub fn from_args(args: &ServeArgs) -> Self {
        let file_trace_level = if args.trace_file.is_some() {
            TraceLevel::Debug
        } else {
            TraceLevel::None
        };

        Self::new(
            args.trace_level,
            file_trace_level,
            args.trace_file.clone(),
            true,
        )
    }
}

fn main_filters() -> Targets {
    Targets::new()
        .with_target("hyper", LevelFilter::WARN)
        .with_target("hyper_util", LevelFilter::WARN)
        .with_target("reqwest", LevelFilter::WARN)
        .with_target("rustls", LevelFilter::OFF)
}

pub fn init_tracing(config: &TracingConfig) -> eyre::Result<()> {
    let mut layers = Vec::new();

    if !config.stdout_trace_level.is_none() {
        let filter: LevelFilter = config.stdout_trace_level.into();
        let stdout_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .without_time()
            .with_writer(std::io::stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_file(false)
            .with_target(false)
            .with_line_number(false)
            .with_filter(main_filters().with_default(filter))
            .boxed();

        layers.push(stdout_layer);
    }

    if config.stderr_trace_enabled {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_ansi(atty::is(atty::Stream::Stderr))
            .with_writer(std::io::stderr)
            .with_filter(main_filters().with_default(LevelFilter::ERROR))
            .boxed();

        layers.push(stderr_layer);
    }

    if !config.file_trace_level.is_none() {
        let file_path = config
            .file_path
            .as_ref()
            .ok_or_eyre("File path for file trace not set")?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let filter: LevelFilter = config.file_trace_level.into();

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(Arc::new(File::create(file_path)?))
            .with_filter(main_filters().with_default(filter))
            .boxed();

        layers.push(file_layer);
    }

    let subscriber = Registry::default().with(layers);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

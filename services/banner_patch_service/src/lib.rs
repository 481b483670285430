pub mod args;
pub mod config;
pub mod error;
pub mod extractors;
pub mod init_tracing;
pub mod providers;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use tokio::net::TcpListener;

use crate::{args::ServeArgs, state::ServiceState};

pub async fn serve(args: &ServeArgs) -> eyre::Result<()> {
    let state = ServiceState::from_args(args)?;
    let router = routes::root::build_router(&args.routes).with_state(state);

    let socket = TcpListener::bind(&args.listen).await?;

    tracing::info!(
        listen = %args.listen,
        backend = %args.backend,
        api_prefix = %args.routes.normalized_api_prefix(),
        "serving"
    );

    axum::serve(socket, router).await?;

    Ok(())
}

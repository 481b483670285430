use banner_patch_service::{
    args::{Cli, CliSubcommands},
    init_tracing::{TracingConfig, init_tracing},
    serve,
};
use clap::Parser;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    match cli.subcommand {
        CliSubcommands::Serve(command) => {
            init_tracing(&TracingConfig::from_args(&command.args))?;

            serve(&command.args).await
        }
    }
}

use crate::demo::{run_ask, run_catalog, run_demo, AskArgs, CatalogArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use stack_advisor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Stack Advisor",
    about = "Recommend a technology stack by asking a handful of adaptive questions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Answer the advisor's questions interactively in the terminal
    Ask(AskArgs),
    /// List the stacks in the loaded catalog
    Catalog(CatalogArgs),
    /// Walk the questions the way a chosen stack would answer them
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Decision tree (.json) or catalog export (.csv) to load instead of the built-in stacks
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ask(args) => run_ask(args),
        Command::Catalog(args) => run_catalog(args),
        Command::Demo(args) => run_demo(args),
    }
}

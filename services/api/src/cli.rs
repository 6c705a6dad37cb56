use crate::demo::{run_demo, DemoArgs};
use crate::server;
use crate::sweep::{run_sweep, SweepArgs};
use clap::{Args, Parser, Subcommand};
use placement_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Ops",
    about = "Run the placement records admin service and its maintenance jobs",
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
    /// Reconcile upload folders against a reference manifest
    Sweep(SweepArgs),
    /// Run a scripted bulk-freeze demo against an in-memory roster
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Sweep(args) => run_sweep(args),
        Command::Demo(args) => run_demo(args),
    }
}

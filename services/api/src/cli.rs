use crate::demo::{run_card, run_demo, CardArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use clubhouse::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Clubhouse",
    about = "Run the golf scoring and leaderboard service or score a card from the command line",
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
    /// Play a seeded tournament through the engine and print the results
    Demo(DemoArgs),
    /// Score a CSV scorecard offline under a chosen format
    Card(CardArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Card(args) => run_card(args),
    }
}

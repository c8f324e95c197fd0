use crate::demo::{run_demo, run_evaluate, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use launch_outcomes::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Launch Outcomes",
    about = "Score website scans into tiers, badges, and next steps",
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
    /// Work with a single set of category scores
    Outcome {
        #[command(subcommand)]
        command: OutcomeCommand,
    },
    /// Walk sample sites through scanning, outcomes, sharing, and the leaderboard
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum OutcomeCommand {
    /// Classify scores and print the outcome panel
    Evaluate(EvaluateArgs),
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
        Command::Outcome {
            command: OutcomeCommand::Evaluate(args),
        } => run_evaluate(args),
        Command::Demo(args) => run_demo(args).await,
    }
}

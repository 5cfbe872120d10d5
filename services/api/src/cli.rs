use crate::demo::{run_demo, run_scoring_report, DemoArgs, ScoringReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use terrain_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Land Acquisition Scout",
    about = "Score land acquisition opportunities and watch benchmark drift from the command line",
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
    /// Score a weekly signal export and print the portfolio report
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Run an end-to-end CLI demo over a synthetic portfolio
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Generate a portfolio report from a collaborator signal CSV
    Report(ScoringReportArgs),
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
        Command::Score {
            command: ScoreCommand::Report(args),
        } => run_scoring_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::demo::{run_demo, run_match_report, DemoArgs, MatchReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crew_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Crew Match",
    about = "Rank crew candidates against vessel assignments from the command line or over HTTP",
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
    /// Rank a roster CSV against a requirement JSON document
    Match(MatchReportArgs),
    /// Run an end-to-end demo over a synthetic crew pool
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
        Command::Match(args) => run_match_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

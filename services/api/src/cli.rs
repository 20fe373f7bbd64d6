use crate::demo::{run_demo, run_survey_report, DemoArgs, SurveyReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sondar::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Sondar",
    about = "Run the Sondar psychosocial survey analytics service from the command line",
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
    /// Score an answer export and print the resulting reports
    Survey {
        #[command(subcommand)]
        command: SurveyCommand,
    },
    /// Run an end-to-end CLI demo over a synthetic cohort
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SurveyCommand {
    /// Generate form, department and recommendation reports from a CSV export
    Report(SurveyReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the in-memory store with the synthetic demo cohort
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Survey {
            command: SurveyCommand::Report(args),
        } => run_survey_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::demo::{run_dashboard, run_demo, run_search, DashboardArgs, DemoArgs, SearchArgs};
use crate::server;
use ats_core::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ATS Search & Analytics",
    about = "Serve or query the applicant tracking search and dashboard backend",
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
    /// Run a keyword or ranked search against a fixture directory
    Search(SearchArgs),
    /// Print the dashboard summary for a fixture directory
    Dashboard(DashboardArgs),
    /// Walk through search and dashboard output using the bundled fixtures
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
    /// CSV fixture directory used to seed the store (overrides ATS_FIXTURES_DIR)
    #[arg(long)]
    pub(crate) fixtures: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Dashboard(args) => run_dashboard(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_serves() {
        let cli = Cli::try_parse_from(["ats-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn search_flags_parse() {
        let cli = Cli::try_parse_from([
            "ats-api",
            "search",
            "java",
            "--fixtures",
            "fixtures",
            "--limit",
            "3",
            "--ranked",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Search(args)) => {
                assert_eq!(args.query, "java");
                assert_eq!(args.limit, 3);
                assert!(args.ranked);
                assert_eq!(args.fixtures, PathBuf::from("fixtures"));
            }
            other => panic!("expected search command, got {other:?}"),
        }
    }

    #[test]
    fn dashboard_rejects_malformed_as_of() {
        let parsed = Cli::try_parse_from([
            "ats-api",
            "dashboard",
            "--fixtures",
            "fixtures",
            "--as-of",
            "next tuesday",
        ]);
        assert!(parsed.is_err());
    }
}

//! RepoLens CLI - command-line interface.
//!
//! This binary provides a command-line interface to the RepoLens
//! library: cached repository listings, single-repository detail,
//! language distribution, the health endpoint server, and offline
//! replay of recorded timing events.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use commands::{repos, serve, vitals};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "repolens", version, about = "Repository showcase client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List showcased repositories
    Repos(repos::ReposArgs),

    /// Show detail for one repository
    Repo {
        /// Repository owner login
        owner: String,
        /// Repository name
        name: String,
    },

    /// Show the language distribution
    Languages,

    /// Serve the health endpoint
    Serve(serve::ServeArgs),

    /// Replay a recorded timing-event file and print the score
    Vitals(vitals::VitalsArgs),
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Repos(args) => repos::run_list(args).await,
        Command::Repo { owner, name } => repos::run_detail(&owner, &name).await,
        Command::Languages => repos::run_languages().await,
        Command::Serve(args) => serve::run(args).await,
        Command::Vitals(args) => vitals::run(args),
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_repo_detail_command() {
        let cli = Cli::parse_from(["repolens", "repo", "octocat", "hello-world"]);
        assert!(matches!(cli.command, Command::Repo { .. }));
    }

    #[test]
    fn test_parses_repos_with_sort() {
        let cli = Cli::parse_from(["repolens", "repos", "--sort", "name", "--direction", "asc"]);
        match cli.command {
            Command::Repos(args) => {
                assert_eq!(args.sort, "name");
                assert_eq!(args.direction, "asc");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

//! CLI interface for spot-etl
//!
//! A single run mode: start the daemon, provision the schema, enter the
//! scheduling loop. No subcommands.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spot-etl")]
#[command(about = "Bitcoin spot price acquisition daemon: polls Coinbase and appends quotes to Postgres")]
#[command(version)]
pub struct Cli {
    /// Load environment variables from this file instead of `./.env`
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_env_file_flag() {
        let cli = Cli::parse_from(["spot-etl", "--env-file", "/tmp/custom.env"]);
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/custom.env")));
    }

    #[test]
    fn env_file_defaults_to_none() {
        let cli = Cli::parse_from(["spot-etl"]);
        assert!(cli.env_file.is_none());
    }
}

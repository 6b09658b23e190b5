use std::path::PathBuf;

use clap::{Parser, Subcommand};

use reelsync::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "REELSYNC_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Perform one run and exit
    Run {
        /// Only process these libraries (repeatable)
        #[arg(short, long = "library")]
        libraries: Vec<String>,

        /// Only process these collections (repeatable)
        #[arg(short = 'n', long = "collection")]
        collections: Vec<String>,

        /// Compute changes without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Apply per-collection schedules as a scheduled run would
        #[arg(long)]
        scheduled: bool,
    },

    /// Run on the configured cron schedule until interrupted
    Serve {
        /// Perform a manual run immediately at startup
        #[arg(long)]
        run_now: bool,

        /// Compute changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and validate the configuration
    Validate,

    /// Send a test event through every notification channel
    TestNotifications,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_filters() {
        let args = Args::parse_from([
            "reelsync",
            "--config",
            "/etc/reelsync.toml",
            "run",
            "--library",
            "Films",
            "--library",
            "Séries",
            "--collection",
            "Trending",
            "--dry-run",
        ]);
        assert_eq!(args.config, PathBuf::from("/etc/reelsync.toml"));
        match args.command {
            Commands::Run {
                libraries,
                collections,
                dry_run,
                scheduled,
            } => {
                assert_eq!(libraries, ["Films", "Séries"]);
                assert_eq!(collections, ["Trending"]);
                assert!(dry_run);
                assert!(!scheduled);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let args = Args::parse_from(["reelsync", "serve", "--run-now"]);
        assert!(matches!(
            args.command,
            Commands::Serve {
                run_now: true,
                dry_run: false
            }
        ));
    }
}

mod cli;

use std::process;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};

use reelsync::config::{self, AppConfig};
use reelsync::domain::RunTrigger;
use reelsync::logging;
use reelsync::runner::{RunRequest, RunStats};
use reelsync::services::ServiceContainer;

use crate::cli::{Args, Commands};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let config = config::load(&args.config)
        .await
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    if let Commands::Validate = args.command {
        print_config(&config);
        return Ok(0);
    }

    let logs = logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    match args.command {
        Commands::Run {
            libraries,
            collections,
            dry_run,
            scheduled,
        } => {
            let services = ServiceContainer::initialize(config, dry_run).await?;
            let trigger = if scheduled {
                RunTrigger::Scheduled
            } else {
                RunTrigger::Manual
            };
            let today = services.config.scheduler.schedule()?.local_date(Utc::now());
            let request = RunRequest::new(trigger, today)
                .with_libraries(libraries)
                .with_collections(collections);
            let stats = services.runner.run(&request).await;
            print_summary(&stats);
            Ok(if stats.is_success() { 0 } else { 1 })
        }
        Commands::Serve { run_now, dry_run } => {
            let services = ServiceContainer::initialize(config, dry_run).await?;
            let scheduler = services.scheduler()?;
            logs.start_retention_cleanup(services.cancellation_token());

            let cancel = services.cancellation_token();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                    return;
                }
                info!("Interrupt received, stopping after the current run");
                cancel.cancel();
            });

            if run_now {
                let stats = scheduler.run_now().await;
                print_summary(&stats);
            }
            scheduler.run().await;
            services.shutdown();
            Ok(0)
        }
        Commands::TestNotifications => {
            let services = ServiceContainer::initialize(config, true).await?;
            let results = services.notifications.test_channels().await;
            if results.is_empty() {
                println!("No notification channels enabled");
                return Ok(0);
            }
            let mut failed = 0;
            for result in &results {
                match &result.result {
                    Ok(()) => println!("{}: ok", result.channel),
                    Err(e) => {
                        failed += 1;
                        println!("{}: FAILED ({})", result.channel, e);
                    }
                }
            }
            Ok(if failed == 0 { 0 } else { 1 })
        }
        Commands::Validate => Ok(0),
    }
}

fn print_config(config: &AppConfig) {
    println!("Configuration OK");
    for library in &config.libraries {
        println!(
            "{} ({}, {} collections)",
            library.name,
            library.media_kind(),
            library.collections.len()
        );
        for collection in &library.collections {
            println!(
                "  - {} [{} sources, schedule {}]",
                collection.name,
                collection.sources.len(),
                collection.schedule
            );
        }
    }
}

fn print_summary(stats: &RunStats) {
    println!(
        "Run completed in {:.1}s: {} collections, +{} -{} items, {} errors",
        stats.duration.as_secs_f64(),
        stats.collections_updated,
        stats.items_added,
        stats.items_removed,
        stats.errors
    );
}

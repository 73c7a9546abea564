//! Skylog CLI - weather monitoring dashboard
//!
//! Usage:
//!   skylog init                 Initialize database
//!   skylog collect              Fetch current conditions from Open-Meteo
//!   skylog insights             Generate an insight report
//!   skylog serve --port 3000    Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            location,
            temperature,
            humidity,
            wind_speed,
            condition,
            rain_probability,
            pressure,
            feels_like,
            uv_index,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                commands::AddArgs {
                    location,
                    temperature,
                    humidity,
                    wind_speed,
                    condition,
                    rain_probability,
                    pressure,
                    feels_like,
                    uv_index,
                },
            )
        }
        Commands::Logs { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_logs_list(&db, 20, None),
                Some(LogsAction::List { limit, location }) => {
                    commands::cmd_logs_list(&db, limit, location.as_deref())
                }
                Some(LogsAction::Latest) => commands::cmd_logs_latest(&db),
            }
        }
        Commands::Stats { days } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_stats(&db, days)
        }
        Commands::Insights { days, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db, days, json).await
        }
        Commands::Export {
            output,
            from,
            to,
            location,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &output, from.as_deref(), to.as_deref(), location)
        }
        Commands::Collect { interval } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_collect(&db, interval).await
        }
        Commands::Serve {
            port,
            host,
            cors_origin,
        } => commands::cmd_serve(&cli.db, &host, port, cors_origin).await,
    }
}

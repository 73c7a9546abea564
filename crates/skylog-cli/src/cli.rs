//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Skylog - weather monitoring dashboard
#[derive(Parser)]
#[command(name = "skylog")]
#[command(about = "Self-hosted weather monitoring dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "skylog.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a weather observation manually
    Add {
        /// Location name, e.g. "Pindamonhangaba, SP"
        #[arg(short, long)]
        location: String,

        /// Temperature in °C
        #[arg(short, long)]
        temperature: f64,

        /// Relative humidity, 0-100 %
        #[arg(long)]
        humidity: f64,

        /// Wind speed in km/h
        #[arg(short, long)]
        wind_speed: f64,

        /// Condition description, e.g. "Partly Cloudy"
        #[arg(short, long)]
        condition: String,

        /// Rain probability, 0-100 %
        #[arg(long)]
        rain_probability: Option<f64>,

        /// Atmospheric pressure in hPa
        #[arg(long)]
        pressure: Option<f64>,

        /// Apparent temperature in °C
        #[arg(long)]
        feels_like: Option<f64>,

        /// UV index
        #[arg(long)]
        uv_index: Option<f64>,
    },

    /// List recorded observations
    Logs {
        #[command(subcommand)]
        action: Option<LogsAction>,
    },

    /// Show windowed weather statistics
    Stats {
        /// Statistics window in days
        #[arg(short, long, default_value = "7")]
        days: u32,
    },

    /// Generate an insight report (AI-first with rule-based fallback)
    Insights {
        /// Statistics window in days
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// Print the raw report JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Export observations to CSV
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Start date filter (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date filter (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Location substring filter
        #[arg(long)]
        location: Option<String>,
    },

    /// Fetch current conditions from Open-Meteo and store them
    Collect {
        /// Keep collecting every N seconds instead of running once
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable)
        #[arg(long)]
        cors_origin: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum LogsAction {
    /// List recent observations
    List {
        /// Max rows to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Location substring filter
        #[arg(long)]
        location: Option<String>,
    },

    /// Show the most recent observation
    Latest,
}

//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, stats) and shared utilities (open_db)
//! - `logs` - Observation commands (add, list, latest)
//! - `insights` - Insight report command
//! - `export` - CSV export command
//! - `collect` - Open-Meteo collection command
//! - `serve` - Web server command

pub mod collect;
pub mod core;
pub mod export;
pub mod insights;
pub mod logs;
pub mod serve;

// Re-export command functions for main.rs
pub use collect::*;
pub use self::core::*;
pub use export::*;
pub use insights::*;
pub use logs::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

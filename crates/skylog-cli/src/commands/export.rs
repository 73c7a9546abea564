//! CSV export command

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use skylog_core::db::Database;
use skylog_core::export::{export_observations_csv, ObservationExportOptions};

fn parse_date(value: &str, flag: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

pub fn cmd_export(
    db: &Database,
    output: &Path,
    from: Option<&str>,
    to: Option<&str>,
    location: Option<String>,
) -> Result<()> {
    let options = ObservationExportOptions {
        from: from.map(|s| parse_date(s, "--from")).transpose()?,
        to: to.map(|s| parse_date(s, "--to")).transpose()?,
        location,
    };

    let csv = export_observations_csv(db, &options)?;
    let rows = csv.lines().count().saturating_sub(1);

    std::fs::write(output, csv)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✅ Exported {} observation(s) to {}", rows, output.display());
    Ok(())
}

//! Insight report command

use anyhow::Result;
use skylog_core::ai::AiClient;
use skylog_core::db::Database;
use skylog_core::insights::{InsightEngine, InsightReport, InsightType};

pub async fn cmd_insights(db: &Database, days: u32, json: bool) -> Result<()> {
    let ai = AiClient::from_env();
    if ai.is_none() {
        println!("💡 Tip: Set GROQ_API_KEY for AI-generated insights");
    }

    let engine = InsightEngine::new(db.clone(), ai);
    let report = engine.generate(days).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report {
        InsightReport::NoData { message, .. } => {
            println!("{}", message);
        }
        InsightReport::Generated {
            summary, insights, ..
        } => {
            println!("🌦️  Weather insights ({})", summary.period);
            println!("   Source: {}", summary.source);
            println!(
                "   {} data points, avg {} / {}",
                summary.data_points, summary.avg_temperature, summary.avg_humidity
            );
            println!("   Temperature range: {}", summary.temperature_range);
            println!();

            for insight in insights {
                let icon = match insight.insight_type {
                    InsightType::Success => "✅",
                    InsightType::Warning => "⚠️ ",
                    InsightType::Info => "ℹ️ ",
                    InsightType::Error => "❌",
                };
                if insight.value.is_empty() {
                    println!("{} [{}] {}", icon, insight.category, insight.message);
                } else {
                    println!(
                        "{} [{}] {} ({})",
                        icon, insight.category, insight.message, insight.value
                    );
                }
                println!("      → {}", insight.recommendation);
            }
        }
    }

    Ok(())
}

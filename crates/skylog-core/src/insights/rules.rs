//! Deterministic rule-based insight generation
//!
//! The fallback path when the AI backend is unavailable or fails. Appends
//! insights in a fixed order (temperature, humidity, wind, trend, comfort) so
//! two runs over the same inputs produce identical reports.

use std::fmt;

use crate::models::{TemperatureSample, WeatherStats};

use super::types::{Insight, InsightType};

/// Temperature trend classification over the trailing week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived comfort score with its display strings
#[derive(Debug, Clone, PartialEq)]
pub struct ComfortIndex {
    /// Clamped to [0, 100] and rounded
    pub score: i64,
    pub message: &'static str,
    pub recommendation: &'static str,
    pub insight_type: InsightType,
}

/// Classify the temperature trend by comparing the two halves of the series
///
/// The series must be ordered oldest first. The first `floor(n/2)` samples
/// form the first half, the remainder the second. Fewer than two samples
/// always classify as stable.
pub fn classify_trend(series: &[TemperatureSample]) -> Trend {
    if series.len() < 2 {
        return Trend::Stable;
    }

    let mid = series.len() / 2;
    let (first, second) = series.split_at(mid);

    let avg_first = first.iter().map(|s| s.temperature).sum::<f64>() / first.len() as f64;
    let avg_second = second.iter().map(|s| s.temperature).sum::<f64>() / second.len() as f64;

    let diff = avg_second - avg_first;

    if diff > 2.0 {
        Trend::Rising
    } else if diff < -2.0 {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Compute the comfort index from average temperature and humidity
///
/// Starts at 100 and subtracts linear penalties: 3 points per degree outside
/// the 18-24°C band, 0.5 points per percentage point outside the 40-60%
/// humidity band. The score is clamped to [0, 100] and rounded
/// half-away-from-zero (`f64::round`). The insight type is derived from the
/// clamped score, not from which penalty applied: > 70 success, > 50 info,
/// else warning.
pub fn comfort_index(temp: f64, humidity: f64) -> ComfortIndex {
    let mut score = 100.0;
    let message;
    let recommendation;

    if temp < 18.0 {
        score -= (18.0 - temp) * 3.0;
        message = "Cold weather conditions";
        recommendation = "Wear warm clothing";
    } else if temp > 24.0 {
        score -= (temp - 24.0) * 3.0;
        message = "Warm weather conditions";
        recommendation = "Stay cool and hydrated";
    } else {
        message = "Comfortable temperature";
        recommendation = "Ideal weather conditions";
    }

    if humidity < 40.0 {
        score -= (40.0 - humidity) * 0.5;
    } else if humidity > 60.0 {
        score -= (humidity - 60.0) * 0.5;
    }

    let clamped = score.clamp(0.0, 100.0);

    // Type is derived from the clamped score before rounding; only the
    // displayed value is rounded.
    let insight_type = if clamped > 70.0 {
        InsightType::Success
    } else if clamped > 50.0 {
        InsightType::Info
    } else {
        InsightType::Warning
    };

    ComfortIndex {
        score: clamped.round() as i64,
        message,
        recommendation,
        insight_type,
    }
}

fn temperature_insight(stats: &WeatherStats) -> Insight {
    let value = format!("{:.1}°C", stats.avg_temperature);

    if stats.avg_temperature > 30.0 {
        Insight::new(
            InsightType::Warning,
            "temperature",
            "High average temperature detected in the last 7 days",
            value,
            "Stay hydrated and avoid prolonged sun exposure",
        )
    } else if stats.avg_temperature < 15.0 {
        Insight::new(
            InsightType::Info,
            "temperature",
            "Cool weather in the last 7 days",
            value,
            "Wear warm clothing",
        )
    } else {
        Insight::new(
            InsightType::Success,
            "temperature",
            "Pleasant temperature range",
            value,
            "Ideal conditions for outdoor activities",
        )
    }
}

fn humidity_insight(stats: &WeatherStats) -> Option<Insight> {
    let value = format!("{:.1}%", stats.avg_humidity);

    if stats.avg_humidity > 80.0 {
        Some(Insight::new(
            InsightType::Warning,
            "humidity",
            "High humidity levels",
            value,
            "May feel uncomfortable, use dehumidifier if indoors",
        ))
    } else if stats.avg_humidity < 30.0 {
        Some(Insight::new(
            InsightType::Warning,
            "humidity",
            "Low humidity levels",
            value,
            "Stay hydrated and use moisturizer",
        ))
    } else {
        None
    }
}

fn wind_insight(stats: &WeatherStats) -> Option<Insight> {
    if stats.avg_wind_speed > 30.0 {
        Some(Insight::new(
            InsightType::Warning,
            "wind",
            "Strong winds detected",
            format!("{:.1} km/h", stats.avg_wind_speed),
            "Be cautious with outdoor activities",
        ))
    } else {
        None
    }
}

fn trend_insight(series: &[TemperatureSample]) -> Insight {
    let trend = classify_trend(series);

    let recommendation = match trend {
        Trend::Rising => "Temperatures are increasing",
        Trend::Falling => "Temperatures are decreasing",
        Trend::Stable => "Stable temperature pattern",
    };

    Insight::new(
        InsightType::Info,
        "trend",
        format!("Temperature trend: {}", trend),
        "",
        recommendation,
    )
}

fn comfort_insight(stats: &WeatherStats) -> Insight {
    let index = comfort_index(stats.avg_temperature, stats.avg_humidity);

    Insight::new(
        index.insight_type,
        "comfort",
        index.message,
        format!("{}/100", index.score),
        index.recommendation,
    )
}

/// Generate the full rule-based insight list in its fixed order
pub fn rule_based_insights(stats: &WeatherStats, series: &[TemperatureSample]) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(5);

    insights.push(temperature_insight(stats));
    insights.extend(humidity_insight(stats));
    insights.extend(wind_insight(stats));
    insights.push(trend_insight(series));
    insights.push(comfort_insight(stats));

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn stats(temp: f64, humidity: f64, wind: f64) -> WeatherStats {
        WeatherStats {
            count: 10,
            avg_temperature: temp,
            avg_humidity: humidity,
            avg_wind_speed: wind,
            max_temperature: temp + 3.0,
            min_temperature: temp - 3.0,
            period: None,
        }
    }

    fn series_of(temps: &[f64]) -> Vec<TemperatureSample> {
        let base = Utc::now() - Duration::days(7);
        temps
            .iter()
            .enumerate()
            .map(|(i, &t)| TemperatureSample {
                temperature: t,
                timestamp: base + Duration::hours(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_temperature_insight_thresholds() {
        let hot = temperature_insight(&stats(31.0, 50.0, 10.0));
        assert_eq!(hot.insight_type, InsightType::Warning);
        assert_eq!(hot.value, "31.0°C");

        let pleasant = temperature_insight(&stats(25.0, 50.0, 10.0));
        assert_eq!(pleasant.insight_type, InsightType::Success);

        let cool = temperature_insight(&stats(10.0, 50.0, 10.0));
        assert_eq!(cool.insight_type, InsightType::Info);

        // Boundaries are exclusive: exactly 30 and exactly 15 are "pleasant"
        assert_eq!(
            temperature_insight(&stats(30.0, 50.0, 10.0)).insight_type,
            InsightType::Success
        );
        assert_eq!(
            temperature_insight(&stats(15.0, 50.0, 10.0)).insight_type,
            InsightType::Success
        );
    }

    #[test]
    fn test_humidity_insight_presence() {
        let high = humidity_insight(&stats(22.0, 85.0, 10.0)).unwrap();
        assert_eq!(high.insight_type, InsightType::Warning);
        assert_eq!(high.message, "High humidity levels");

        let low = humidity_insight(&stats(22.0, 25.0, 10.0)).unwrap();
        assert_eq!(low.message, "Low humidity levels");

        assert!(humidity_insight(&stats(22.0, 50.0, 10.0)).is_none());
        assert!(humidity_insight(&stats(22.0, 80.0, 10.0)).is_none());
        assert!(humidity_insight(&stats(22.0, 30.0, 10.0)).is_none());
    }

    #[test]
    fn test_wind_insight_presence() {
        let windy = wind_insight(&stats(22.0, 50.0, 31.0)).unwrap();
        assert_eq!(windy.insight_type, InsightType::Warning);
        assert_eq!(windy.value, "31.0 km/h");

        assert!(wind_insight(&stats(22.0, 50.0, 30.0)).is_none());
        assert!(wind_insight(&stats(22.0, 50.0, 5.0)).is_none());
    }

    #[test]
    fn test_trend_rising() {
        // First half avg 20, second half avg 23 -> diff 3 -> rising
        let series = series_of(&[20.0, 20.0, 23.0, 23.0]);
        assert_eq!(classify_trend(&series), Trend::Rising);
    }

    #[test]
    fn test_trend_stable_below_threshold() {
        // diff 1.9 is inside the +/-2 band
        let series = series_of(&[20.0, 20.0, 21.9, 21.9]);
        assert_eq!(classify_trend(&series), Trend::Stable);
    }

    #[test]
    fn test_trend_falling() {
        // diff -2.1
        let series = series_of(&[20.0, 20.0, 17.9, 17.9]);
        assert_eq!(classify_trend(&series), Trend::Falling);
    }

    #[test]
    fn test_trend_short_series_is_stable() {
        assert_eq!(classify_trend(&[]), Trend::Stable);
        assert_eq!(classify_trend(&series_of(&[25.0])), Trend::Stable);
    }

    #[test]
    fn test_trend_odd_length_split() {
        // n=5 -> first half is floor(5/2)=2 samples, second half 3
        // first avg 10, second avg 20 -> rising
        let series = series_of(&[10.0, 10.0, 20.0, 20.0, 20.0]);
        assert_eq!(classify_trend(&series), Trend::Rising);
    }

    #[test]
    fn test_comfort_ideal_conditions() {
        let index = comfort_index(18.0, 50.0);
        assert_eq!(index.score, 100);
        assert_eq!(index.insight_type, InsightType::Success);
        assert_eq!(index.message, "Comfortable temperature");
    }

    #[test]
    fn test_comfort_cold_penalty() {
        // 100 - (18-10)*3 = 76, still success because 76 > 70
        let index = comfort_index(10.0, 50.0);
        assert_eq!(index.score, 76);
        assert_eq!(index.insight_type, InsightType::Success);
        assert_eq!(index.message, "Cold weather conditions");
    }

    #[test]
    fn test_comfort_warm_and_humid() {
        // 100 - (30-24)*3 - (70-60)*0.5 = 100 - 18 - 5 = 77
        let index = comfort_index(30.0, 70.0);
        assert_eq!(index.score, 77);
        assert_eq!(index.insight_type, InsightType::Success);
        assert_eq!(index.message, "Warm weather conditions");
    }

    #[test]
    fn test_comfort_type_overrides_provisional_warning() {
        // 100 - (35-24)*3 - (90-60)*0.5 = 100 - 33 - 15 = 52 -> info,
        // even though the temperature branch alone suggested a warning
        let index = comfort_index(35.0, 90.0);
        assert_eq!(index.score, 52);
        assert_eq!(index.insight_type, InsightType::Info);
    }

    #[test]
    fn test_comfort_clamps_to_zero() {
        let index = comfort_index(60.0, 100.0);
        assert_eq!(index.score, 0);
        assert_eq!(index.insight_type, InsightType::Warning);
    }

    #[test]
    fn test_comfort_rounds_half_away_from_zero() {
        // 100 - (24.5-24)*3 = 98.5 -> rounds to 99
        let index = comfort_index(24.5, 50.0);
        assert_eq!(index.score, 99);
    }

    #[test]
    fn test_rule_sequence_order_and_membership() {
        // Hot, humid, windy -> all five insights, in order
        let s = stats(31.0, 85.0, 35.0);
        let series = series_of(&[20.0, 20.0, 23.0, 23.0]);
        let insights = rule_based_insights(&s, &series);

        let categories: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["temperature", "humidity", "wind", "trend", "comfort"]
        );

        // Calm, moderate -> humidity and wind omitted
        let s = stats(22.0, 50.0, 10.0);
        let insights = rule_based_insights(&s, &series);
        let categories: Vec<&str> = insights.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, vec!["temperature", "trend", "comfort"]);
    }

    #[test]
    fn test_trend_insight_has_empty_value() {
        let insight = trend_insight(&series_of(&[20.0, 23.0]));
        assert_eq!(insight.category, "trend");
        assert_eq!(insight.value, "");
        assert_eq!(insight.insight_type, InsightType::Info);
    }

    #[test]
    fn test_rule_based_insights_deterministic() {
        let s = stats(26.0, 72.0, 18.0);
        let series = series_of(&[20.0, 21.0, 22.0, 23.0]);

        let first = rule_based_insights(&s, &series);
        let second = rule_based_insights(&s, &series);
        assert_eq!(first, second);
    }
}

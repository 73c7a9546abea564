//! Database layer tests

use chrono::{Duration, Utc};

use super::Database;
use crate::models::{NewObservation, ObservationFilter};

fn sample(location: &str, temperature: f64, hours_ago: i64) -> NewObservation {
    NewObservation {
        location: location.to_string(),
        temperature,
        humidity: 65.0,
        wind_speed: 12.0,
        condition: "Partly Cloudy".to_string(),
        rain_probability: Some(30.0),
        pressure: Some(1013.0),
        feels_like: Some(temperature + 1.0),
        uv_index: Some(5.0),
        timestamp: Some(Utc::now() - Duration::hours(hours_ago)),
    }
}

#[test]
fn test_insert_and_get_observation() {
    let db = Database::in_memory().unwrap();

    let id = db
        .insert_observation(&sample("Pindamonhangaba, SP", 25.0, 1))
        .unwrap();

    let obs = db.get_observation(id).unwrap().unwrap();
    assert_eq!(obs.location, "Pindamonhangaba, SP");
    assert_eq!(obs.temperature, 25.0);
    assert_eq!(obs.condition, "Partly Cloudy");
    assert_eq!(obs.rain_probability, Some(30.0));

    assert!(db.get_observation(id + 1).unwrap().is_none());
}

#[test]
fn test_latest_observation() {
    let db = Database::in_memory().unwrap();
    assert!(db.latest_observation().unwrap().is_none());

    db.insert_observation(&sample("A", 20.0, 48)).unwrap();
    db.insert_observation(&sample("B", 22.0, 2)).unwrap();
    db.insert_observation(&sample("C", 21.0, 24)).unwrap();

    let latest = db.latest_observation().unwrap().unwrap();
    assert_eq!(latest.location, "B");
}

#[test]
fn test_list_observations_newest_first() {
    let db = Database::in_memory().unwrap();
    db.insert_observation(&sample("A", 20.0, 72)).unwrap();
    db.insert_observation(&sample("B", 22.0, 1)).unwrap();
    db.insert_observation(&sample("C", 21.0, 24)).unwrap();

    let all = db.list_observations(&ObservationFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].location, "B");
    assert_eq!(all[2].location, "A");
}

#[test]
fn test_list_observations_location_filter() {
    let db = Database::in_memory().unwrap();
    db.insert_observation(&sample("Pindamonhangaba, SP", 25.0, 1))
        .unwrap();
    db.insert_observation(&sample("Taubate, SP", 24.0, 2))
        .unwrap();

    let filter = ObservationFilter {
        location: Some("pindamonhangaba".to_string()),
        ..Default::default()
    };
    let matched = db.list_observations(&filter).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].location, "Pindamonhangaba, SP");
}

#[test]
fn test_list_observations_date_range_and_paging() {
    let db = Database::in_memory().unwrap();
    for h in 0..10 {
        db.insert_observation(&sample("A", 20.0, h * 24)).unwrap();
    }

    let filter = ObservationFilter {
        start: Some(Utc::now() - Duration::days(3)),
        ..Default::default()
    };
    // hours_ago 0, 24, 48 fall inside the trailing 3 days
    assert_eq!(db.list_observations(&filter).unwrap().len(), 3);

    let filter = ObservationFilter {
        limit: Some(3),
        skip: Some(2),
        ..Default::default()
    };
    let page = db.list_observations(&filter).unwrap();
    assert_eq!(page.len(), 3);
}

#[test]
fn test_stats_empty_window_invariant() {
    let db = Database::in_memory().unwrap();

    let stats = db.stats(7).unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.avg_temperature, 0.0);
    assert_eq!(stats.avg_humidity, 0.0);
    assert_eq!(stats.avg_wind_speed, 0.0);
    assert_eq!(stats.max_temperature, 0.0);
    assert_eq!(stats.min_temperature, 0.0);
    assert!(stats.period.is_none());
}

#[test]
fn test_stats_aggregates() {
    let db = Database::in_memory().unwrap();
    db.insert_observation(&sample("A", 25.0, 1)).unwrap();
    db.insert_observation(&sample("A", 28.0, 2)).unwrap();
    db.insert_observation(&sample("A", 22.0, 3)).unwrap();
    // Outside the 7-day window; must not contribute
    db.insert_observation(&sample("A", 99.0, 24 * 30)).unwrap();

    let stats = db.stats(7).unwrap();
    assert_eq!(stats.count, 3);
    assert!((stats.avg_temperature - 25.0).abs() < 1e-9);
    assert_eq!(stats.max_temperature, 28.0);
    assert_eq!(stats.min_temperature, 22.0);
    assert!(stats.period.is_some());
}

#[test]
fn test_temperature_series_oldest_first() {
    let db = Database::in_memory().unwrap();
    db.insert_observation(&sample("A", 20.0, 72)).unwrap();
    db.insert_observation(&sample("A", 23.0, 2)).unwrap();
    db.insert_observation(&sample("A", 21.0, 24)).unwrap();

    let series = db.temperature_series(7).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].temperature, 20.0);
    assert_eq!(series[1].temperature, 21.0);
    assert_eq!(series[2].temperature, 23.0);
}

#[test]
fn test_count_observations() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_observations().unwrap(), 0);
    db.insert_observation(&sample("A", 20.0, 1)).unwrap();
    db.insert_observation(&sample("A", 21.0, 2)).unwrap();
    assert_eq!(db.count_observations().unwrap(), 2);
}

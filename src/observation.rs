//! Cleaning of raw station records before they reach the engine.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::model::DailyObservation;

/// Plausible mean air temperature at a station (°C).
pub const TEMPERATURE_LIMITS: (f64, f64) = (-50., 50.);
/// Relative humidity (%).
pub const HUMIDITY_LIMITS: (f64, f64) = (0., 100.);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DropReason {
    /// Another record for the same day came first.
    Duplicate,
    TemperatureOutOfRange(f64),
    HumidityOutOfRange(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropped {
    /// Position in the input.
    pub index: usize,
    pub day_of_year: u16,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cleaned {
    pub kept: Vec<DailyObservation>,
    pub dropped: Vec<Dropped>,
}

fn within((min, max): (f64, f64), value: f64) -> bool {
    (min..=max).contains(&value)
}

fn drop_reason(observation: &DailyObservation) -> Option<DropReason> {
    if !within(TEMPERATURE_LIMITS, observation.temp_mean) {
        return Some(DropReason::TemperatureOutOfRange(observation.temp_mean));
    }
    [observation.rh_max, observation.rh_min]
        .into_iter()
        .find(|&rh| !within(HUMIDITY_LIMITS, rh))
        .map(DropReason::HumidityOutOfRange)
}

/// Drops implausible records, then keeps the first remaining record of each
/// day, preserving input order.
pub fn clean_observations(records: &[DailyObservation]) -> Cleaned {
    let mut seen = HashSet::new();
    let mut cleaned = Cleaned::default();

    for (index, record) in records.iter().enumerate() {
        let reason = drop_reason(record).or_else(|| {
            (!seen.insert(record.day_of_year)).then_some(DropReason::Duplicate)
        });
        match reason {
            None => cleaned.kept.push(*record),
            Some(reason) => cleaned.dropped.push(Dropped {
                index,
                day_of_year: record.day_of_year,
                reason,
            }),
        }
    }

    if !cleaned.dropped.is_empty() {
        debug!(
            kept = cleaned.kept.len(),
            dropped = cleaned.dropped.len(),
            "cleaned station records"
        );
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day_of_year: u16, temp_mean: f64, rh_max: f64) -> DailyObservation {
        DailyObservation {
            day_of_year,
            temp_max: temp_mean + 5.0,
            temp_min: temp_mean - 5.0,
            temp_mean,
            rh_max,
            rh_min: 30.0,
            precipitation: 0.0,
        }
    }

    #[test]
    fn keeps_valid_records_in_order() {
        let records = [record(3, 10.0, 80.0), record(1, 12.0, 70.0), record(2, 8.0, 90.0)];
        let cleaned = clean_observations(&records);
        assert_eq!(cleaned.kept, records.to_vec());
        assert!(cleaned.dropped.is_empty());
    }

    #[test]
    fn drops_repeated_days() {
        let records = [record(1, 10.0, 80.0), record(1, 10.0, 80.0), record(1, 11.0, 60.0)];
        let cleaned = clean_observations(&records);
        assert_eq!(cleaned.kept, vec![records[0]]);
        assert_eq!(
            cleaned.dropped.iter().map(|d| d.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(cleaned
            .dropped
            .iter()
            .all(|d| d.reason == DropReason::Duplicate));
    }

    #[test]
    fn implausible_first_record_does_not_shadow_valid_one() {
        let records = [record(10, 99.0, 80.0), record(10, 12.0, 80.0)];
        let cleaned = clean_observations(&records);
        assert_eq!(cleaned.kept, vec![records[1]]);
        assert_eq!(cleaned.dropped.len(), 1);
        assert_eq!(cleaned.dropped[0].index, 0);
        assert_eq!(
            cleaned.dropped[0].reason,
            DropReason::TemperatureOutOfRange(99.0)
        );
    }

    #[test]
    fn drops_implausible_readings() {
        let records = [
            record(1, 55.0, 80.0),
            record(2, -50.0, 80.0),
            record(3, 10.0, 120.0),
        ];
        let cleaned = clean_observations(&records);
        assert_eq!(cleaned.kept, vec![records[1]]);
        assert_eq!(
            cleaned.dropped[0].reason,
            DropReason::TemperatureOutOfRange(55.0)
        );
        assert_eq!(
            cleaned.dropped[1].reason,
            DropReason::HumidityOutOfRange(120.0)
        );
    }

    #[test]
    fn nan_reading_is_dropped() {
        let cleaned = clean_observations(&[record(4, f64::NAN, 80.0)]);
        assert!(cleaned.kept.is_empty());
        assert_eq!(cleaned.dropped.len(), 1);
    }
}

/// Overflow alert generation.
///
/// Turns overflow predictions into alert rows for `civic.alerts`. Alert
/// persistence and resolution live in `db`; this module is pure and only
/// decides *which* alerts a scoring sweep should raise.

use chrono::{DateTime, Utc};

use crate::model::{AlertStatus, GarbageBin, NewAlert, PredictionResult};
use crate::predict::risk::predict_overflow;

/// Builds an alert for a bin iff its prediction says it will overflow.
///
/// The alert carries the scorer's message verbatim along with the day
/// estimate, and always starts in the active state.
pub fn build_overflow_alert(bin: &GarbageBin, prediction: &PredictionResult) -> Option<NewAlert> {
    if !prediction.will_overflow {
        return None;
    }

    Some(NewAlert {
        bin_id: bin.id.clone(),
        message: prediction.message.clone(),
        predicted_days_left: prediction.days_left,
        status: AlertStatus::Active,
    })
}

/// Scores every bin in the fleet and collects the alerts to persist.
///
/// Every sweep raises a fresh alert for every bin currently predicted to
/// overflow.
// TODO: deduplicate against existing active alerts for the same bin —
// repeated sweeps currently stack duplicate active alerts.
pub fn sweep(bins: &[GarbageBin], now: DateTime<Utc>) -> Vec<NewAlert> {
    bins.iter()
        .filter_map(|bin| {
            let prediction = predict_overflow(bin, now);
            build_overflow_alert(bin, &prediction)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AreaType;
    use chrono::{Duration, TimeZone};

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 4, 9, 0, 0).unwrap()
    }

    fn bin(id: &str, level: f64) -> GarbageBin {
        GarbageBin {
            id: id.to_string(),
            location: "Koramangala 5th Block".to_string(),
            area_type: AreaType::Residential,
            current_garbage_level: level,
            complaints_last_week: 0,
            last_emptied_date: reference_now().date_naive() - Duration::days(2),
            capacity_days: 7.0,
        }
    }

    #[test]
    fn test_overflowing_bin_produces_active_alert() {
        let bin = bin("bin-92", 92.0);
        let prediction = predict_overflow(&bin, reference_now());
        let alert = build_overflow_alert(&bin, &prediction)
            .expect("92% full bin should raise an alert");

        assert_eq!(alert.bin_id, "bin-92");
        assert_eq!(alert.status, AlertStatus::Active);
        assert_eq!(alert.predicted_days_left, prediction.days_left);
        assert_eq!(alert.message, prediction.message);
    }

    #[test]
    fn test_safe_bin_produces_no_alert() {
        let bin = bin("bin-20", 20.0);
        let prediction = predict_overflow(&bin, reference_now());
        assert!(!prediction.will_overflow);
        assert!(build_overflow_alert(&bin, &prediction).is_none());
    }

    #[test]
    fn test_sweep_raises_one_alert_per_overflowing_bin() {
        let fleet = vec![bin("a", 95.0), bin("b", 30.0), bin("c", 75.0), bin("d", 10.0)];
        let alerts = sweep(&fleet, reference_now());

        let ids: Vec<&str> = alerts.iter().map(|a| a.bin_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_repeated_sweeps_stack_duplicate_alerts() {
        // Pins the known duplication behavior: two sweeps over an unchanged
        // fleet raise the same alert twice. If deduplication is ever added,
        // this test should be updated deliberately rather than drift.
        let fleet = vec![bin("a", 95.0)];
        let first = sweep(&fleet, reference_now());
        let second = sweep(&fleet, reference_now());
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sweep_of_empty_fleet_is_empty() {
        assert!(sweep(&[], reference_now()).is_empty());
    }
}

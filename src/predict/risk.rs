/// Overflow risk scoring for waste bins.
///
/// `predict_overflow` is a pure function of the bin snapshot and the
/// caller-supplied reference time. It combines four normalized features
/// into a weighted risk score, estimates days until the bin is full from
/// a per-area fill rate, and classifies the result into a risk level with
/// the raw fill percentage acting as an override floor.
///
/// The function is total over its documented input domain: out-of-range
/// values are not rejected. `capacity_days` must be positive — the caller
/// guarantees this (the fill-cycle normalization and the confidence term
/// both divide by it).

use chrono::{DateTime, Utc};

use crate::model::{AreaType, GarbageBin, PredictionResult, RiskLevel};

// Feature weights. The first three sum with the days weight to 1.0; the
// area term contributes only the multiplier's excess over 1.0.
const LEVEL_WEIGHT: f64 = 0.4;
const COMPLAINTS_WEIGHT: f64 = 0.25;
const AREA_WEIGHT: f64 = 0.15;
const DAYS_WEIGHT: f64 = 0.2;

/// Estimated fill percentage per day by area type.
const FILL_RATE_COMMERCIAL: f64 = 15.0;
const FILL_RATE_RESIDENTIAL: f64 = 10.0;

/// Scores a bin snapshot into an overflow prediction.
///
/// `now` is passed explicitly so repeated calls with the same inputs are
/// reproducible; only its calendar date matters (day granularity).
pub fn predict_overflow(bin: &GarbageBin, now: DateTime<Utc>) -> PredictionResult {
    let days_since_emptied = (now.date_naive() - bin.last_emptied_date).num_days();

    // Normalize features into [0,1]-ish ranges. The fill-cycle ratio is
    // allowed to overshoot to 1.5 for bins well past their nominal cycle.
    let normalized_level = bin.current_garbage_level / 100.0;
    let normalized_complaints = (bin.complaints_last_week as f64 / 10.0).min(1.0);
    let area_multiplier = match bin.area_type {
        AreaType::Commercial => 1.3,
        AreaType::Residential => 1.0,
    };
    let normalized_days = (days_since_emptied as f64 / bin.capacity_days).min(1.5);

    let risk_score = normalized_level * LEVEL_WEIGHT
        + normalized_complaints * COMPLAINTS_WEIGHT
        + (area_multiplier - 1.0) * AREA_WEIGHT
        + normalized_days * DAYS_WEIGHT;

    // Days until full, from the per-area fill rate scaled up by complaint
    // volume (each complaint adds 10% to the estimated rate).
    let remaining_capacity = 100.0 - bin.current_garbage_level;
    let daily_fill_rate = match bin.area_type {
        AreaType::Commercial => FILL_RATE_COMMERCIAL,
        AreaType::Residential => FILL_RATE_RESIDENTIAL,
    };
    let adjusted_fill_rate = daily_fill_rate * (1.0 + bin.complaints_last_week as f64 * 0.1);
    let days_left = ((remaining_capacity / adjusted_fill_rate).floor() as i32).max(0);

    // Evaluated top-down, first match wins. The raw fill level acts as an
    // override floor independent of the composite score.
    let risk_level = if risk_score >= 0.8 || bin.current_garbage_level >= 90.0 {
        RiskLevel::Critical
    } else if risk_score >= 0.6 || bin.current_garbage_level >= 70.0 {
        RiskLevel::High
    } else if risk_score >= 0.4 || bin.current_garbage_level >= 50.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let will_overflow = risk_level == RiskLevel::Critical || risk_level == RiskLevel::High;

    let message = match risk_level {
        RiskLevel::Critical => {
            "URGENT: Immediate collection required. Overflow imminent!".to_string()
        }
        RiskLevel::High => format!(
            "Warning: High fill level. Collection needed within {} day(s).",
            days_left
        ),
        RiskLevel::Medium => format!(
            "Moderate fill level. Schedule collection within {} days.",
            days_left
        ),
        RiskLevel::Low => format!(
            "Normal operation. Approximately {} days until next collection.",
            days_left
        ),
    };

    // Confidence peaks when the bin is observed near the midpoint of its
    // nominal cycle and decays with distance from it, clamped to [60, 95].
    let midpoint_offset =
        (days_since_emptied as f64 - bin.capacity_days / 2.0).abs() / bin.capacity_days;
    let confidence = ((0.9 - midpoint_offset * 0.2) * 100.0).round() as i32;
    let confidence = confidence.clamp(60, 95);

    PredictionResult {
        will_overflow,
        days_left,
        risk_level,
        confidence,
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

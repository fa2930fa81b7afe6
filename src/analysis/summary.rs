/// Dashboard summary aggregation.
///
/// `summarize_fleet` condenses the current bin fleet and alert history
/// into the headline numbers operators watch: how many bins are critical
/// or high risk right now, how many alerts are open, and how many were
/// resolved today. The pending complaint count comes from the caller
/// (it is a single database aggregate, see `db::count_pending_complaints`).

use chrono::{DateTime, Utc};

use crate::model::{AlertStatus, ForecastBundle, GarbageBin, OverflowAlert, RainStatus, RiskLevel};
use crate::predict::rainfall::classify_rainfall;
use crate::predict::risk::predict_overflow;

/// Headline numbers for the operator dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetSummary {
    pub total_bins: usize,
    pub critical_bins: usize,
    pub high_risk_bins: usize,
    pub active_alerts: usize,
    pub resolved_today: usize,
    pub pending_complaints: i64,
}

/// Summarizes the fleet at `now`.
///
/// "Resolved today" counts alerts whose resolution timestamp falls on
/// `now`'s calendar date.
pub fn summarize_fleet(
    bins: &[GarbageBin],
    alerts: &[OverflowAlert],
    pending_complaints: i64,
    now: DateTime<Utc>,
) -> FleetSummary {
    let mut critical_bins = 0;
    let mut high_risk_bins = 0;

    for bin in bins {
        match predict_overflow(bin, now).risk_level {
            RiskLevel::Critical => critical_bins += 1,
            RiskLevel::High => high_risk_bins += 1,
            _ => {}
        }
    }

    let active_alerts = alerts
        .iter()
        .filter(|a| a.status == AlertStatus::Active)
        .count();

    let today = now.date_naive();
    let resolved_today = alerts
        .iter()
        .filter(|a| {
            a.status == AlertStatus::Resolved
                && a.resolved_at.is_some_and(|t| t.date_naive() == today)
        })
        .count();

    FleetSummary {
        total_bins: bins.len(),
        critical_bins,
        high_risk_bins,
        active_alerts,
        resolved_today,
        pending_complaints,
    }
}

/// Number of forecast days classified as heavy rain. Two or more heavy
/// days in a week is the usual trigger for pulling collection runs forward.
pub fn heavy_rain_days(bundle: &ForecastBundle) -> usize {
    bundle
        .forecast
        .iter()
        .filter(|d| classify_rainfall(d.rainfall_mm) == RainStatus::HeavyRain)
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

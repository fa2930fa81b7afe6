/// Core data types for the civic garbage-bin monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies beyond
/// chrono/serde — only types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bin types
// ---------------------------------------------------------------------------

/// Zoning classification of the area a bin serves. Commercial areas fill
/// faster and carry a higher risk multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Residential,
    Commercial,
}

/// Snapshot of a tracked waste bin, as stored in `civic.garbage_bins`.
///
/// `current_garbage_level` is a fill percentage in [0, 100]. `capacity_days`
/// is the nominal number of days between emptyings and must be positive —
/// the scorer divides by it without checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarbageBin {
    pub id: String,
    pub location: String,
    pub area_type: AreaType,
    pub current_garbage_level: f64,
    pub complaints_last_week: i32,
    pub last_emptied_date: NaiveDate,
    pub capacity_days: f64,
}

// ---------------------------------------------------------------------------
// Risk types
// ---------------------------------------------------------------------------

/// Overflow risk classification, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Output of the overflow risk scorer for a single bin.
///
/// `will_overflow` is true exactly when `risk_level` is High or Critical.
/// `confidence` is a percentage in [60, 95].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub will_overflow: bool,
    pub days_left: i32,
    pub risk_level: RiskLevel,
    pub confidence: i32,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Forecast types
// ---------------------------------------------------------------------------

/// Collection scheduling priority derived from forecast rainfall.
/// Serialized using the wire strings "NORMAL" / "MODERATE" / "HIGH".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionPriority {
    Normal,
    Moderate,
    High,
}

/// Qualitative rain classification of a forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainStatus {
    NoRain,
    LightRain,
    HeavyRain,
}

impl std::fmt::Display for RainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RainStatus::NoRain => write!(f, "No Rain"),
            RainStatus::LightRain => write!(f, "Light Rain"),
            RainStatus::HeavyRain => write!(f, "Heavy Rain"),
        }
    }
}

/// One entry of a 7-day rainfall forecast.
///
/// `rainfall_mm` carries one decimal place and is at least 0.1 whenever
/// `will_rain` is true, exactly 0 otherwise. `probability` is rounded to
/// two decimals and clamped to [0.05, 0.95].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: String, // ISO calendar date, e.g. "2026-08-07"
    pub day: String,  // full weekday name
    pub rainfall_mm: f64,
    pub will_rain: bool,
    pub probability: f64,
    pub priority: CollectionPriority,
}

/// A 7-day forecast plus the aggregate collection priority over the week.
/// Transient — computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub forecast: Vec<DayForecast>,
    pub overall_priority: CollectionPriority,
}

// ---------------------------------------------------------------------------
// Alert types
// ---------------------------------------------------------------------------

/// Lifecycle state of an overflow alert, matching the stored enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    /// Stored string form, as written to and read from `civic.alerts.status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Resolved => "resolved",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AlertStatus::Active),
            "resolved" => Some(AlertStatus::Resolved),
            _ => None,
        }
    }
}

/// An overflow alert row from `civic.alerts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverflowAlert {
    pub id: i64,
    pub bin_id: String,
    pub message: String,
    pub predicted_days_left: Option<i32>,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// An overflow alert pending insertion, produced by the scoring sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub bin_id: String,
    pub message: String,
    pub predicted_days_left: i32,
    pub status: AlertStatus,
}

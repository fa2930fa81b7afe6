/// Deterministic 7-day rainfall forecaster.
///
/// Generates a synthetic forecast from fixed seasonal regimes, a
/// day-of-week adjustment, and a seeded pseudo-random sequence. The seed
/// derives from the calendar date alone (year and day-of-year), so the
/// same reference date always yields byte-identical output — there is no
/// wall-clock randomness anywhere in this module.
///
/// The pseudo-random draws use the sine hash `frac(sin(seed) * 10000)`,
/// kept for bit-for-bit parity with the established forecast series.
/// Swapping in a seeded PRNG would change every published number.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{CollectionPriority, DayForecast, ForecastBundle, RainStatus};

// ---------------------------------------------------------------------------
// Seasonal model
// ---------------------------------------------------------------------------

/// One seasonal rainfall regime: mean daily rainfall, base probability of
/// rain, and the spread applied around the mean on rainy days.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalPattern {
    pub base_rainfall_mm: f64,
    pub probability: f64,
    pub variance_mm: f64,
}

/// Pre-monsoon (March-May): building heat, occasional showers.
const PRE_MONSOON: SeasonalPattern = SeasonalPattern {
    base_rainfall_mm: 3.5,
    probability: 0.25,
    variance_mm: 2.5,
};

/// Monsoon (June-September): heavy rainfall.
const MONSOON: SeasonalPattern = SeasonalPattern {
    base_rainfall_mm: 12.0,
    probability: 0.70,
    variance_mm: 8.0,
};

/// Post-monsoon (October-November): retreating monsoon.
const POST_MONSOON: SeasonalPattern = SeasonalPattern {
    base_rainfall_mm: 6.0,
    probability: 0.45,
    variance_mm: 4.0,
};

/// Winter (December-February): dry season.
const WINTER: SeasonalPattern = SeasonalPattern {
    base_rainfall_mm: 0.8,
    probability: 0.10,
    variance_mm: 0.5,
};

/// Day-of-week probability weights, indexed Sunday through Saturday.
/// Weekends run slightly wetter from the urban heat island effect.
const DAY_WEIGHTS: [f64; 7] = [1.0, 0.95, 0.95, 1.0, 1.05, 1.1, 1.05];

/// Looks up the seasonal regime for a 1-based calendar month.
pub fn seasonal_pattern(month: u32) -> &'static SeasonalPattern {
    match month {
        3..=5 => &PRE_MONSOON,
        6..=9 => &MONSOON,
        10 | 11 => &POST_MONSOON,
        _ => &WINTER,
    }
}

// ---------------------------------------------------------------------------
// Deterministic pseudo-randomness
// ---------------------------------------------------------------------------

/// Cheap deterministic hash mapping a seed to [0, 1).
///
/// The fractional part is taken as `x - floor(x)` so the result is
/// non-negative even when the scaled sine is negative.
fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}

/// Round to one decimal place.
fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Forecast generation
// ---------------------------------------------------------------------------

/// Collection priority for a single day's rainfall total.
pub fn collection_priority(rainfall_mm: f64) -> CollectionPriority {
    if rainfall_mm > 8.0 {
        CollectionPriority::High
    } else if rainfall_mm > 3.0 {
        CollectionPriority::Moderate
    } else {
        CollectionPriority::Normal
    }
}

/// Qualitative rain classification used in summaries and sweep logging.
pub fn classify_rainfall(rainfall_mm: f64) -> RainStatus {
    if rainfall_mm < 3.0 {
        RainStatus::NoRain
    } else if rainfall_mm < 8.0 {
        RainStatus::LightRain
    } else {
        RainStatus::HeavyRain
    }
}

/// Forecasts a single day.
///
/// `previous_rain` carries the consecutive-day correlation: a rainy
/// predecessor adds 0.15 to the rain probability before clamping.
pub fn predict_day(date: NaiveDate, previous_rain: bool) -> DayForecast {
    let pattern = seasonal_pattern(date.month());
    let day_weight = DAY_WEIGHTS[date.weekday().num_days_from_sunday() as usize];

    // Two independent draws per date: one drives probability jitter and
    // rainfall spread, the other the rain/no-rain decision.
    let seed = date.year() as f64 * 1000.0 + date.ordinal() as f64;
    let random1 = seeded_random(seed);
    let random2 = seeded_random(2.0 * seed);

    let consecutive_bonus = if previous_rain { 0.15 } else { 0.0 };
    let probability = (pattern.probability * day_weight
        + consecutive_bonus
        + (random1 - 0.5) * 0.2)
        .clamp(0.05, 0.95);

    let will_rain = random2 < probability;

    let rainfall_mm = if will_rain {
        let spread = (random1 - 0.5) * pattern.variance_mm * 2.0;
        round_1dp(pattern.base_rainfall_mm + spread).max(0.1)
    } else {
        0.0
    };

    DayForecast {
        date: date.format("%Y-%m-%d").to_string(),
        day: date.format("%A").to_string(),
        rainfall_mm,
        will_rain,
        probability: round_2dp(probability),
        priority: collection_priority(rainfall_mm),
    }
}

/// Generates the 7-day forecast starting from `today`, threading each
/// day's rain outcome into the next day's probability.
pub fn generate_7day_forecast(today: NaiveDate) -> ForecastBundle {
    let mut forecast = Vec::with_capacity(7);
    let mut previous_rain = false;

    for offset in 0..7 {
        let day = predict_day(today + Duration::days(offset), previous_rain);
        previous_rain = day.will_rain;
        forecast.push(day);
    }

    let total_rainfall: f64 = forecast.iter().map(|d| d.rainfall_mm).sum();
    let rainy_days = forecast.iter().filter(|d| d.will_rain).count();

    let overall_priority = if total_rainfall > 40.0 || rainy_days >= 5 {
        CollectionPriority::High
    } else if total_rainfall > 15.0 || rainy_days >= 3 {
        CollectionPriority::Moderate
    } else {
        CollectionPriority::Normal
    };

    ForecastBundle {
        forecast,
        overall_priority,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

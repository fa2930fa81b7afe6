/// Core daemon implementation for the bin monitoring service
///
/// This module implements the main daemon loop that:
/// 1. Validates database connectivity and schema on startup
/// 2. Periodically re-scores the bin fleet with the overflow predictor
/// 3. Writes an active alert for every bin predicted to overflow
/// 4. Regenerates the rainfall forecast and logs the collection priority

use crate::alert;
use crate::analysis::summary;
use crate::db;
use crate::model::{GarbageBin, RiskLevel};
use crate::predict::rainfall::{classify_rainfall, generate_7day_forecast};
use crate::predict::risk::predict_overflow;
use chrono::Utc;
use postgres::Client;
use std::error::Error;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Daemon configuration
pub struct DaemonConfig {
    /// How often to re-score the fleet (default: 15 minutes)
    pub poll_interval_minutes: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: 15,
        }
    }
}

/// Outcome of a single scoring sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepStats {
    pub bins_scored: usize,
    pub alerts_raised: usize,
    pub critical_bins: usize,
    pub high_risk_bins: usize,
}

// ---------------------------------------------------------------------------
// Daemon State
// ---------------------------------------------------------------------------

/// Main daemon state
pub struct Daemon {
    config: DaemonConfig,
    client: Option<Client>,
}

impl Daemon {
    /// Create a new daemon instance with default configuration
    pub fn new() -> Self {
        Self {
            config: DaemonConfig::default(),
            client: None,
        }
    }

    /// Create daemon with custom configuration
    pub fn with_config(config: DaemonConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    pub fn poll_interval_minutes(&self) -> u64 {
        self.config.poll_interval_minutes
    }

    /// Initialize daemon: validate database schema and check the fleet
    pub fn initialize(&mut self) -> Result<usize, Box<dyn Error>> {
        let mut client = db::connect_and_verify(&["civic"])?;

        let bins = db::fetch_bins(&mut client)?;
        self.client = Some(client);

        if bins.is_empty() {
            return Err("No bins found in civic.garbage_bins".into());
        }

        Ok(bins.len())
    }

    /// Fetch the current fleet from the database
    pub fn fetch_fleet(&mut self) -> Result<Vec<GarbageBin>, Box<dyn Error>> {
        let client = self.client.as_mut().ok_or("Daemon not initialized")?;
        Ok(db::fetch_bins(client)?)
    }

    /// Run one scoring sweep: score every bin and persist overflow alerts
    pub fn run_sweep(&mut self) -> Result<SweepStats, Box<dyn Error>> {
        let now = Utc::now();
        let bins = self.fetch_fleet()?;

        let mut critical_bins = 0;
        let mut high_risk_bins = 0;
        for bin in &bins {
            match predict_overflow(bin, now).risk_level {
                RiskLevel::Critical => critical_bins += 1,
                RiskLevel::High => high_risk_bins += 1,
                _ => {}
            }
        }

        let alerts = alert::sweep(&bins, now);

        let client = self.client.as_mut().ok_or("Daemon not initialized")?;
        for new_alert in &alerts {
            db::insert_alert(client, new_alert)?;
        }

        Ok(SweepStats {
            bins_scored: bins.len(),
            alerts_raised: alerts.len(),
            critical_bins,
            high_risk_bins,
        })
    }

    /// Snapshot the dashboard numbers: risk tiers, alert states, and the
    /// pending complaint backlog.
    pub fn fleet_summary(&mut self) -> Result<summary::FleetSummary, Box<dyn Error>> {
        let now = Utc::now();
        let bins = self.fetch_fleet()?;

        let client = self.client.as_mut().ok_or("Daemon not initialized")?;
        let alerts = db::fetch_alerts(client)?;
        let pending = db::count_pending_complaints(client)?;

        Ok(summary::summarize_fleet(&bins, &alerts, pending, now))
    }

    /// Main daemon loop (runs indefinitely)
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        println!("🚀 Starting daemon loop...");
        println!("   Poll interval: {} minutes", self.config.poll_interval_minutes);

        loop {
            let start = Utc::now();

            match self.run_sweep() {
                Ok(stats) => {
                    println!(
                        "✓ Sweep complete: {} bins scored, {} critical, {} high risk, {} alerts raised",
                        stats.bins_scored,
                        stats.critical_bins,
                        stats.high_risk_bins,
                        stats.alerts_raised
                    );
                }
                Err(e) => {
                    eprintln!("✗ Sweep error: {}", e);
                }
            }

            match self.fleet_summary() {
                Ok(s) => {
                    println!(
                        "   Fleet: {} active alerts, {} resolved today, {} pending complaints",
                        s.active_alerts, s.resolved_today, s.pending_complaints
                    );
                }
                Err(e) => {
                    eprintln!("✗ Summary error: {}", e);
                }
            }

            // Regenerate the forecast each cycle so operators see schedule
            // pressure building before collection day.
            let bundle = generate_7day_forecast(Utc::now().date_naive());
            let heavy_days = summary::heavy_rain_days(&bundle);
            println!(
                "   Forecast: {:?} collection priority, {} heavy rain day(s) ahead",
                bundle.overall_priority, heavy_days
            );
            if let Some(wettest) = bundle
                .forecast
                .iter()
                .max_by(|a, b| a.rainfall_mm.total_cmp(&b.rainfall_mm))
            {
                println!(
                    "   Wettest day {}: {:.1} mm ({})",
                    wettest.date,
                    wettest.rainfall_mm,
                    classify_rainfall(wettest.rainfall_mm)
                );
            }

            // Sleep until next poll interval
            let elapsed = (Utc::now() - start).num_seconds();
            let sleep_seconds = (self.config.poll_interval_minutes * 60) as i64 - elapsed;

            if sleep_seconds > 0 {
                std::thread::sleep(std::time::Duration::from_secs(sleep_seconds as u64));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

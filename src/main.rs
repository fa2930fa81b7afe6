//! Bin Monitoring Service - Main Daemon
//!
//! A server-side daemon that continuously:
//! 1. Re-scores the garbage bin fleet with the overflow risk predictor
//! 2. Writes active alerts for bins predicted to overflow
//! 3. Serves the deterministic 7-day rainfall forecast over HTTP
//!
//! Usage:
//!   cargo run --release                    # Start daemon without HTTP endpoint
//!   cargo run --release -- --endpoint 8080 # Start with HTTP endpoint on port 8080
//!   cargo run --release -- --once          # Run a single scoring sweep and exit
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string

use binmon_service::config;
use binmon_service::daemon::Daemon;
use binmon_service::endpoint;
use std::env;

fn main() {
    println!("🗑  Bin Monitoring Service");
    println!("==========================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;
    let mut run_once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    endpoint_port = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            "--once" => {
                run_once = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT] [--once]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load service configuration (binmon.toml, defaults if absent)
    let service_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Command-line port overrides the configured one
    let endpoint_port = endpoint_port.or(service_config.endpoint_port);

    // Create daemon from the configured poll cadence
    let mut daemon = Daemon::with_config(binmon_service::daemon::DaemonConfig {
        poll_interval_minutes: service_config.poll_interval_minutes,
    });

    // Initialize: validate database schema and check the fleet
    println!("📊 Initializing daemon...");
    match daemon.initialize() {
        Ok(bin_count) => {
            println!("✓ Daemon initialized ({} bins tracked)\n", bin_count);
        }
        Err(e) => {
            eprintln!("\n❌ Initialization failed: {}\n", e);
            std::process::exit(1);
        }
    }

    // Single-sweep mode for cron-style deployments
    if run_once {
        match daemon.run_sweep() {
            Ok(stats) => {
                println!(
                    "✓ Sweep complete: {} bins scored, {} alerts raised",
                    stats.bins_scored, stats.alerts_raised
                );
                return;
            }
            Err(e) => {
                eprintln!("❌ Sweep failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Start HTTP endpoint if requested (in background thread)
    if let Some(port) = endpoint_port {
        println!("🚀 Starting HTTP endpoint server...");
        let location = service_config.location.clone();
        let workers = service_config.endpoint_workers;

        std::thread::spawn(move || {
            if let Err(e) = endpoint::start_endpoint_server(port, location, workers) {
                eprintln!("❌ Endpoint server error: {}", e);
            }
        });
    }

    // Run the main monitoring loop
    println!("🔄 Starting continuous monitoring loop...");
    println!("   Poll interval: {} minutes", daemon.poll_interval_minutes());
    println!("   Press Ctrl+C to stop\n");

    if let Err(e) = daemon.run() {
        eprintln!("\n❌ Daemon error: {}", e);
        std::process::exit(1);
    }
}

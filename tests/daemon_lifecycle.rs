/// Integration tests for daemon lifecycle behavior
///
/// These tests verify the daemon's database-facing path: schema
/// validation on startup, alert persistence from a scoring sweep, and
/// alert resolution. They require a live database and are ignored by
/// default.
///
/// Prerequisites:
/// - PostgreSQL running with binmon_db database
/// - DATABASE_URL set in .env
/// - sql/001_civic_schema.sql applied
///
/// Run with: cargo test --test daemon_lifecycle -- --ignored --test-threads=1

use binmon_service::db;
use binmon_service::model::{AlertStatus, NewAlert};
use chrono::Utc;
use postgres::{Client, NoTls};
use std::env;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn setup_test_db() -> Client {
    dotenv::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Client::connect(&database_url, NoTls).expect("Failed to connect to test database")
}

fn cleanup_test_data(client: &mut Client) {
    // Clean up test data between tests
    let _ = client.execute("DELETE FROM civic.alerts WHERE bin_id LIKE 'TEST%'", &[]);
    let _ = client.execute("DELETE FROM civic.garbage_bins WHERE id LIKE 'TEST%'", &[]);
}

fn insert_test_bin(client: &mut Client, id: &str, level: f64) {
    client
        .execute(
            "INSERT INTO civic.garbage_bins
                 (id, location, area_type, current_garbage_level,
                  complaints_last_week, last_emptied_date, capacity_days)
             VALUES ($1, 'Test Ward', 'residential', $2, 0, CURRENT_DATE - 2, 7)",
            &[&id, &rust_decimal::Decimal::try_from(level).unwrap()],
        )
        .expect("test bin insert should succeed");
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

#[test]
#[ignore] // Only run when database is available
fn test_daemon_validates_civic_schema_on_startup() {
    let result = db::connect_and_verify(&["civic"]);
    assert!(
        result.is_ok(),
        "Daemon should successfully verify the civic schema exists"
    );
}

#[test]
#[ignore] // Only run when database is available
fn test_daemon_fails_gracefully_when_schema_missing() {
    let result = db::connect_and_verify(&["nonexistent_schema"]);

    assert!(result.is_err(), "Daemon should detect and report missing schemas");

    if let Err(error) = result {
        let error_msg = error.to_string();
        assert!(
            error_msg.contains("nonexistent_schema"),
            "Error message should identify the missing schema"
        );
    }
}

// ---------------------------------------------------------------------------
// Alert persistence
// ---------------------------------------------------------------------------

#[test]
#[ignore] // Only run when database is available
fn test_alert_insert_and_resolve_round_trip() {
    let mut client = setup_test_db();
    cleanup_test_data(&mut client);
    insert_test_bin(&mut client, "TEST-overflow", 95.0);

    let new_alert = NewAlert {
        bin_id: "TEST-overflow".to_string(),
        message: "URGENT: Immediate collection required. Overflow imminent!".to_string(),
        predicted_days_left: 0,
        status: AlertStatus::Active,
    };
    db::insert_alert(&mut client, &new_alert).expect("insert should succeed");

    let alerts = db::fetch_alerts(&mut client).expect("fetch should succeed");
    let stored = alerts
        .iter()
        .find(|a| a.bin_id == "TEST-overflow")
        .expect("inserted alert should be readable");
    assert_eq!(stored.status, AlertStatus::Active);
    assert_eq!(stored.predicted_days_left, Some(0));

    let resolved = db::resolve_alert(&mut client, stored.id, Utc::now())
        .expect("resolve should succeed");
    assert!(resolved, "active alert should be resolvable");

    // Resolving twice is a no-op.
    let resolved_again = db::resolve_alert(&mut client, stored.id, Utc::now())
        .expect("second resolve should not error");
    assert!(!resolved_again, "already-resolved alert should not match");

    cleanup_test_data(&mut client);
}

#[test]
#[ignore] // Only run when database is available
fn test_fetched_bins_round_trip_numeric_columns() {
    let mut client = setup_test_db();
    cleanup_test_data(&mut client);
    insert_test_bin(&mut client, "TEST-numeric", 62.5);

    let bins = db::fetch_bins(&mut client).expect("fetch should succeed");
    let stored = bins
        .iter()
        .find(|b| b.id == "TEST-numeric")
        .expect("inserted bin should be readable");
    assert!((stored.current_garbage_level - 62.5).abs() < 1e-9);
    assert!((stored.capacity_days - 7.0).abs() < 1e-9);

    cleanup_test_data(&mut client);
}

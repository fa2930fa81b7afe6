/// HTTP endpoint for the rainfall forecast
///
/// Serves the 7-day collection-priority forecast to the dashboard front
/// end. Browser clients call this cross-origin, so every response carries
/// permissive CORS headers and OPTIONS preflights get an empty 200.
///
/// Endpoints:
/// - GET /rainfall_prediction - 7-day forecast with overall priority
/// - GET /health - Service health check

use crate::model::{CollectionPriority, DayForecast};
use crate::predict::rainfall::generate_7day_forecast;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use threadpool::ThreadPool;

/// Model label reported alongside every forecast payload.
const FORECAST_MODEL: &str = "Seasonal Pattern Simulation v1.0";

const CORS_ALLOW_ORIGIN: &str = "*";
const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Complete forecast response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Vec<DayForecast>,
    pub overall_priority: CollectionPriority,
    pub location: String,
    pub generated_at: String,
    pub model: String,
}

/// Builds the forecast payload for "now".
pub fn build_forecast_response(location: &str) -> ForecastResponse {
    let now = Utc::now();
    let bundle = generate_7day_forecast(now.date_naive());

    ForecastResponse {
        forecast: bundle.forecast,
        overall_priority: bundle.overall_priority,
        location: location.to_string(),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        model: FORECAST_MODEL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Preflight,
    Forecast,
    Health,
    NotFound,
}

fn resolve_route(method: &tiny_http::Method, url: &str) -> Route {
    if *method == tiny_http::Method::Options {
        return Route::Preflight;
    }
    match url {
        "/rainfall_prediction" => Route::Forecast,
        "/health" => Route::Health,
        _ => Route::NotFound,
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port.
///
/// Requests are handled on a worker pool so a slow client cannot stall
/// the accept loop.
pub fn start_endpoint_server(port: u16, location: String, workers: usize) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    let pool = ThreadPool::new(workers.max(1));

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /rainfall_prediction - 7-day collection forecast");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let location = location.clone();
        pool.execute(move || handle_request(request, &location));
    }

    Ok(())
}

/// Route a single request and send the response.
fn handle_request(request: tiny_http::Request, location: &str) {
    let route = resolve_route(request.method(), request.url());

    let response = match route {
        Route::Preflight => preflight_response(),
        Route::Forecast => handle_forecast(location),
        Route::Health => handle_health(),
        Route::NotFound => create_response(
            404,
            serde_json::json!({
                "error": "Not found",
                "available_endpoints": ["/health", "/rainfall_prediction"]
            }),
        ),
    };

    if let Err(e) = request.respond(response) {
        eprintln!("Failed to send response: {}", e);
    }
}

/// Handle /rainfall_prediction endpoint
///
/// Generation is a total function, but the transport wrapper still
/// converts any panic into a structured 500 so a raw stack trace never
/// crosses the HTTP boundary.
fn handle_forecast(location: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    match std::panic::catch_unwind(|| build_forecast_response(location)) {
        Ok(payload) => create_response(200, serde_json::to_value(&payload).unwrap()),
        Err(_) => create_response(
            500,
            serde_json::json!({ "error": "Forecast generation failed" }),
        ),
    }
}

/// Handle /health endpoint
fn handle_health() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "binmon_service",
            "version": "0.1.0"
        }),
    )
}

/// Empty-body CORS acknowledgement for OPTIONS preflights
fn preflight_response() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut response = tiny_http::Response::from_data(Vec::new()).with_status_code(200);
    for header in cors_headers() {
        response.add_header(header);
    }
    response
}

/// Create HTTP response with JSON body and CORS headers
fn create_response(
    status_code: u16,
    json: serde_json::Value,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap();
    let bytes = body.into_bytes();

    let mut response = tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        );

    for header in cors_headers() {
        response.add_header(header);
    }
    response
}

fn cors_headers() -> Vec<tiny_http::Header> {
    vec![
        tiny_http::Header::from_bytes(
            &b"Access-Control-Allow-Origin"[..],
            CORS_ALLOW_ORIGIN.as_bytes(),
        )
        .unwrap(),
        tiny_http::Header::from_bytes(
            &b"Access-Control-Allow-Headers"[..],
            CORS_ALLOW_HEADERS.as_bytes(),
        )
        .unwrap(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

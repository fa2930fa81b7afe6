/// Prediction engines.
///
/// Two independent, pure, stateless computations:
/// - `risk` — scores a bin snapshot into an overflow risk level and an
///   estimated days-until-overflow.
/// - `rainfall` — generates a deterministic 7-day rainfall forecast used to
///   prioritize collection runs.
///
/// Neither touches the database or the network; both are safe to call
/// concurrently from any thread.

pub mod rainfall;
pub mod risk;

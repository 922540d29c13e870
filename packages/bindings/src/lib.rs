use napi::Result as NapiResult;
use napi_derive::napi;
use krediplus_core::simulator::{self, SimulationInput, SimulationRequest, SimulatorConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Widget estimate: `{principal, monthly_rate_pct, term_months}` in,
/// `{monthly_payment, total_to_pay, total_interest}` out.
#[napi]
pub fn simulate_credit(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = input.simulate().map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quote_credit(config_json: String, request_json: String) -> NapiResult<String> {
    let config: SimulatorConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let request: SimulationRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let output =
        simulator::quote(&config, request.amount, request.term_months).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_simulation(config_json: String, request_json: String) -> NapiResult<String> {
    let config: SimulatorConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let request: SimulationRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let report = simulator::validate_parameters(&config, request.amount, request.term_months);
    serde_json::to_string(&report).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulator configuration
// ---------------------------------------------------------------------------

/// Normalises the offered terms and checks every policy rule; returns the
/// normalised configuration.
#[napi]
pub fn validate_simulator_config(config_json: String) -> NapiResult<String> {
    let raw: SimulatorConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let mut config = SimulatorConfig::new(
        raw.monthly_rate_pct,
        raw.min_amount,
        raw.max_amount,
        raw.available_terms,
    );
    config.id = raw.id;
    config.is_active = raw.is_active;
    config.created_at = raw.created_at;
    config.validate().map_err(to_napi_error)?;
    serde_json::to_string(&config).map_err(to_napi_error)
}

#[napi]
pub fn default_simulator_config() -> NapiResult<String> {
    serde_json::to_string(&SimulatorConfig::default()).map_err(to_napi_error)
}

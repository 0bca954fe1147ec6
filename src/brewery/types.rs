use serde::Deserialize;

/// One kettle as reported by `GET /api/kettle/state`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KettleState {
    /// Whether the PID loop is driving the heater.
    pub automatic: bool,
    /// PID target temperature in °C.
    pub target_temp: f64,
}

//! API request, response, and query types.

use serde::{Deserialize, Serialize};

use crate::sim::kpi::RunSummary;
use crate::sim::types::{EnergyRecord, Mode, TickOutput};

/// Engine status with the latest tick and a summary of the run so far.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub mode: Mode,
    /// Persistent battery level (%).
    pub battery_level: f32,
    /// Ticks produced so far.
    pub ticks: usize,
    /// Most recent tick, absent before the first one.
    pub latest: Option<TickOutput>,
    pub summary: RunSummary,
}

/// Energy record tagged with its position in the run.
#[derive(Debug, Serialize)]
pub struct TelemetryRecord {
    /// Zero-based tick index.
    pub index: usize,
    #[serde(flatten)]
    pub record: EnergyRecord,
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start index (inclusive).
    pub from: Option<usize>,
    /// End index (inclusive).
    pub to: Option<usize>,
}

/// Body of `PUT /mode`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeRequest {
    /// `"online"` or `"offline"`.
    pub mode: String,
    /// Weather service key for online mode.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::month_start;
    use crate::sim::engine::fallback_record;

    #[test]
    fn telemetry_record_flattens_energy_fields() {
        let rec = TelemetryRecord {
            index: 3,
            record: fallback_record(month_start(2025, 6).unwrap()),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["index"], 3);
        assert!(json.get("solar_gen_kW").is_some());
        assert!(json.get("record").is_none());
    }

    #[test]
    fn mode_request_api_key_is_optional() {
        let req: ModeRequest = serde_json::from_str(r#"{"mode":"offline"}"#).unwrap();
        assert_eq!(req.mode, "offline");
        assert!(req.api_key.is_none());
        let req: ModeRequest =
            serde_json::from_str(r#"{"mode":"online","apiKey":"abc"}"#).unwrap();
        assert_eq!(req.api_key.as_deref(), Some("abc"));
    }
}

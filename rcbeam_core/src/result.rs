//! Result payloads returned by the calculation service.
//!
//! Field names match the service's JSON exactly, so bodies deserialize
//! verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which remote operation produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultKind {
    #[serde(rename = "is456")]
    Is456,
    #[serde(rename = "nn")]
    Nn,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Is456 => "is456",
            ResultKind::Nn => "nn",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code-based capacity breakdown
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Is456Result {
    /// Gross ultimate load (kN)
    pub Wu_kN_gross: f64,
    /// Ultimate load net of self weight (kN)
    pub Wu_kN_net: f64,
    /// Flexural moment capacity (kN·m)
    pub Mu_kNm: f64,
    /// Shear capacity (kN)
    pub Vu_kN: f64,
    /// Effective depth (mm)
    pub d_mm: f64,
    /// Tension steel ratio (%)
    pub pt_percent: f64,
    /// Nominal shear stress (MPa)
    pub tau_v: f64,
    /// Design shear strength of concrete (MPa)
    pub tau_c: f64,
    /// Maximum shear stress (MPa)
    pub tau_c_max: f64,
    /// Governing failure mode tag ("Flexural", "Shear", "Combined")
    pub mode: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Neural-network capacity prediction
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NnPrediction {
    /// Predicted net capacity (kN)
    pub predicted_capacity_kN: f64,
}

/// A successful response, tagged by the operation that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result")]
pub enum CalcOutcome {
    #[serde(rename = "is456")]
    Is456(Is456Result),
    #[serde(rename = "nn")]
    Nn(NnPrediction),
}

impl CalcOutcome {
    pub fn kind(&self) -> ResultKind {
        match self {
            CalcOutcome::Is456(_) => ResultKind::Is456,
            CalcOutcome::Nn(_) => ResultKind::Nn,
        }
    }
}

/// `GET /health` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `GET /` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub endpoints: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is456_body_parses_verbatim() {
        let body = json!({
            "Wu_kN_gross": 120.5,
            "Wu_kN_net": 110.2,
            "Mu_kNm": 45.3,
            "Vu_kN": 60.1,
            "d_mm": 420.5,
            "pt_percent": 1.25,
            "tau_v": 0.85,
            "tau_c": 0.62,
            "tau_c_max": 2.8,
            "mode": "Flexure",
            "warnings": ["τv exceeds τc,max → unsafe section."]
        });
        let result: Is456Result = serde_json::from_value(body).unwrap();
        assert_eq!(result.Wu_kN_gross, 120.5);
        assert_eq!(result.mode, "Flexure");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_missing_warnings_default_to_empty() {
        let body = json!({
            "Wu_kN_gross": 1.0, "Wu_kN_net": 1.0, "Mu_kNm": 1.0, "Vu_kN": 1.0,
            "d_mm": 1.0, "pt_percent": 1.0, "tau_v": 1.0, "tau_c": 1.0,
            "tau_c_max": 1.0, "mode": "Shear"
        });
        let result: Is456Result = serde_json::from_value(body).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_outcome_kind_tag() {
        let outcome = CalcOutcome::Nn(NnPrediction {
            predicted_capacity_kN: 95.333,
        });
        assert_eq!(outcome.kind(), ResultKind::Nn);
        assert_eq!(outcome.kind().as_str(), "nn");

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["kind"], json!("nn"));
        assert_eq!(value["result"]["predicted_capacity_kN"], json!(95.333));
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus =
            serde_json::from_value(json!({"status": "healthy", "model_loaded": true})).unwrap();
        assert!(health.is_healthy());
    }
}

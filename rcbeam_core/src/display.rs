//! # Display Model
//!
//! Everything the presentation layer shows, decided without a widget
//! toolkit: header text, action button labels and enabled state, and the
//! result panel contents. The GUI and CLI only lay these out.
//!
//! Numeric precision is fixed per value:
//! - capacities, moment, steel ratio, τc,max: 2 decimals
//! - effective depth: 1 decimal
//! - τv, τc: 3 decimals

use crate::result::{CalcOutcome, Is456Result, NnPrediction, ResultKind};

pub const APP_TITLE: &str = "RC Beam Bearing Capacity";
pub const APP_SUBTITLE: &str = "IS-456 Code & Neural Network Predictions";

/// The two submit buttons of the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Calculate,
    Predict,
}

impl ActionButton {
    pub const ALL: [ActionButton; 2] = [ActionButton::Calculate, ActionButton::Predict];

    /// Button caption, switching to the in-progress label while loading
    pub fn label(&self, loading: bool) -> &'static str {
        match (self, loading) {
            (ActionButton::Calculate, false) => "Calculate using IS-456",
            (ActionButton::Calculate, true) => "Calculating...",
            (ActionButton::Predict, false) => "Predict using Neural Network",
            (ActionButton::Predict, true) => "Predicting...",
        }
    }

    /// Both buttons are disabled for the whole time a request is in flight
    pub fn enabled(&self, loading: bool) -> bool {
        !loading
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            ActionButton::Calculate => ResultKind::Is456,
            ActionButton::Predict => ResultKind::Nn,
        }
    }
}

/// A labelled value, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Contents of the result panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    /// Nothing to show yet
    Empty,
    Error {
        message: String,
    },
    Prediction {
        heading: &'static str,
        capacity: Metric,
    },
    Is456 {
        heading: &'static str,
        /// Gross capacity, net capacity, failure mode
        cards: Vec<Metric>,
        details: Vec<Metric>,
        /// Empty means the warnings section is not rendered
        warnings: Vec<String>,
    },
}

impl ResultPanel {
    /// Decide what the panel shows. An error always wins over a result.
    pub fn build(result: Option<&CalcOutcome>, error: Option<&str>) -> Self {
        if let Some(message) = error {
            return ResultPanel::Error {
                message: message.to_string(),
            };
        }
        match result {
            None => ResultPanel::Empty,
            Some(CalcOutcome::Nn(prediction)) => Self::prediction(prediction),
            Some(CalcOutcome::Is456(result)) => Self::is456(result),
        }
    }

    fn prediction(prediction: &NnPrediction) -> Self {
        ResultPanel::Prediction {
            heading: "Neural Network Prediction",
            capacity: Metric::new(
                "Predicted Net Capacity",
                kilonewtons(prediction.predicted_capacity_kN),
            ),
        }
    }

    fn is456(result: &Is456Result) -> Self {
        ResultPanel::Is456 {
            heading: "IS-456 Calculation Results",
            cards: vec![
                Metric::new("Gross Capacity", kilonewtons(result.Wu_kN_gross)),
                Metric::new("Net Capacity", kilonewtons(result.Wu_kN_net)),
                Metric::new("Failure Mode", result.mode.clone()),
            ],
            details: vec![
                Metric::new("Flexural Moment (Mu)", format!("{:.2} kN·m", result.Mu_kNm)),
                Metric::new("Shear Capacity (Vu)", kilonewtons(result.Vu_kN)),
                Metric::new("Effective Depth (d)", format!("{:.1} mm", result.d_mm)),
                Metric::new("Steel Ratio (pₜ)", format!("{:.2}%", result.pt_percent)),
                Metric::new("Shear Stress (τv)", format!("{:.3} MPa", result.tau_v)),
                Metric::new("Concrete Shear (τc)", format!("{:.3} MPa", result.tau_c)),
                Metric::new("Max Shear (τc,max)", format!("{:.2} MPa", result.tau_c_max)),
            ],
            warnings: result.warnings.clone(),
        }
    }

    /// Plain-text rendering, one line per entry
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            ResultPanel::Empty => Vec::new(),
            ResultPanel::Error { message } => vec!["Error".to_string(), message.clone()],
            ResultPanel::Prediction { heading, capacity } => vec![
                heading.to_string(),
                format!("{}: {}", capacity.label, capacity.value),
            ],
            ResultPanel::Is456 {
                heading,
                cards,
                details,
                warnings,
            } => {
                let mut lines = vec![heading.to_string()];
                lines.extend(cards.iter().map(|m| format!("{}: {}", m.label, m.value)));
                lines.push("Detailed Analysis".to_string());
                lines.extend(details.iter().map(|m| format!("  {}: {}", m.label, m.value)));
                if !warnings.is_empty() {
                    lines.push("Warnings".to_string());
                    lines.extend(warnings.iter().map(|w| format!("  - {}", w)));
                }
                lines
            }
        }
    }
}

fn kilonewtons(value: f64) -> String {
    format!("{:.2} kN", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_is456(warnings: Vec<String>) -> CalcOutcome {
        CalcOutcome::Is456(Is456Result {
            Wu_kN_gross: 120.5,
            Wu_kN_net: 110.2,
            Mu_kNm: 45.3,
            Vu_kN: 60.1,
            d_mm: 420.5,
            pt_percent: 1.25,
            tau_v: 0.85,
            tau_c: 0.62,
            tau_c_max: 2.8,
            mode: "Flexure".to_string(),
            warnings,
        })
    }

    #[test]
    fn test_is456_formatting_without_warnings() {
        let outcome = sample_is456(Vec::new());
        let panel = ResultPanel::build(Some(&outcome), None);

        let ResultPanel::Is456 { cards, details, warnings, .. } = &panel else {
            panic!("expected IS-456 panel, got {:?}", panel);
        };
        assert_eq!(cards[0].value, "120.50 kN");
        assert_eq!(cards[1].value, "110.20 kN");
        assert_eq!(cards[2].value, "Flexure");
        assert_eq!(details[0].value, "45.30 kN·m");
        assert_eq!(details[1].value, "60.10 kN");
        assert_eq!(details[2].value, "420.5 mm");
        assert_eq!(details[3].value, "1.25%");
        assert_eq!(details[4].value, "0.850 MPa");
        assert_eq!(details[5].value, "0.620 MPa");
        assert_eq!(details[6].value, "2.80 MPa");
        assert!(warnings.is_empty());
        assert!(!panel.to_lines().iter().any(|l| l == "Warnings"));
    }

    #[test]
    fn test_is456_warnings_listed_in_order() {
        let outcome = sample_is456(vec![
            "τv exceeds τc,max → unsafe section.".to_string(),
            "Beam fails under self weight!".to_string(),
        ]);
        let lines = ResultPanel::build(Some(&outcome), None).to_lines();
        let start = lines.iter().position(|l| l == "Warnings").unwrap();
        assert_eq!(lines[start + 1], "  - τv exceeds τc,max → unsafe section.");
        assert_eq!(lines[start + 2], "  - Beam fails under self weight!");
    }

    #[test]
    fn test_prediction_has_no_breakdown() {
        let outcome = CalcOutcome::Nn(NnPrediction {
            predicted_capacity_kN: 95.333,
        });
        let panel = ResultPanel::build(Some(&outcome), None);
        assert_eq!(
            panel,
            ResultPanel::Prediction {
                heading: "Neural Network Prediction",
                capacity: Metric::new("Predicted Net Capacity", "95.33 kN".to_string()),
            }
        );
        assert!(!panel.to_lines().iter().any(|l| l.contains("Detailed Analysis")));
    }

    #[test]
    fn test_error_takes_precedence() {
        let outcome = sample_is456(Vec::new());
        let panel = ResultPanel::build(Some(&outcome), Some("fck must be positive"));
        assert_eq!(
            panel,
            ResultPanel::Error {
                message: "fck must be positive".to_string()
            }
        );
        assert_eq!(panel.to_lines(), vec!["Error", "fck must be positive"]);
    }

    #[test]
    fn test_nothing_to_show() {
        let panel = ResultPanel::build(None, None);
        assert_eq!(panel, ResultPanel::Empty);
        assert!(panel.to_lines().is_empty());
    }

    #[test]
    fn test_button_labels_and_state() {
        assert_eq!(ActionButton::Calculate.label(false), "Calculate using IS-456");
        assert_eq!(ActionButton::Calculate.label(true), "Calculating...");
        assert_eq!(ActionButton::Predict.label(false), "Predict using Neural Network");
        assert_eq!(ActionButton::Predict.label(true), "Predicting...");

        for button in ActionButton::ALL {
            assert!(!button.enabled(true));
            assert!(button.enabled(false));
        }
        assert_eq!(ActionButton::Predict.kind(), ResultKind::Nn);
    }
}

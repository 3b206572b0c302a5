//! Status Bar (Bottom)
//!
//! Displays:
//! - Service base URL
//! - Result of the last health probe (click to re-check)
//! - Request in progress indicator

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use rcbeam_core::result::ResultKind;

use crate::{Message, ServiceStatus};

/// Render the status bar
pub fn view<'a>(
    base_url: &'a str,
    status: &'a ServiceStatus,
    in_flight: Option<ResultKind>,
) -> Element<'a, Message> {
    let (status_text, color): (String, [f32; 3]) = match status {
        ServiceStatus::Checking => ("Checking service...".to_string(), [0.5, 0.5, 0.5]),
        ServiceStatus::Online(health) if health.is_healthy() => {
            let model = if health.model_loaded { "model loaded" } else { "model not loaded" };
            (format!("Service {} ({})", health.status, model), [0.2, 0.6, 0.2])
        }
        ServiceStatus::Online(health) => (format!("Service {}", health.status), [0.9, 0.5, 0.0]),
        ServiceStatus::Offline(reason) => (format!("Service unreachable: {}", reason), [0.8, 0.2, 0.2]),
    };

    let activity = match in_flight {
        Some(ResultKind::Is456) => "Running IS-456 calculation...",
        Some(ResultKind::Nn) => "Running neural network prediction...",
        None => "",
    };

    row![
        text(base_url).size(10),
        Space::new().width(12),
        button(text(status_text).size(10).color(color))
            .on_press(Message::CheckHealth)
            .padding(0)
            .style(button::text),
        Space::new().width(Length::Fill),
        text(activity).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}

//! Result display (right panel)
//!
//! Shows one of:
//! - Error message
//! - Neural network prediction (single value)
//! - IS-456 breakdown: capacity cards, detailed analysis, warnings
//!
//! Nothing is rendered inside the panel before the first result.

use iced::widget::{column, container, row, scrollable, text, Column, Space};
use iced::{Element, Length};

use rcbeam_core::display::{Metric, ResultPanel};

use crate::Message;

/// Render the result panel
pub fn view(panel: ResultPanel) -> Element<'static, Message> {
    let content: Column<'static, Message> = match panel {
        ResultPanel::Empty => column![],
        ResultPanel::Error { message } => column![
            text("Error").size(14),
            Space::new().height(8),
            text(message).size(12).color([0.8, 0.2, 0.2]),
        ],
        ResultPanel::Prediction { heading, capacity } => column![
            text(heading).size(16),
            Space::new().height(12),
            text(capacity.label).size(11).color([0.5, 0.5, 0.5]),
            text(capacity.value).size(24),
        ],
        ResultPanel::Is456 {
            heading,
            cards,
            details,
            warnings,
        } => view_is456(heading, cards, details, warnings),
    };

    container(scrollable(content.padding(8)))
        .width(Length::FillPortion(55))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_is456(
    heading: &'static str,
    cards: Vec<Metric>,
    details: Vec<Metric>,
    warnings: Vec<String>,
) -> Column<'static, Message> {
    let mut card_row = row![].spacing(10);
    for card in cards {
        card_row = card_row.push(
            container(
                column![
                    text(card.label).size(10).color([0.5, 0.5, 0.5]),
                    text(card.value).size(16),
                ]
                .spacing(4),
            )
            .padding(8)
            .width(Length::Fill)
            .style(container::bordered_box),
        );
    }

    let mut detail_rows: Column<'static, Message> = column![].spacing(4);
    for detail in details {
        detail_rows = detail_rows.push(row![
            text(detail.label).size(11).width(Length::Fill),
            text(detail.value).size(11),
        ]);
    }

    let mut content = column![
        text(heading).size(16),
        Space::new().height(12),
        card_row,
        Space::new().height(15),
        text("Detailed Analysis").size(14),
        Space::new().height(8),
        detail_rows,
    ];

    if !warnings.is_empty() {
        let mut warning_list: Column<'static, Message> = column![].spacing(4);
        for warning in warnings {
            warning_list = warning_list.push(text(warning).size(11).color([0.9, 0.5, 0.0]));
        }
        content = content
            .push(Space::new().height(15))
            .push(text("Warnings").size(14))
            .push(Space::new().height(6))
            .push(warning_list);
    }

    content
}

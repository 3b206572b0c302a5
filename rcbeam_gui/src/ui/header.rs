//! Header banner

use iced::widget::{column, row, text, Space};
use iced::{Alignment, Element, Length};

use rcbeam_core::display::{APP_SUBTITLE, APP_TITLE};

use crate::Message;

/// Render the application header
pub fn view() -> Element<'static, Message> {
    row![
        column![
            text(APP_TITLE).size(28),
            text(APP_SUBTITLE).size(13).color([0.5, 0.5, 0.5]),
        ]
        .spacing(2),
        Space::new().width(Length::Fill),
    ]
    .align_y(Alignment::Center)
    .into()
}

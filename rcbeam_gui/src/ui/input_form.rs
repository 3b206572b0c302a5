//! Input form (left panel)
//!
//! Displays:
//! - Material Properties (fck, fy pick lists)
//! - Beam Dimensions (b, D, L, load type)
//! - Reinforcement Details (main bars, stirrups)
//! - Range advisories for out-of-range values
//! - Calculate / Predict buttons, disabled while a request is in flight or
//!   while a field holds text that is not a number

use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, text_input, Column, Space,
};
use iced::{Alignment, Element, Length, Padding};

use rcbeam_core::display::ActionButton;
use rcbeam_core::form::BeamForm;
use rcbeam_core::params::{ConcreteGrade, Field, FormSection, LoadType, SteelGrade};

use crate::Message;

const LABEL_WIDTH: f32 = 190.0;

/// Render the input form
pub fn view(form: &BeamForm, loading: bool) -> Element<'_, Message> {
    let mut sections: Column<'_, Message> = column![].spacing(14);

    for section in FormSection::ALL {
        let mut fields: Column<'_, Message> = column![text(section.title()).size(14)].spacing(6);
        for field in section.fields() {
            fields = fields.push(view_field(form, field));
        }
        sections = sections.push(fields);
    }

    let advisories = form.advisories();
    if !advisories.is_empty() {
        let mut notes: Column<'_, Message> = column![].spacing(2);
        for advisory in advisories {
            notes = notes.push(text(advisory.message()).size(10).color([0.9, 0.5, 0.0]));
        }
        sections = sections.push(notes);
    }

    let blocked = form.has_invalid_fields();
    if blocked {
        sections = sections.push(
            text("Correct the highlighted fields to submit")
                .size(10)
                .color([0.8, 0.2, 0.2]),
        );
    }

    let panel = column![
        sections,
        Space::new().height(15),
        view_buttons(loading, blocked),
    ]
    .padding(8);

    container(scrollable(panel))
        .width(Length::FillPortion(45))
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_field(form: &BeamForm, field: Field) -> Element<'_, Message> {
    let input = view_input(form, field);

    let hint = match field.range() {
        Some((min, max)) => format!("{}-{}", min, max),
        None => String::new(),
    };

    let mut line = column![row![
        text(field.label()).size(11).width(Length::Fixed(LABEL_WIDTH)),
        input,
        Space::new().width(6),
        text(hint).size(10).color([0.5, 0.5, 0.5]).width(Length::Fixed(70.0)),
    ]
    .align_y(Alignment::Center)];

    if let Some(error) = form.field_error(field) {
        line = line.push(text(error.to_string()).size(10).color([0.8, 0.2, 0.2]));
    }

    line.spacing(2).into()
}

/// Pick list for the closed option fields, text input for the rest
fn view_input(form: &BeamForm, field: Field) -> Element<'_, Message> {
    let params = form.params();
    match field {
        Field::Fck => pick_list(
            &ConcreteGrade::ALL[..],
            Some(params.fck),
            Message::ConcreteGradeSelected,
        )
        .width(Length::Fill)
        .text_size(11)
        .into(),
        Field::Fy => pick_list(
            &SteelGrade::ALL[..],
            Some(params.fy),
            Message::SteelGradeSelected,
        )
        .width(Length::Fill)
        .text_size(11)
        .into(),
        Field::LoadType => pick_list(
            &LoadType::ALL[..],
            Some(params.load_type),
            Message::LoadTypeSelected,
        )
        .width(Length::Fill)
        .text_size(11)
        .into(),
        Field::Width
        | Field::Depth
        | Field::Length
        | Field::MainDia
        | Field::MainCount
        | Field::StirrupDia
        | Field::Spacing => text_input("", form.raw(field))
            .on_input(move |s| Message::FieldChanged(field, s))
            .width(Length::Fill)
            .padding(4)
            .size(11)
            .into(),
    }
}

/// Render the action buttons. Disabled buttons get no press handler.
fn view_buttons(loading: bool, blocked: bool) -> Element<'static, Message> {
    row![
        view_action(ActionButton::Calculate, loading, blocked),
        view_action(ActionButton::Predict, loading, blocked),
        Space::new().width(Length::Fill),
        button(text("Reset").size(11))
            .on_press_maybe((!loading).then_some(Message::ResetForm))
            .padding(Padding::from([6, 12]))
            .style(button::text),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn view_action(action: ActionButton, loading: bool, blocked: bool) -> Element<'static, Message> {
    let style = if action == ActionButton::Calculate {
        button::primary
    } else {
        button::secondary
    };

    button(text(action.label(loading)).size(12))
        .on_press_maybe(
            (action.enabled(loading) && !blocked).then_some(Message::Submit(action.kind())),
        )
        .padding(Padding::from([6, 12]))
        .style(style)
        .into()
}

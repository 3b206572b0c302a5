//! # RC Beam GUI Application
//!
//! Form front-end for the RC beam calculation service, built with Iced
//! (Windows, macOS, Linux, WASM).
//!
//! The `App` struct is the application shell: it owns the form, the request
//! lifecycle and the service client, turns button presses into service calls
//! and feeds their outcomes back into the result panel.

mod ui;

use iced::widget::{column, container, row, rule, Space};
use iced::{Element, Length, Task};

use rcbeam_core::client::ServiceClient;
use rcbeam_core::display::{ResultPanel, APP_TITLE};
use rcbeam_core::errors::ServiceError;
use rcbeam_core::form::BeamForm;
use rcbeam_core::lifecycle::{Session, Ticket};
use rcbeam_core::params::{ConcreteGrade, Field, LoadType, SteelGrade};
use rcbeam_core::result::{CalcOutcome, HealthStatus, ResultKind};

/// Outcome of the last service health probe
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceStatus {
    Checking,
    Online(HealthStatus),
    Offline(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Form edits
    FieldChanged(Field, String),
    ConcreteGradeSelected(ConcreteGrade),
    SteelGradeSelected(SteelGrade),
    LoadTypeSelected(LoadType),
    ResetForm,

    // Requests
    Submit(ResultKind),
    Settled(Ticket, Result<CalcOutcome, ServiceError>),

    // Service status
    CheckHealth,
    HealthChecked(Result<HealthStatus, ServiceError>),
}

pub struct App {
    pub form: BeamForm,
    pub session: Session,
    pub client: ServiceClient,
    pub service_status: ServiceStatus,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        Self::with_client(ServiceClient::default())
    }

    fn with_client(client: ServiceClient) -> (Self, Task<Message>) {
        tracing::info!(base_url = client.base_url(), "starting RC beam GUI");
        let app = Self {
            form: BeamForm::new(),
            session: Session::new(),
            client,
            service_status: ServiceStatus::Checking,
        };
        let probe = app.health_probe();
        (app, probe)
    }

    fn health_probe(&self) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(async move { client.health().await }, Message::HealthChecked)
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn result_panel(&self) -> ResultPanel {
        ResultPanel::build(self.session.result(), self.session.error())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FieldChanged(field, raw) => {
                // Rejected text stays visible and is flagged by the form
                let _ = self.form.edit(field, raw);
                Task::none()
            }
            Message::ConcreteGradeSelected(grade) => {
                self.form.select_concrete_grade(grade);
                Task::none()
            }
            Message::SteelGradeSelected(grade) => {
                self.form.select_steel_grade(grade);
                Task::none()
            }
            Message::LoadTypeSelected(load_type) => {
                self.form.select_load_type(load_type);
                Task::none()
            }
            Message::ResetForm => {
                self.form.reset();
                Task::none()
            }
            Message::Submit(kind) => {
                if self.form.has_invalid_fields() {
                    tracing::debug!(%kind, "submit refused while fields hold invalid text");
                    return Task::none();
                }
                let ticket = self.session.begin(kind);
                let client = self.client.clone();
                let params = self.form.snapshot();
                Task::perform(
                    async move { client.submit(kind, params).await },
                    move |outcome| Message::Settled(ticket, outcome),
                )
            }
            Message::Settled(ticket, outcome) => {
                let outcome = outcome.map_err(|e| {
                    tracing::warn!(seq = ticket.seq, error = %e, "request failed");
                    e.user_message()
                });
                self.session.settle(ticket, outcome);
                Task::none()
            }
            Message::CheckHealth => {
                self.service_status = ServiceStatus::Checking;
                self.health_probe()
            }
            Message::HealthChecked(outcome) => {
                self.service_status = match outcome {
                    Ok(health) => ServiceStatus::Online(health),
                    Err(e) => {
                        tracing::warn!(error = %e, "health check failed");
                        ServiceStatus::Offline(e.to_string())
                    }
                };
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let content = row![
            ui::input_form::view(&self.form, self.is_loading()),
            Space::new().width(15),
            ui::result_display::view(self.result_panel()),
        ]
        .height(Length::Fill);

        let layout = column![
            ui::header::view(),
            rule::horizontal(1),
            content,
            rule::horizontal(1),
            ui::status_bar::view(
                self.client.base_url(),
                &self.service_status,
                self.session.loading_kind(),
            ),
        ]
        .spacing(8)
        .padding(12);

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rcbeam_core=info,rcbeam_gui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    console_error_panic_hook::set_once();
}

fn main() -> iced::Result {
    init_logging();

    iced::application(App::new, App::update, App::view)
        .title(APP_TITLE)
        .window_size((1100.0, 760.0))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcbeam_core::display::ActionButton;
    use rcbeam_core::errors::Operation;
    use rcbeam_core::lifecycle::RequestState;
    use rcbeam_core::result::NnPrediction;

    fn app() -> App {
        App::with_client(ServiceClient::new("http://127.0.0.1:9")).0
    }

    #[test]
    fn test_field_edit_updates_form() {
        let mut app = app();
        let _ = app.update(Message::FieldChanged(Field::Width, "300".to_string()));
        let _ = app.update(Message::LoadTypeSelected(LoadType::TwoPointLoad));
        assert_eq!(app.form.snapshot().b, 300.0);
        assert_eq!(app.form.snapshot().load_type, LoadType::TwoPointLoad);
    }

    #[test]
    fn test_buttons_disabled_only_while_loading() {
        let mut app = app();
        let _ = app.update(Message::Submit(ResultKind::Nn));
        assert!(app.is_loading());
        for button in ActionButton::ALL {
            assert!(!button.enabled(app.is_loading()));
        }

        let ticket = Ticket {
            seq: 1,
            kind: ResultKind::Nn,
        };
        let outcome = Ok(CalcOutcome::Nn(NnPrediction {
            predicted_capacity_kN: 95.333,
        }));
        let _ = app.update(Message::Settled(ticket, outcome));
        assert!(!app.is_loading());
        for button in ActionButton::ALL {
            assert!(button.enabled(app.is_loading()));
        }
        assert_eq!(app.result_panel().to_lines()[1], "Predicted Net Capacity: 95.33 kN");
    }

    #[test]
    fn test_form_view_builds_every_field() {
        let mut app = app();
        let _ = ui::input_form::view(&app.form, false);

        let _ = app.update(Message::FieldChanged(Field::MainCount, "x".to_string()));
        let _ = ui::input_form::view(&app.form, true);
        let _ = app.view();
    }

    #[test]
    fn test_submit_refused_while_field_invalid() {
        let mut app = app();
        let _ = app.update(Message::FieldChanged(Field::Width, "wide".to_string()));
        let _ = app.update(Message::Submit(ResultKind::Is456));
        assert!(!app.is_loading());
        assert_eq!(app.session.state(), &RequestState::Idle);

        let _ = app.update(Message::FieldChanged(Field::Width, "300".to_string()));
        let _ = app.update(Message::Submit(ResultKind::Is456));
        assert_eq!(app.session.loading_kind(), Some(ResultKind::Is456));
    }

    #[test]
    fn test_failure_shows_normalized_message() {
        let mut app = app();
        let _ = app.update(Message::Submit(ResultKind::Is456));
        let ticket = Ticket {
            seq: 1,
            kind: ResultKind::Is456,
        };
        let err = ServiceError::rejected(Operation::CalculateIs456, 500, None);
        let _ = app.update(Message::Settled(ticket, Err(err)));

        assert!(!app.is_loading());
        assert_eq!(
            app.result_panel(),
            ResultPanel::Error {
                message: "Calculation failed".to_string()
            }
        );
    }

    #[test]
    fn test_health_status_recorded() {
        let mut app = app();
        assert_eq!(app.service_status, ServiceStatus::Checking);

        let err = ServiceError::transport(Operation::Health, "connection refused");
        let _ = app.update(Message::HealthChecked(Err(err)));
        assert!(matches!(app.service_status, ServiceStatus::Offline(_)));
    }
}

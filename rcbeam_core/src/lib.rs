//! # rcbeam_core - RC Beam Capacity Client Core
//!
//! `rcbeam_core` holds everything the RC beam front-ends share: the parameter
//! bundle and its form state, the client for the remote calculation service,
//! the request lifecycle, and the display model of the result panel. It has
//! no engineering logic of its own; the IS-456 calculation and the neural
//! network prediction both run on the service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rcbeam_core::client::ServiceClient;
//! use rcbeam_core::display::ResultPanel;
//! use rcbeam_core::form::BeamForm;
//! use rcbeam_core::params::Field;
//! use rcbeam_core::result::ResultKind;
//!
//! # async fn run() {
//! let mut form = BeamForm::new();
//! form.edit(Field::Depth, "500").unwrap();
//!
//! let client = ServiceClient::default();
//! let panel = match client.submit(ResultKind::Is456, form.snapshot()).await {
//!     Ok(outcome) => ResultPanel::build(Some(&outcome), None),
//!     Err(e) => ResultPanel::build(None, Some(&e.user_message())),
//! };
//! for line in panel.to_lines() {
//!     println!("{}", line);
//! }
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Parameter bundle, fields, grades, load types
//! - [`form`] - Form state holder
//! - [`client`] - HTTP client for the calculation service
//! - [`result`] - Service response payloads
//! - [`lifecycle`] - Request lifecycle state machine
//! - [`display`] - Result panel and button display model
//! - [`config`] - Base URL and timeout resolution
//! - [`errors`] - Structured error types

pub mod client;
pub mod config;
pub mod display;
pub mod errors;
pub mod form;
pub mod lifecycle;
pub mod params;
pub mod result;

// Re-export commonly used types at crate root for convenience
pub use client::ServiceClient;
pub use errors::{FormError, Operation, ServiceError, ServiceResult};
pub use form::BeamForm;
pub use lifecycle::{RequestState, Session, Ticket};
pub use params::{BeamParameters, Field};
pub use result::{CalcOutcome, ResultKind};

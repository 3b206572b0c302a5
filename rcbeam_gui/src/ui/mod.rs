//! UI module for the RC beam GUI
//!
//! # Layout
//! - `header` - Title banner
//! - `input_form` - Left panel: material, dimension and reinforcement inputs plus the two actions
//! - `result_display` - Right panel: error, NN prediction or IS-456 breakdown
//! - `status_bar` - Bottom line: service URL and health

pub mod header;
pub mod input_form;
pub mod result_display;
pub mod status_bar;

//! Line protocol module
//!
//! This module contains the input message format read from the vision
//! pipeline and the user interface, its dispatch handlers, and the response
//! structures rendered for the presentation layer.

pub mod handlers;
pub mod messages;
pub mod responses;

pub use handlers::handle_input;
pub use messages::{parse_line, InputMessage};
pub use responses::{status_label, DisplayResponse};

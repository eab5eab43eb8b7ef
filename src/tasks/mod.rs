//! Background tasks module
//!
//! This module contains the event loop that drives the stopwatch and the
//! tasks that feed it input and render its output.

pub mod display_printer;
pub mod event_loop;
pub mod input_reader;

// Re-export main functions
pub use display_printer::{display_printer_task, OutputFormat};
pub use event_loop::event_loop_task;
pub use input_reader::input_reader_task;

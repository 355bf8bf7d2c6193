//! Display formatting for terminal output
//!
//! Provides utilities for formatting history rows and change payloads for
//! terminal display.

pub mod history;

pub use history::{format_change_payload, format_history_details, format_history_list};

//! User interface module - terminal output for the CLI.
//!
//! Only [`formatter`] lives here today; the CLI is non-interactive.

pub mod formatter;

pub use formatter::{
    display_error, display_module_report, display_modules, display_status, display_success,
    display_warning, format_decision, format_module_report,
};

//! # Commands
//!
//! One module per subcommand. Each `execute` returns the text to print so the
//! commands can be tested without capturing stdout.

pub mod compare;
pub mod settings;

pub use compare::CompareArgs;
pub use settings::{SettingsAction, SettingsArgs};

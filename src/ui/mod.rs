//! User interface and interaction
//!
//! This module contains the command-line surface: argument parsing,
//! terminal output and shell completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config, validate_cli_args};
pub use completion::{install_completion, print_completions};
pub use output::CheckSummary;

pub mod args;
pub mod completions;
pub mod handler;

pub use args::{Cli, Commands, Shell};
pub use handler::{handle_cli, handle_cli_to};

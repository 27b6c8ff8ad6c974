pub mod commands;
pub mod display;
pub mod types;

pub use types::{Cli, Commands};

/// Print a fatal error and exit non-zero.
pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("Error: {err:#}");
    std::process::exit(1);
}

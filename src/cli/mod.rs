// CLI module
// Command-line interface and argument parsing

pub(crate) mod args;

pub use args::{CliArgs, Command, ReplayArgs, ServeArgs};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Loads a `.env` file first (if present) so environment-backed options pick
/// it up. On invalid arguments or `--help`, clap prints its message and exits.
pub fn parse_args() -> CliArgs {
    dotenvy::dotenv().ok();
    CliArgs::parse()
}

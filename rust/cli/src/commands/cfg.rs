//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (default, environment, or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "small_blind": {
//!     "value": 1,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "starting_points": {
            "value": config.starting_points,
            "source": sources.starting_points,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "bot": {
            "value": config.bot,
            "source": sources.bot,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

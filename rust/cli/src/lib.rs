//! # holdem CLI Library
//!
//! Command-line driver for the Hold'em hand engine: simulate tables of bots,
//! deal and inspect hands, rank card pools and show configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand. Output streams are
//! passed in so commands can be driven from tests.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--hands", "10", "--bots", "baseline,random"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Play hands at one table of bots and report the chip counts
//! - `deal`: Deal hole cards and a full board for inspection
//! - `eval`: Rank one card pool, or several pools against each other
//! - `cfg`: Display current configuration settings
//!
//! ## Logging
//!
//! The binary installs a `tracing` subscriber (see [`logging`]) controlled by
//! the `HOLDEM_LOG` environment variable.

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, HoldemCli, COMMANDS};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command};

pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`]
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "eval", "AH", "KH", "QH", "JH", "10H"];
/// let mut out = Vec::new();
/// let code = holdem_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().starts_with("royal flush"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            hands,
            players,
            bots,
            seed,
            json,
        } => handle_sim_command(hands, players, bots, seed, json, out, err),
        Commands::Deal { players, seed } => handle_deal_command(players, seed, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            let _ = writeln!(err, "{}", e);
            let _ = writeln!(err, "Usage: holdem <command> [options]\n");
            let _ = writeln!(err, "Commands:");
            for c in COMMANDS {
                let _ = writeln!(err, "  {}", c);
            }
            let _ = writeln!(err, "\nFor full help, run: holdem --help");
            exit_code::ERROR
        }
    }
}

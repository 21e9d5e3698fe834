//! Command-line surface of the `holdem` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Multiplayer Texas Hold'em hand engine",
    propagate_version = true
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play hands at one table of bots
    Sim {
        #[arg(long)]
        hands: u32,
        /// Number of seats; ignored when --bots is given
        #[arg(long)]
        players: Option<usize>,
        /// Comma separated bot kinds, one per seat
        #[arg(long, value_delimiter = ',')]
        bots: Option<Vec<String>>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print every hand record as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Deal hole cards and a full board, then show each best hand
    Deal {
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Rank a 5 to 7 card pool, or several pools separated by --vs
    Eval {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        cards: Vec<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Subcommand names, listed in usage errors.
pub const COMMANDS: &[&str] = &["sim", "deal", "eval", "cfg"];

//! # holdem-ai: Bots for the Hold'em Engine
//!
//! Decision providers that can be seated at a `holdem_engine::table::Table`
//! through `LocalSeat`, or driven over the wire by a `ClientSession`.
//!
//! ## Core Components
//!
//! - [`simple`] - Calling, folding and all-in bots
//! - [`baseline`] - Rule-based bot using hand strength and pot odds
//! - [`random`] - Seeded bot choosing uniformly among legal moves
//! - [`scripted`] - Bot replaying a fixed list of decisions
//! - [`create_bot`] - Factory creating bots by name
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_bot;
//! use holdem_engine::channel::LocalSeat;
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::table::{Seat, Table};
//!
//! let seats = vec![
//!     Seat::new("alice", LocalSeat::new(create_bot("baseline").unwrap())),
//!     Seat::new("bob", LocalSeat::new(create_bot("calling").unwrap())),
//! ];
//! let cfg = TableConfig { seed: Some(42), ..TableConfig::default() };
//! let mut table = Table::new(cfg, seats).unwrap();
//! table.send_initial_points().unwrap();
//! let record = table.play_hand().unwrap();
//! assert_eq!(record.pot(), record.returned());
//! ```

use holdem_engine::channel::DecisionProvider;
use thiserror::Error;

pub mod baseline;
pub mod random;
pub mod scripted;
pub mod simple;

/// Names accepted by [`create_bot`].
pub const BOT_NAMES: [&str; 5] = ["calling", "folding", "all_in", "baseline", "random"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown bot `{0}` (expected one of: calling, folding, all_in, baseline, random)")]
pub struct UnknownBot(pub String);

/// Creates a bot by name. The random bot is seeded from the OS.
///
/// ```rust
/// use holdem_ai::create_bot;
///
/// let bot = create_bot("baseline").unwrap();
/// assert_eq!(bot.name(), "BaselineBot");
/// assert!(create_bot("shark").is_err());
/// ```
pub fn create_bot(kind: &str) -> Result<Box<dyn DecisionProvider>, UnknownBot> {
    create_seeded_bot(kind, None)
}

/// Like [`create_bot`], with a fixed seed for bots that use randomness.
pub fn create_seeded_bot(
    kind: &str,
    seed: Option<u64>,
) -> Result<Box<dyn DecisionProvider>, UnknownBot> {
    let bot: Box<dyn DecisionProvider> = match kind.trim().to_ascii_lowercase().as_str() {
        "calling" | "caller" => Box::new(simple::CallingBot),
        "folding" | "folder" => Box::new(simple::FoldingBot),
        "all_in" | "allin" | "shover" => Box::new(simple::AllInBot),
        "baseline" => Box::new(baseline::BaselineBot::new()),
        "random" => Box::new(match seed {
            Some(seed) => random::RandomBot::with_seed(seed),
            None => random::RandomBot::new(),
        }),
        _ => return Err(UnknownBot(kind.to_string())),
    };
    Ok(bot)
}

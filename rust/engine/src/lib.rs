//! # holdem-engine: Multi-player Texas Hold'em Engine
//!
//! A deterministic no-limit Texas Hold'em engine for 2 or more seats.
//! Provides hand evaluation, betting-round orchestration with all-in capped
//! payouts, and a line-based protocol for players running outside the
//! engine's process.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text encoding
//! - [`deck`] - Multi-pack deck with seeded ChaCha20 shuffling
//! - [`hand`] - Hand evaluation, comparison and showdown tiers
//! - [`player`] - Player state, decisions and commitment bookkeeping
//! - [`rules`] - Round parameters and round termination
//! - [`pot`] - Showdown payouts with all-in capping
//! - [`engine`] - Phase-checked execution of a single hand
//! - [`table`] - Seats, initial points and hand sequencing
//! - [`channel`] - Decision and notification interface to players
//! - [`protocol`] - Wire commands, transports and remote seats
//! - [`record`] - HandRecord summaries of finished hands
//! - [`config`] - Table configuration
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{rank_hand, Category};
//!
//! // Evaluate a 7-card poker hand
//! let pool = parse_cards("AH KH QH JH 10H 2C 3D").unwrap();
//! let rank = rank_hand(&pool).unwrap();
//! assert_eq!(rank.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! A table built with a seed replays the same sequence of hands:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut deck1 = Deck::with_seed(1, 42);
//! let mut deck2 = Deck::with_seed(1, 42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.draw_n(5).unwrap(), deck2.draw_n(5).unwrap());
//! ```

pub mod cards;
pub mod channel;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod player;
pub mod pot;
pub mod protocol;
pub mod record;
pub mod rules;
pub mod table;

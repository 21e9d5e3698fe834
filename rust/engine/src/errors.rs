use thiserror::Error;

use crate::deck::DeckError;
use crate::engine::HandPhase;

/// A player action that the rules reject. The state of the player is left
/// untouched so the same player can be asked again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("cannot check: {committed} committed this round but the bet is {required}")]
    BetMismatch { required: u32, committed: u32 },
    #[error("not enough points: {needed} needed, {available} available{}", raise_hint(.max_raise))]
    InsufficientPoints {
        needed: u32,
        available: u32,
        max_raise: Option<u32>,
    },
    #[error("no points left to go all-in")]
    NoChipsRemaining,
    #[error("a hand cannot hold more than 2 cards")]
    HandOverflow,
}

fn raise_hint(max_raise: &Option<u32>) -> String {
    match max_raise {
        Some(m) => format!(" (a maximum of {} points available for raise)", m),
        None => String::new(),
    }
}

/// Failures on the decision/notification channel to one player.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("protocol violation: expected `{expected}`, received `{received}`")]
    ProtocolViolation { expected: String, received: String },
    #[error("malformed reply: {0}")]
    MalformedReply(String),
    #[error("channel disconnected")]
    Disconnected,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("a hand is ranked from 5 to 7 cards, got {0}")]
    PoolSize(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("blinds must be positive")]
    ZeroBlind,
    #[error("big blind ({big}) must be at least the small blind ({small})")]
    BlindOrder { small: u32, big: u32 },
    #[error("starting points must be positive")]
    ZeroStartingPoints,
    #[error("at least one pack is required")]
    NoPacks,
    #[error("a table seats 2 to {max} players, got {got}")]
    PlayerCount { got: usize, max: usize },
    #[error("{players} players with {starting_points} points each exceed the chip limit of {max}")]
    ChipLimit {
        players: usize,
        starting_points: u32,
        max: u32,
    },
    #[error("duplicate player name `{0}`")]
    DuplicateName(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("`{action}` is not allowed in phase {actual:?} (expected {expected:?})")]
    OutOfOrder {
        action: &'static str,
        expected: HandPhase,
        actual: HandPhase,
    },
    #[error("deck exhausted: too many players for the configured packs")]
    DeckExhausted,
    #[error("channel to player `{player}` failed: {source}")]
    Channel {
        player: String,
        #[source]
        source: ChannelError,
    },
    #[error("cannot deal to player `{player}`: {source}")]
    IllegalDeal {
        player: String,
        #[source]
        source: IllegalMove,
    },
    #[error("player `{0}` has no points left")]
    BustedPlayer(String),
    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Hand(#[from] HandError),
}

impl From<DeckError> for EngineError {
    fn from(_: DeckError) -> Self {
        EngineError::DeckExhausted
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// What the engine does when a player asks for an action the rules reject,
/// or sends a reply that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IllegalMovePolicy {
    /// Ask the same player again, telling them why; fold after `max_attempts`.
    Reprompt { max_attempts: u32 },
    /// Fold the player on the first invalid reply.
    ForceFold,
}

impl Default for IllegalMovePolicy {
    fn default() -> Self {
        IllegalMovePolicy::Reprompt { max_attempts: 3 }
    }
}

impl IllegalMovePolicy {
    pub fn attempts(&self) -> u32 {
        match self {
            IllegalMovePolicy::Reprompt { max_attempts } => (*max_attempts).max(1),
            IllegalMovePolicy::ForceFold => 1,
        }
    }
}

/// Stakes and rules for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Stack sent to every player by `send_initial_points`
    pub starting_points: u32,
    pub n_packs: usize,
    /// Seed for the table RNG; every hand's deck is derived from it
    pub seed: Option<u64>,
    /// Whether the big blind may act when the pre-flop action is only called
    pub big_blind_option: bool,
    pub illegal_move_policy: IllegalMovePolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 1,
            big_blind: 2,
            starting_points: 1000,
            n_packs: 1,
            seed: None,
            big_blind_option: true,
            illegal_move_policy: IllegalMovePolicy::default(),
        }
    }
}

impl TableConfig {
    /// Largest table a hand can be dealt to: two hole cards each plus a full board.
    pub fn max_players(&self) -> usize {
        (52 * self.n_packs).saturating_sub(5) / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::BlindOrder {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.starting_points == 0 {
            return Err(ConfigError::ZeroStartingPoints);
        }
        if self.n_packs == 0 {
            return Err(ConfigError::NoPacks);
        }
        Ok(())
    }

    pub fn validate_seats(&self, n_players: usize) -> Result<(), ConfigError> {
        let max = self.max_players();
        if !(2..=max).contains(&n_players) {
            return Err(ConfigError::PlayerCount {
                got: n_players,
                max,
            });
        }
        // every seat's points must fit in one pot
        if self.starting_points as u64 * n_players as u64 > u32::MAX as u64 {
            return Err(ConfigError::ChipLimit {
                players: n_players,
                starting_points: self.starting_points,
                max: u32::MAX,
            });
        }
        Ok(())
    }
}

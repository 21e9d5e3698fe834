use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::Category;
use crate::player::Decision;

/// A betting round of Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards only
    Preflop,
    /// Three board cards
    Flop,
    /// Fourth board card
    Turn,
    /// Fifth board card
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Round number used in `request_round_{n}_move`.
    pub fn index(self) -> u8 {
        match self {
            Street::Preflop => 0,
            Street::Flop => 1,
            Street::Turn => 2,
            Street::River => 3,
        }
    }

    pub fn from_index(idx: u8) -> Option<Street> {
        Street::ALL.get(idx as usize).copied()
    }

    /// Board cards revealed when this round opens.
    pub fn reveal_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

/// One accepted player action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: String,
    pub street: Street,
    pub decision: Decision,
    /// Commitment for this round after the action
    pub committed: u32,
}

/// How one player finished the hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: String,
    pub total_committed: u32,
    pub returned: u32,
    pub folded: bool,
    #[serde(default)]
    pub best_hand: Option<Category>,
}

impl PlayerResult {
    pub fn net(&self) -> i64 {
        self.returned as i64 - self.total_committed as i64
    }
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Players in the strongest tier
    pub winners: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Summary of a finished hand, returned by `game_end_update`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub hand_id: String,
    /// Seed of this hand's deck
    pub seed: Option<u64>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    /// Seat order as dealt
    pub results: Vec<PlayerResult>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// RFC3339, set when the hand settles
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

impl HandRecord {
    pub fn new(hand_id: String, seed: Option<u64>) -> Self {
        Self {
            hand_id,
            seed,
            small_blind: 0,
            big_blind: 0,
            actions: Vec::new(),
            board: Vec::new(),
            results: Vec::new(),
            showdown: None,
            ts: None,
        }
    }

    pub fn stamp(&mut self) {
        if self.ts.is_none() {
            self.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    /// Every point committed during the hand.
    pub fn pot(&self) -> u32 {
        self.results.iter().map(|r| r.total_committed).sum()
    }

    pub fn returned(&self) -> u32 {
        self.results.iter().map(|r| r.returned).sum()
    }

    pub fn result_for(&self, name: &str) -> Option<&PlayerResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_id_is_zero_padded() {
        assert_eq!(format_hand_id("20250102", 7), "20250102-000007");
    }

    #[test]
    fn streets_map_to_round_numbers() {
        for street in Street::ALL {
            assert_eq!(Street::from_index(street.index()), Some(street));
        }
        assert_eq!(Street::from_index(4), None);
        let revealed: usize = Street::ALL.iter().map(|s| s.reveal_count()).sum();
        assert_eq!(revealed, 5);
    }

    #[test]
    fn stamp_keeps_existing_timestamp() {
        let mut rec = HandRecord::new(format_hand_id("19700101", 1), Some(1));
        rec.ts = Some("fixed".into());
        rec.stamp();
        assert_eq!(rec.ts.as_deref(), Some("fixed"));
    }

    #[test]
    fn serializes_to_a_single_line() {
        let mut rec = HandRecord::new(format_hand_id("19700101", 1), None);
        rec.results.push(PlayerResult {
            name: "a".into(),
            total_committed: 10,
            returned: 20,
            folded: false,
            best_hand: Some(Category::Flush),
        });
        let line = rec.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(rec.results[0].net(), 10);
        let back: HandRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, rec);
    }
}

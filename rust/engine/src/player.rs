use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::IllegalMove;

/// What a player asks to do on their turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// Give up the hand
    Fold,
    /// Pass, only valid when already matching the bet
    Check,
    /// Match the current bet
    Call,
    /// Match the current bet and add the given amount on top
    Raise(u32),
    /// Commit every remaining point
    AllIn,
}

impl Decision {
    /// Name used in the `MOVE` field of a move reply.
    pub fn move_name(&self) -> &'static str {
        match self {
            Decision::Fold => "fold",
            Decision::Check => "check",
            Decision::Call => "call",
            Decision::Raise(_) => "raising",
            Decision::AllIn => "all_in",
        }
    }

    pub fn from_move_name(name: &str, raise_amount: Option<u32>) -> Option<Decision> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fold" => Some(Decision::Fold),
            "check" => Some(Decision::Check),
            "call" => Some(Decision::Call),
            "raise" | "raising" => raise_amount.map(Decision::Raise),
            "all_in" | "allin" | "all-in" => Some(Decision::AllIn),
            _ => None,
        }
    }
}

/// Player state right after an action.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub points: u32,
    pub past_committed: u32,
    pub current_committed: u32,
    pub in_game: bool,
    pub bet_match: bool,
}

/// Outcome of an accepted action.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveResult {
    Fold(PlayerSnapshot),
    Check(PlayerSnapshot),
    Call(PlayerSnapshot),
    Raise {
        amount: u32,
        snapshot: PlayerSnapshot,
    },
    AllIn(PlayerSnapshot),
}

impl MoveResult {
    pub fn snapshot(&self) -> &PlayerSnapshot {
        match self {
            MoveResult::Fold(s)
            | MoveResult::Check(s)
            | MoveResult::Call(s)
            | MoveResult::AllIn(s)
            | MoveResult::Raise { snapshot: s, .. } => s,
        }
    }

    pub fn decision(&self) -> Decision {
        match self {
            MoveResult::Fold(_) => Decision::Fold,
            MoveResult::Check(_) => Decision::Check,
            MoveResult::Call(_) => Decision::Call,
            MoveResult::Raise { amount, .. } => Decision::Raise(*amount),
            MoveResult::AllIn(_) => Decision::AllIn,
        }
    }
}

/// A seated player and the per-hand betting state the engine mutates.
///
/// `points + past_committed + current_committed` stays constant through every
/// action; only showdown payouts change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    points: u32,
    hand: Vec<Card>,
    past_committed: u32,
    current_committed: u32,
    in_game: bool,
    round_requirement_met: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            points,
            hand: Vec::with_capacity(2),
            past_committed: 0,
            current_committed: 0,
            in_game: true,
            round_requirement_met: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn points(&self) -> u32 {
        self.points
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn past_committed(&self) -> u32 {
        self.past_committed
    }
    pub fn current_committed(&self) -> u32 {
        self.current_committed
    }
    pub fn total_committed(&self) -> u32 {
        self.past_committed + self.current_committed
    }
    pub fn in_game(&self) -> bool {
        self.in_game
    }
    pub fn round_requirement_met(&self) -> bool {
        self.round_requirement_met
    }
    pub fn is_all_in(&self) -> bool {
        self.points == 0
    }

    /// Still in the hand and holding chips, so it can be asked to act.
    pub fn can_act(&self) -> bool {
        self.in_game && self.points > 0
    }

    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }

    pub fn add_points(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    pub(crate) fn set_requirement_met(&mut self, met: bool) {
        self.round_requirement_met = met;
    }

    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.past_committed = 0;
        self.current_committed = 0;
        self.in_game = true;
        self.round_requirement_met = false;
    }

    /// Posts a forced bet. A short stack posts what it has. Returns the amount posted.
    pub fn post_blind(&mut self, amount: u32) -> u32 {
        let posted = amount.min(self.points);
        self.points -= posted;
        self.current_committed += posted;
        posted
    }

    /// Credits a showdown return and clears the hand's commitments.
    pub(crate) fn close_hand(&mut self, returned: u32) {
        self.add_points(returned);
        self.past_committed = 0;
        self.current_committed = 0;
    }

    /// Gives back everything committed to an unfinished hand.
    pub fn refund_commitments(&mut self) {
        let committed = self.total_committed();
        self.close_hand(committed);
    }

    /// Moves this round's commitment into the past-rounds bucket.
    pub fn settle_round(&mut self) {
        self.past_committed += self.current_committed;
        self.current_committed = 0;
    }

    pub fn dealt_card(&mut self, card: Card) -> Result<(), IllegalMove> {
        if self.hand.len() >= 2 {
            return Err(IllegalMove::HandOverflow);
        }
        self.hand.push(card);
        Ok(())
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            points: self.points,
            past_committed: self.past_committed,
            current_committed: self.current_committed,
            in_game: self.in_game,
            bet_match: self.round_requirement_met,
        }
    }

    pub fn fold(&mut self) -> MoveResult {
        self.settle_round();
        self.in_game = false;
        self.round_requirement_met = true;
        MoveResult::Fold(self.snapshot())
    }

    pub fn check(&mut self, required: u32) -> Result<MoveResult, IllegalMove> {
        if self.current_committed != required {
            return Err(IllegalMove::BetMismatch {
                required,
                committed: self.current_committed,
            });
        }
        self.round_requirement_met = true;
        Ok(MoveResult::Check(self.snapshot()))
    }

    pub fn call(&mut self, required: u32) -> Result<MoveResult, IllegalMove> {
        let needed = required.saturating_sub(self.current_committed);
        if self.points < needed {
            return Err(IllegalMove::InsufficientPoints {
                needed,
                available: self.points,
                max_raise: None,
            });
        }
        self.points -= needed;
        self.current_committed += needed;
        self.round_requirement_met = true;
        Ok(MoveResult::Call(self.snapshot()))
    }

    pub fn raise(&mut self, required: u32, amount: u32) -> Result<MoveResult, IllegalMove> {
        let needed = required
            .saturating_sub(self.current_committed)
            .saturating_add(amount);
        if needed > self.points {
            return Err(IllegalMove::InsufficientPoints {
                needed,
                available: self.points,
                max_raise: Some((self.points + self.current_committed).saturating_sub(required)),
            });
        }
        self.points -= needed;
        self.current_committed += needed;
        self.round_requirement_met = true;
        Ok(MoveResult::Raise {
            amount,
            snapshot: self.snapshot(),
        })
    }

    pub fn all_in(&mut self) -> Result<MoveResult, IllegalMove> {
        if self.points == 0 {
            return Err(IllegalMove::NoChipsRemaining);
        }
        self.current_committed += self.points;
        self.points = 0;
        self.round_requirement_met = true;
        Ok(MoveResult::AllIn(self.snapshot()))
    }

    pub fn apply(&mut self, decision: Decision, required: u32) -> Result<MoveResult, IllegalMove> {
        match decision {
            Decision::Fold => Ok(self.fold()),
            Decision::Check => self.check(required),
            Decision::Call => self.call(required),
            Decision::Raise(amount) => self.raise(required, amount),
            Decision::AllIn => self.all_in(),
        }
    }
}

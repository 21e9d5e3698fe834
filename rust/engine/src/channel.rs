//! The seam between the engine and whoever makes decisions for a seat.
//!
//! The engine only talks to [`PlayerChannel`]. In-process bots implement the
//! simpler [`DecisionProvider`] and are seated through [`LocalSeat`]; remote
//! players are reached through [`crate::protocol::RemoteSeat`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::Card;
use crate::errors::{ChannelError, IllegalMove};
use crate::player::Decision;

/// Everything a player is told when asked to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionContext {
    /// 0 = pre-flop .. 3 = river
    pub round: u8,
    pub player: String,
    pub hand: Vec<Card>,
    pub board: Vec<Card>,
    /// Commitment required this round
    pub current_bet: u32,
    pub points: u32,
    pub current_committed: u32,
    pub past_committed: u32,
    /// Total committed by all players so far. Behind a remote seat only the
    /// player's own commitments and the bet it faces are known, so there it
    /// is a lower bound.
    pub pot: u32,
    /// Big blind amount; a remote client infers it from its first pre-flop
    /// request unless it posted the big blind itself
    pub big_blind: u32,
}

impl DecisionContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.current_committed)
    }

    pub fn can_check(&self) -> bool {
        self.to_call() == 0
    }
}

/// Final per-player report of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSummary {
    #[serde(rename = "TOTAL_COMMITTED")]
    pub total_committed: u32,
    #[serde(rename = "END_RETURN")]
    pub end_return: u32,
    #[serde(rename = "BOARD")]
    pub board: Vec<Card>,
    #[serde(rename = "YOUR_HAND")]
    pub your_hand: Vec<Card>,
    /// Category name of the best hand, absent for folded players
    #[serde(rename = "YOUR_BEST_HAND")]
    pub your_best_hand: Option<String>,
}

/// Informational messages the engine sends during a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    InitialPoints(u32),
    GameStartReset,
    SmallBlind(u32),
    BigBlind(u32),
    InitialHand { first_card: Card, second_card: Card },
    RoundEnd,
    /// Hole cards of the players still in the hand
    GameEndHands(BTreeMap<String, Vec<Card>>),
    GameEndBets(BTreeMap<String, u32>),
    GameEndReturns(BTreeMap<String, u32>),
    GameEndSummary(EndSummary),
}

/// Engine-facing view of a seat.
pub trait PlayerChannel {
    fn notify(&mut self, notice: &Notice) -> Result<(), ChannelError>;

    fn request_move(&mut self, ctx: &DecisionContext) -> Result<Decision, ChannelError>;

    /// Called when the last decision was refused; the engine may ask again.
    fn reject(&mut self, _reason: &IllegalMove) -> Result<(), ChannelError> {
        Ok(())
    }
}

/// A decision maker living in the same process as the engine.
pub trait DecisionProvider: Send {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision;

    fn name(&self) -> &str;

    fn rejected(&mut self, _reason: &IllegalMove) {}

    fn observe(&mut self, _notice: &Notice) {}
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for Box<D> {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        (**self).decide(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn rejected(&mut self, reason: &IllegalMove) {
        (**self).rejected(reason)
    }

    fn observe(&mut self, notice: &Notice) {
        (**self).observe(notice)
    }
}

/// Seats a [`DecisionProvider`] at a table without any transport.
#[derive(Debug)]
pub struct LocalSeat<D> {
    provider: D,
}

impl<D: DecisionProvider> LocalSeat<D> {
    pub fn new(provider: D) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &D {
        &self.provider
    }

    pub fn into_inner(self) -> D {
        self.provider
    }
}

impl<D: DecisionProvider> PlayerChannel for LocalSeat<D> {
    fn notify(&mut self, notice: &Notice) -> Result<(), ChannelError> {
        trace!(seat = self.provider.name(), ?notice, "notice");
        self.provider.observe(notice);
        Ok(())
    }

    fn request_move(&mut self, ctx: &DecisionContext) -> Result<Decision, ChannelError> {
        Ok(self.provider.decide(ctx))
    }

    fn reject(&mut self, reason: &IllegalMove) -> Result<(), ChannelError> {
        self.provider.rejected(reason);
        Ok(())
    }
}

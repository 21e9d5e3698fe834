//! Fixed-strategy bots. Useful as opponents in tests and simulations.

use holdem_engine::channel::{DecisionContext, DecisionProvider};
use holdem_engine::player::Decision;

/// Checks when free, otherwise calls; goes all-in when a call is unaffordable.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingBot;

impl DecisionProvider for CallingBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        if ctx.can_check() {
            Decision::Check
        } else if ctx.points >= ctx.to_call() {
            Decision::Call
        } else {
            Decision::AllIn
        }
    }

    fn name(&self) -> &str {
        "CallingBot"
    }
}

/// Checks when free, folds to any bet.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingBot;

impl DecisionProvider for FoldingBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        if ctx.can_check() {
            Decision::Check
        } else {
            Decision::Fold
        }
    }

    fn name(&self) -> &str {
        "FoldingBot"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllInBot;

impl DecisionProvider for AllInBot {
    fn decide(&mut self, _ctx: &DecisionContext) -> Decision {
        Decision::AllIn
    }

    fn name(&self) -> &str {
        "AllInBot"
    }
}

#[cfg(test)]
pub(crate) fn context(current_bet: u32, committed: u32, points: u32) -> DecisionContext {
    DecisionContext {
        round: 0,
        player: "bot".into(),
        hand: vec![],
        board: vec![],
        current_bet,
        points,
        current_committed: committed,
        past_committed: 0,
        pot: current_bet + committed,
        big_blind: 2,
    }
}

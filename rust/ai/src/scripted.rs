//! Bot replaying a fixed list of decisions.

use std::collections::VecDeque;

use holdem_engine::channel::{DecisionContext, DecisionProvider};
use holdem_engine::errors::IllegalMove;
use holdem_engine::player::Decision;

/// Plays its queued decisions in order; once they run out it checks when
/// free and folds otherwise. A rejected decision is not replayed.
#[derive(Debug, Clone)]
pub struct ScriptedBot {
    name: String,
    moves: VecDeque<Decision>,
    rejections: usize,
}

impl ScriptedBot {
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            name: name.into(),
            moves: moves.into_iter().collect(),
            rejections: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl DecisionProvider for ScriptedBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        match self.moves.pop_front() {
            Some(decision) => decision,
            None if ctx.can_check() => Decision::Check,
            None => Decision::Fold,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rejected(&mut self, _reason: &IllegalMove) {
        self.rejections += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple::context;

    #[test]
    fn replays_then_falls_back() {
        let mut bot = ScriptedBot::new("s", [Decision::Raise(4), Decision::Call]);
        assert_eq!(bot.decide(&context(2, 0, 100)), Decision::Raise(4));
        assert_eq!(bot.decide(&context(2, 0, 100)), Decision::Call);
        assert_eq!(bot.remaining(), 0);
        assert_eq!(bot.decide(&context(2, 2, 100)), Decision::Check);
        assert_eq!(bot.decide(&context(8, 2, 100)), Decision::Fold);
    }

    #[test]
    fn counts_rejections() {
        let mut bot = ScriptedBot::new("s", Vec::new());
        bot.rejected(&IllegalMove::NoChipsRemaining);
        assert_eq!(bot.rejections(), 1);
        assert_eq!(bot.name(), "s");
    }
}

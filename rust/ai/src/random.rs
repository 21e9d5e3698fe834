//! Bot that picks uniformly among the moves it can legally make.

use holdem_engine::channel::{DecisionContext, DecisionProvider};
use holdem_engine::player::Decision;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: ChaCha20Rng,
}

impl RandomBot {
    /// Seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn legal_moves(ctx: &DecisionContext) -> Vec<Decision> {
        let to_call = ctx.to_call();
        let mut moves = vec![Decision::Fold];
        if to_call == 0 {
            moves.push(Decision::Check);
        } else if ctx.points >= to_call {
            moves.push(Decision::Call);
        }
        let headroom = ctx.points.saturating_sub(to_call);
        if headroom >= ctx.big_blind.max(1) {
            // placeholder, sized once chosen
            moves.push(Decision::Raise(0));
        }
        if ctx.points > 0 {
            moves.push(Decision::AllIn);
        }
        moves
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionProvider for RandomBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        let moves = Self::legal_moves(ctx);
        let pick = moves[self.rng.random_range(0..moves.len())];
        match pick {
            Decision::Raise(_) => {
                let min = ctx.big_blind.max(1);
                let max = ctx.points.saturating_sub(ctx.to_call());
                Decision::Raise(self.rng.random_range(min..=max))
            }
            other => other,
        }
    }

    fn name(&self) -> &str {
        "RandomBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple::context;

    #[test]
    fn same_seed_same_choices() {
        let mut a = RandomBot::with_seed(9);
        let mut b = RandomBot::with_seed(9);
        let ctx = context(10, 2, 200);
        for _ in 0..50 {
            assert_eq!(a.decide(&ctx), b.decide(&ctx));
        }
    }

    #[test]
    fn only_legal_moves_are_chosen() {
        let mut bot = RandomBot::with_seed(3);
        let ctx = context(10, 2, 200);
        for _ in 0..500 {
            match bot.decide(&ctx) {
                Decision::Check => panic!("check while facing a bet"),
                Decision::Raise(r) => assert!((2..=192).contains(&r)),
                _ => {}
            }
        }
    }

    #[test]
    fn short_stack_cannot_call_or_raise() {
        let mut bot = RandomBot::with_seed(4);
        let ctx = context(100, 0, 20);
        for _ in 0..100 {
            let d = bot.decide(&ctx);
            assert!(matches!(d, Decision::Fold | Decision::AllIn), "{d:?}");
        }
    }
}

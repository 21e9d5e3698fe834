//! Baseline bot for table play.
//!
//! Implements a basic rule-based strategy with hand evaluation and pot odds
//! calculation. Deterministic: the same context always yields the same move.

use holdem_engine::cards::Card;
use holdem_engine::channel::{DecisionContext, DecisionProvider};
use holdem_engine::hand::{rank_hand, Category};
use holdem_engine::player::Decision;

/// Simple rule-based bot used as a reference opponent.
///
/// # Strategy
///
/// **Pre-flop:**
/// - Strong hands (high pairs 77+, AK, AQ): Raise or call
/// - Medium hands (suited connectors, Ax, small pairs): Call if cheap
/// - Weak hands: Fold to raises, check if free
///
/// **Post-flop:**
/// - Strong hands (Two Pair+): Bet or call
/// - Medium hands (One Pair): Check or call small bets
/// - Weak hands: Calculate pot odds, fold if unfavorable
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::BaselineBot;
/// use holdem_engine::channel::{DecisionContext, DecisionProvider};
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::player::Decision;
///
/// let mut bot = BaselineBot::new();
/// let ctx = DecisionContext {
///     round: 0,
///     player: "bot".into(),
///     hand: parse_cards("7H 2S").unwrap(),
///     board: vec![],
///     current_bet: 20,
///     points: 1000,
///     current_committed: 0,
///     past_committed: 0,
///     pot: 23,
///     big_blind: 2,
/// };
/// assert_eq!(bot.decide(&ctx), Decision::Fold);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Pre-flop hand strength on a scale of 0-10.
    ///
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, suited connectors)
    /// - 3-4: Marginal hands (66-22, Ax, broadway)
    /// - 0-2: Weak hands (offsuit low cards)
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (r1, r2) = (hole[0].value(), hole[1].value());
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        // Pairs
        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            // Suited connectors and one-gappers
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Post-flop strength from the best hand of hole cards plus board.
    /// `None` before the flop.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let pool: Vec<Card> = hole.iter().chain(board).copied().collect();
        let rank = rank_hand(&pool).ok()?;

        let base = match rank.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker_boost = u8::from(rank.kickers.first().is_some_and(|&k| k >= 12));
        Some((base + kicker_boost).min(10))
    }

    /// Pot odds as pot / (pot + call).
    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn facing_bet(strength: u8, to_call: u32, min_raise: u32, stack: u32, pot: u32) -> Decision {
        if to_call > stack {
            return if strength >= 7 {
                Decision::AllIn
            } else {
                Decision::Fold
            };
        }
        let odds = Self::pot_odds(pot, to_call);
        match strength {
            9..=10 => {
                if stack >= to_call + min_raise {
                    let raise = (pot / 2).max(min_raise).min(stack - to_call);
                    return Decision::Raise(raise);
                }
                Decision::Call
            }
            7..=8 => Decision::Call,
            5..=6 if odds >= 0.3 || to_call <= pot / 4 => Decision::Call,
            3..=4 if odds >= 0.4 || to_call <= pot / 6 => Decision::Call,
            _ => Decision::Fold,
        }
    }

    fn unopened(strength: u8, min_raise: u32, stack: u32, pot: u32) -> Decision {
        let bet = match strength {
            9..=10 => (pot * 2 / 3).max(min_raise),
            7..=8 => (pot / 2).max(min_raise),
            _ => return Decision::Check,
        };
        if stack >= min_raise {
            Decision::Raise(bet.min(stack))
        } else {
            Decision::Check
        }
    }
}

impl DecisionProvider for BaselineBot {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        let to_call = ctx.to_call();
        let hole: [Card; 2] = match ctx.hand.as_slice() {
            [a, b] => [*a, *b],
            // No hole cards, default to check/fold
            _ => {
                return if to_call == 0 {
                    Decision::Check
                } else {
                    Decision::Fold
                };
            }
        };

        let strength = Self::postflop_strength(hole, &ctx.board)
            .unwrap_or_else(|| Self::preflop_strength(hole));
        let min_raise = ctx.big_blind.max(1);

        if to_call == 0 {
            Self::unopened(strength, min_raise, ctx.points, ctx.pot)
        } else {
            Self::facing_bet(strength, to_call, min_raise, ctx.points, ctx.pot)
        }
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}

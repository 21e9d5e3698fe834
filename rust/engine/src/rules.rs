use crate::config::TableConfig;
use crate::player::Player;
use crate::record::Street;

/// Parameters of one betting round. The four rounds of a hand differ only
/// in these values; the loop that plays them is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundPlan {
    pub street: Street,
    /// Seat that acts first
    pub start_seat: usize,
    /// Commitment required when the round opens
    pub opening_bet: u32,
    /// Board cards revealed before any action
    pub reveal: usize,
    /// Seat considered to have already acted
    pub preset_met: Option<usize>,
}

impl RoundPlan {
    /// Builds the plan for `street` at a table of `n_players`.
    ///
    /// Pre-flop action starts after the big blind (seat 2, wrapping at two
    /// players) and the big blind is the bet to match. Later rounds start at
    /// seat 0 with nothing to match.
    ///
    /// ```
    /// use holdem_engine::config::TableConfig;
    /// use holdem_engine::record::Street;
    /// use holdem_engine::rules::RoundPlan;
    ///
    /// let cfg = TableConfig::default();
    /// let pre = RoundPlan::for_street(Street::Preflop, 2, &cfg);
    /// assert_eq!((pre.start_seat, pre.opening_bet, pre.reveal), (0, 2, 0));
    ///
    /// let flop = RoundPlan::for_street(Street::Flop, 6, &cfg);
    /// assert_eq!((flop.start_seat, flop.opening_bet, flop.reveal), (0, 0, 3));
    /// ```
    pub fn for_street(street: Street, n_players: usize, config: &TableConfig) -> Self {
        match street {
            Street::Preflop => RoundPlan {
                street,
                start_seat: 2 % n_players.max(1),
                opening_bet: config.big_blind,
                reveal: 0,
                // without the option, the big blind's forced bet counts as its action
                preset_met: (!config.big_blind_option).then_some(1),
            },
            _ => RoundPlan {
                street,
                start_seat: 0,
                opening_bet: 0,
                reveal: street.reveal_count(),
                preset_met: None,
            },
        }
    }
}

/// True when no further action can happen in the current round.
///
/// The round is over when at most one player is still in the hand, when every
/// player able to act has matched the requirement since the last raise, or
/// when a lone player with chips already covers the requirement and nobody
/// else can respond.
pub fn round_settled<'a, I>(players: I, required: u32) -> bool
where
    I: IntoIterator<Item = &'a Player>,
{
    let players: Vec<&Player> = players.into_iter().collect();
    if players.iter().filter(|p| p.in_game()).count() <= 1 {
        return true;
    }
    let actors: Vec<&Player> = players.into_iter().filter(|p| p.can_act()).collect();
    if actors.iter().all(|p| p.round_requirement_met()) {
        return true;
    }
    matches!(actors.as_slice(), [only] if only.current_committed() >= required)
}

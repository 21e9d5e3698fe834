use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::channel::{DecisionContext, EndSummary, Notice};
use crate::deck::Deck;
use crate::errors::{ChannelError, EngineError};
use crate::hand::{self, Category};
use crate::player::{MoveResult, Player};
use crate::pot;
use crate::record::{ActionRecord, HandRecord, PlayerResult, ShowdownInfo, Street};
use crate::rules::{self, RoundPlan};
use crate::table::Table;

/// Where a hand currently is. Each engine operation is only valid in one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPhase {
    Init,
    Blinds,
    Deal,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    Settled,
}

impl HandPhase {
    fn of_street(street: Street) -> Self {
        match street {
            Street::Preflop => HandPhase::PreFlop,
            Street::Flop => HandPhase::Flop,
            Street::Turn => HandPhase::Turn,
            Street::River => HandPhase::River,
        }
    }

    fn after_street(street: Street) -> Self {
        match street {
            Street::Preflop => HandPhase::Flop,
            Street::Flop => HandPhase::Turn,
            Street::Turn => HandPhase::River,
            Street::River => HandPhase::Showdown,
        }
    }
}

/// Runs a single hand on a [`Table`].
///
/// The engine borrows the table for the whole hand, so seats cannot change
/// while cards are out.
///
/// # Examples
///
/// ```
/// use holdem_engine::channel::LocalSeat;
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::engine::HandPhase;
/// use holdem_engine::table::{Seat, Table};
/// # use holdem_engine::channel::{DecisionContext, DecisionProvider};
/// # use holdem_engine::player::Decision;
/// # struct Caller;
/// # impl DecisionProvider for Caller {
/// #     fn decide(&mut self, ctx: &DecisionContext) -> Decision {
/// #         if ctx.can_check() { Decision::Check } else { Decision::Call }
/// #     }
/// #     fn name(&self) -> &str { "caller" }
/// # }
///
/// let cfg = TableConfig { seed: Some(7), ..TableConfig::default() };
/// let seats = vec![
///     Seat::new("alice", LocalSeat::new(Caller)),
///     Seat::new("bob", LocalSeat::new(Caller)),
/// ];
/// let mut table = Table::new(cfg, seats).unwrap();
/// table.send_initial_points().unwrap();
///
/// let mut engine = table.begin_hand();
/// engine.game_start_setup().unwrap();
/// engine.round_0_play().unwrap();
/// engine.round_1_play().unwrap();
/// engine.round_2_play().unwrap();
/// engine.round_3_play().unwrap();
/// assert_eq!(engine.board().len(), 5);
/// let record = engine.game_end_update().unwrap();
/// assert_eq!(engine.phase(), HandPhase::Settled);
/// assert_eq!(record.pot(), record.returned());
/// ```
pub struct Engine<'t> {
    table: &'t mut Table,
    deck: Deck,
    seed: u64,
    board: Vec<Card>,
    phase: HandPhase,
    record: HandRecord,
}

impl<'t> Engine<'t> {
    pub(crate) fn new(table: &'t mut Table, hand_id: String, seed: u64) -> Self {
        let packs = table.config().n_packs;
        let mut record = HandRecord::new(hand_id, Some(seed));
        record.small_blind = table.config().small_blind;
        record.big_blind = table.config().big_blind;
        Self {
            table,
            deck: Deck::with_seed(packs, seed),
            seed,
            board: Vec::with_capacity(5),
            phase: HandPhase::Init,
            record,
        }
    }

    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn hand_id(&self) -> &str {
        &self.record.hand_id
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.table.players()
    }

    /// Total committed by every player so far.
    pub fn pot(&self) -> u32 {
        self.players().map(Player::total_committed).sum()
    }

    /// At most one player is still contesting the pot.
    pub fn is_decided(&self) -> bool {
        self.players().filter(|p| p.in_game()).count() <= 1
    }

    fn expect_phase(&self, expected: HandPhase, action: &'static str) -> Result<(), EngineError> {
        if self.phase != expected {
            return Err(EngineError::OutOfOrder {
                action,
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Resets every player, shuffles a fresh deck, posts the blinds and deals
    /// two hole cards per seat.
    pub fn game_start_setup(&mut self) -> Result<(), EngineError> {
        self.expect_phase(HandPhase::Init, "game_start_setup")?;
        // refuse to start a hand if any player's stack is zero
        if let Some(busted) = self.players().find(|p| p.points() == 0) {
            return Err(EngineError::BustedPlayer(busted.name().to_string()));
        }
        info!(
            hand_id = %self.record.hand_id,
            seed = self.seed,
            players = self.table.seats.len(),
            "hand started"
        );

        for idx in 0..self.table.seats.len() {
            self.table.seats[idx].player.reset_for_hand();
            self.notify(idx, &Notice::GameStartReset)?;
        }
        self.deck = Deck::with_seed(self.table.config().n_packs, self.seed);
        self.deck.shuffle();
        self.board.clear();

        self.phase = HandPhase::Blinds;
        self.post_blinds()?;
        self.phase = HandPhase::Deal;
        self.deal_hole_cards()?;
        self.phase = HandPhase::PreFlop;
        Ok(())
    }

    fn post_blinds(&mut self) -> Result<(), EngineError> {
        let (small, big) = (self.table.config().small_blind, self.table.config().big_blind);
        let posted = self.table.seats[0].player.post_blind(small);
        self.notify(0, &Notice::SmallBlind(posted))?;
        let posted = self.table.seats[1].player.post_blind(big);
        self.notify(1, &Notice::BigBlind(posted))?;
        debug!(small, big, "blinds posted");
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        for idx in 0..self.table.seats.len() {
            let first_card = self.deck.draw()?;
            let second_card = self.deck.draw()?;
            let player = &mut self.table.seats[idx].player;
            for card in [first_card, second_card] {
                player
                    .dealt_card(card)
                    .map_err(|source| EngineError::IllegalDeal {
                        player: player.name().to_string(),
                        source,
                    })?;
            }
            self.notify(
                idx,
                &Notice::InitialHand {
                    first_card,
                    second_card,
                },
            )?;
        }
        Ok(())
    }

    pub fn round_0_play(&mut self) -> Result<(), EngineError> {
        self.play_street(Street::Preflop)
    }

    pub fn round_1_play(&mut self) -> Result<(), EngineError> {
        self.play_street(Street::Flop)
    }

    pub fn round_2_play(&mut self) -> Result<(), EngineError> {
        self.play_street(Street::Turn)
    }

    pub fn round_3_play(&mut self) -> Result<(), EngineError> {
        self.play_street(Street::River)
    }

    pub fn play_street(&mut self, street: Street) -> Result<(), EngineError> {
        let plan = RoundPlan::for_street(street, self.table.seats.len(), self.table.config());
        self.play_betting_round(plan)
    }

    /// Reveals the plan's board cards, then asks players in seat order until
    /// the round settles. Moves this round's commitments into the past bucket
    /// and tells every player the round ended.
    pub fn play_betting_round(&mut self, plan: RoundPlan) -> Result<(), EngineError> {
        self.expect_phase(HandPhase::of_street(plan.street), "play_betting_round")?;
        for _ in 0..plan.reveal {
            let card = self.deck.draw()?;
            self.board.push(card);
        }

        let n = self.table.seats.len();
        for seat in self.table.seats.iter_mut() {
            seat.player.set_requirement_met(false);
        }
        if let Some(seat) = plan.preset_met.and_then(|i| self.table.seats.get_mut(i)) {
            seat.player.set_requirement_met(true);
        }
        let mut required = self
            .players()
            .map(Player::current_committed)
            .max()
            .unwrap_or(0)
            .max(plan.opening_bet);

        if self.is_decided() {
            debug!(street = ?plan.street, "hand already decided, skipping action");
        }
        let mut turn = plan.start_seat;
        while !rules::round_settled(self.players(), required) {
            let idx = turn % n;
            turn += 1;
            if !self.table.seats[idx].player.can_act() {
                continue;
            }
            let result = self.solicit(idx, plan.street, required)?;
            let committed = result.snapshot().current_committed;
            let name = self.table.seats[idx].player.name().to_string();
            debug!(player = %name, street = ?plan.street, decision = ?result.decision(), committed, "action");

            if committed > required {
                required = committed;
                // a raise re-opens the action for everyone who can still respond
                for (i, seat) in self.table.seats.iter_mut().enumerate() {
                    if i != idx && seat.player.can_act() {
                        seat.player.set_requirement_met(false);
                    }
                }
            }
            self.record.actions.push(ActionRecord {
                player: name,
                street: plan.street,
                decision: result.decision(),
                committed,
            });
        }

        for idx in 0..n {
            self.table.seats[idx].player.settle_round();
            self.notify(idx, &Notice::RoundEnd)?;
        }
        self.phase = HandPhase::after_street(plan.street);
        Ok(())
    }

    /// Asks one player to act, applying the table's illegal-move policy.
    fn solicit(&mut self, idx: usize, street: Street, required: u32) -> Result<MoveResult, EngineError> {
        let ctx = self.decision_context(idx, street, required);
        let attempts = self.table.config().illegal_move_policy.attempts();
        let seat = &mut self.table.seats[idx];

        for attempt in 1..=attempts {
            let decision = match seat.channel.request_move(&ctx) {
                Ok(d) => d,
                Err(ChannelError::MalformedReply(reason)) => {
                    warn!(player = seat.player.name(), attempt, %reason, "unreadable reply");
                    continue;
                }
                Err(source) => {
                    return Err(EngineError::Channel {
                        player: seat.player.name().to_string(),
                        source,
                    });
                }
            };
            match seat.player.apply(decision, required) {
                Ok(result) => return Ok(result),
                Err(reason) => {
                    warn!(player = seat.player.name(), attempt, ?decision, %reason, "illegal move");
                    seat.channel
                        .reject(&reason)
                        .map_err(|source| EngineError::Channel {
                            player: seat.player.name().to_string(),
                            source,
                        })?;
                }
            }
        }
        warn!(player = seat.player.name(), "no legal move received, folding");
        Ok(seat.player.fold())
    }

    fn decision_context(&self, idx: usize, street: Street, required: u32) -> DecisionContext {
        let player = &self.table.seats[idx].player;
        DecisionContext {
            round: street.index(),
            player: player.name().to_string(),
            hand: player.hand().to_vec(),
            board: self.board.clone(),
            current_bet: required,
            points: player.points(),
            current_committed: player.current_committed(),
            past_committed: player.past_committed(),
            pot: self.pot(),
            big_blind: self.table.config().big_blind,
        }
    }

    fn notify(&mut self, idx: usize, notice: &Notice) -> Result<(), EngineError> {
        let seat = &mut self.table.seats[idx];
        seat.channel
            .notify(notice)
            .map_err(|source| EngineError::Channel {
                player: seat.player.name().to_string(),
                source,
            })
    }

    fn pool(&self, player: &Player) -> Vec<Card> {
        player.hand().iter().chain(&self.board).copied().collect()
    }

    /// Ranks the remaining players, pays out the pot, reports the result to
    /// every player and rotates the seats for the next hand.
    pub fn game_end_update(&mut self) -> Result<HandRecord, EngineError> {
        self.expect_phase(HandPhase::Showdown, "game_end_update")?;
        for seat in self.table.seats.iter_mut() {
            seat.player.settle_round();
        }

        let contenders: Vec<usize> = self
            .players()
            .enumerate()
            .filter(|(_, p)| p.in_game())
            .map(|(i, _)| i)
            .collect();
        let pools: Vec<Vec<Card>> = contenders
            .iter()
            .map(|&i| self.pool(&self.table.seats[i].player))
            .collect();
        let tiers: Vec<Vec<usize>> = hand::rank_tiers(&pools)?
            .into_iter()
            .map(|tier| tier.into_iter().map(|k| contenders[k]).collect())
            .collect();

        let committed: Vec<u32> = self.players().map(Player::total_committed).collect();
        let settlement = pot::settle(&committed, &tiers);

        let mut best: Vec<Option<Category>> = vec![None; committed.len()];
        for (&seat, pool) in contenders.iter().zip(&pools) {
            best[seat] = Some(hand::rank_hand(pool)?.category);
        }

        let names: Vec<String> = self.players().map(|p| p.name().to_string()).collect();
        let holes: Vec<Vec<Card>> = self.players().map(|p| p.hand().to_vec()).collect();
        let hands: BTreeMap<String, Vec<Card>> = contenders
            .iter()
            .map(|&i| (names[i].clone(), holes[i].clone()))
            .collect();
        let bets: BTreeMap<String, u32> = names.iter().cloned().zip(committed.iter().copied()).collect();
        let returns: BTreeMap<String, u32> = names
            .iter()
            .cloned()
            .zip(settlement.returns.iter().copied())
            .collect();

        for (idx, seat) in self.table.seats.iter_mut().enumerate() {
            if settlement.refunded[idx] > 0 {
                warn!(player = seat.player.name(), refunded = settlement.refunded[idx], "unclaimed points returned");
            }
            self.record.results.push(PlayerResult {
                name: names[idx].clone(),
                total_committed: committed[idx],
                returned: settlement.returns[idx],
                folded: !seat.player.in_game(),
                best_hand: best[idx],
            });
            seat.player.close_hand(settlement.returns[idx]);
        }
        self.record.board = self.board.clone();
        if contenders.len() > 1 {
            let winners: Vec<String> = tiers
                .first()
                .map(|t| t.iter().map(|&i| names[i].clone()).collect())
                .unwrap_or_default();
            let notes = (winners.len() > 1).then(|| "split pot".to_string());
            self.record.showdown = Some(ShowdownInfo { winners, notes });
        }
        self.record.stamp();
        self.phase = HandPhase::Settled;
        info!(
            hand_id = %self.record.hand_id,
            pot = self.record.pot(),
            showdown = contenders.len() > 1,
            "hand settled"
        );

        // the button moves even if a seat cannot be told the result
        let mut report = || -> Result<(), EngineError> {
            for idx in 0..names.len() {
                self.notify(idx, &Notice::GameEndHands(hands.clone()))?;
                self.notify(idx, &Notice::GameEndBets(bets.clone()))?;
                self.notify(idx, &Notice::GameEndReturns(returns.clone()))?;
                let summary = EndSummary {
                    total_committed: committed[idx],
                    end_return: settlement.returns[idx],
                    board: self.board.clone(),
                    your_hand: holes[idx].clone(),
                    your_best_hand: best[idx].map(|c| c.name().to_string()),
                };
                self.notify(idx, &Notice::GameEndSummary(summary))?;
            }
            Ok(())
        };
        let reported = report();
        self.table.seats.rotate_left(1);
        reported?;
        Ok(self.record.clone())
    }

    /// Plays the hand from setup to settlement.
    pub fn run(&mut self) -> Result<HandRecord, EngineError> {
        self.game_start_setup()?;
        for street in Street::ALL {
            self.play_street(street)?;
        }
        self.game_end_update()
    }

    /// Abandons an unfinished hand, giving every player back what it committed.
    pub fn abort(self) {
        if self.phase == HandPhase::Settled {
            return;
        }
        warn!(hand_id = %self.record.hand_id, phase = ?self.phase, "hand aborted, refunding commitments");
        for seat in self.table.seats.iter_mut() {
            seat.player.refund_commitments();
        }
    }
}

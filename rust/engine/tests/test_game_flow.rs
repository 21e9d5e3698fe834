mod common;

use common::{passive, scripted_table, seat_names, seeded, Journal, Scripted};
use holdem_engine::channel::{DecisionContext, LocalSeat, Notice, PlayerChannel};
use holdem_engine::config::TableConfig;
use holdem_engine::engine::HandPhase;
use holdem_engine::errors::{ChannelError, EngineError};
use holdem_engine::player::Decision;
use holdem_engine::table::{Seat, Table};

#[test]
fn operations_must_follow_phase_order() {
    let journal = Journal::default();
    let mut table = scripted_table(seeded(1), &["a", "b"], vec![], &journal);
    let mut engine = table.begin_hand();

    assert!(matches!(
        engine.round_1_play(),
        Err(EngineError::OutOfOrder {
            expected: HandPhase::Flop,
            actual: HandPhase::Init,
            ..
        })
    ));
    engine.game_start_setup().unwrap();
    assert_eq!(engine.phase(), HandPhase::PreFlop);
    assert!(matches!(engine.game_start_setup(), Err(EngineError::OutOfOrder { .. })));
    assert!(matches!(engine.game_end_update(), Err(EngineError::OutOfOrder { .. })));

    engine.round_0_play().unwrap();
    assert_eq!(engine.board().len(), 0);
    engine.round_1_play().unwrap();
    assert_eq!(engine.board().len(), 3);
    engine.round_2_play().unwrap();
    assert_eq!(engine.board().len(), 4);
    engine.round_3_play().unwrap();
    assert_eq!(engine.board().len(), 5);
    assert_eq!(engine.phase(), HandPhase::Showdown);

    engine.game_end_update().unwrap();
    assert_eq!(engine.phase(), HandPhase::Settled);
}

#[test]
fn full_hand_conserves_points_and_rotates_seats() {
    let journal = Journal::default();
    let mut table = scripted_table(seeded(3), &["a", "b", "c"], vec![], &journal);
    let before = table.total_points();

    let record = table.play_hand().unwrap();
    assert_eq!(record.board.len(), 5);
    assert_eq!(record.pot(), 6);
    assert_eq!(record.pot(), record.returned());
    assert!(record.showdown.is_some());
    assert_eq!(table.total_points(), before);
    assert_eq!(seat_names(&table), vec!["b", "c", "a"]);
    assert_eq!(table.hands_played(), 1);
}

#[test]
fn preflop_starts_after_big_blind_and_big_blind_has_option() {
    let journal = Journal::default();
    let mut table = scripted_table(seeded(5), &["a", "b", "c"], vec![], &journal);
    table.play_hand().unwrap();
    assert_eq!(journal.requests_in_round(0), vec!["c", "a", "b"]);
}

#[test]
fn called_big_blind_without_option_is_not_asked() {
    let journal = Journal::default();
    let cfg = TableConfig {
        big_blind_option: false,
        ..seeded(5)
    };
    let mut table = scripted_table(cfg, &["a", "b", "c"], vec![], &journal);
    table.play_hand().unwrap();
    assert_eq!(journal.requests_in_round(0), vec!["c", "a"]);
}

#[test]
fn heads_up_small_blind_acts_first() {
    let journal = Journal::default();
    let mut table = scripted_table(seeded(8), &["a", "b"], vec![], &journal);
    table.play_hand().unwrap();
    assert_eq!(journal.requests_in_round(0), vec!["a", "b"]);
    assert_eq!(journal.requests_in_round(1), vec!["a", "b"]);
}

#[test]
fn checked_rounds_ask_each_player_once_from_seat_zero() {
    let journal = Journal::default();
    let mut table = scripted_table(seeded(9), &["a", "b", "c", "d"], vec![], &journal);
    table.play_hand().unwrap();
    for round in 1..=3 {
        assert_eq!(journal.requests_in_round(round), vec!["a", "b", "c", "d"]);
    }
}

#[test]
fn players_are_notified_in_hand_order() {
    let journal = Journal::default();
    let mut table = scripted_table(seeded(11), &["a", "b", "c"], vec![], &journal);
    table.play_hand().unwrap();

    let a = journal.notices_for("a");
    assert_eq!(a[0], Notice::InitialPoints(1000));
    assert_eq!(a[1], Notice::GameStartReset);
    assert_eq!(a[2], Notice::SmallBlind(1));
    assert!(matches!(a[3], Notice::InitialHand { .. }));
    assert!(a[4..8].iter().all(|n| *n == Notice::RoundEnd));
    assert!(matches!(a[8], Notice::GameEndHands(ref h) if h.len() == 3));
    assert!(matches!(a[9], Notice::GameEndBets(ref b) if b.values().all(|&v| v == 2)));
    assert!(matches!(a[10], Notice::GameEndReturns(ref r) if r.values().sum::<u32>() == 6));
    match &a[11] {
        Notice::GameEndSummary(s) => {
            assert_eq!(s.total_committed, 2);
            assert_eq!(s.board.len(), 5);
            assert_eq!(s.your_hand.len(), 2);
            assert!(s.your_best_hand.is_some());
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(a.len(), 12);

    assert_eq!(journal.notices_for("b")[2], Notice::BigBlind(2));
    assert!(matches!(journal.notices_for("c")[2], Notice::InitialHand { .. }));
}

#[test]
fn seeded_tables_replay_the_same_hands() {
    let play = || {
        let journal = Journal::default();
        let mut table = scripted_table(seeded(42), &["a", "b", "c"], vec![], &journal);
        (0..3)
            .map(|_| {
                let r = table.play_hand().unwrap();
                (r.board, r.results)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}

/// Plays passively but drops off once the hand is over.
struct LeavesAtShowdown;

impl PlayerChannel for LeavesAtShowdown {
    fn notify(&mut self, notice: &Notice) -> Result<(), ChannelError> {
        match notice {
            Notice::GameEndHands(_) => Err(ChannelError::Disconnected),
            _ => Ok(()),
        }
    }

    fn request_move(&mut self, ctx: &DecisionContext) -> Result<Decision, ChannelError> {
        Ok(passive(ctx))
    }
}

#[test]
fn seats_rotate_when_the_result_cannot_be_delivered() {
    let journal = Journal::default();
    let seats = vec![
        Seat::new("a", LocalSeat::new(Scripted::new("a", vec![], &journal))),
        Seat::new("b", LocalSeat::new(Scripted::new("b", vec![], &journal))),
        Seat::new("c", LeavesAtShowdown),
    ];
    let mut table = Table::new(seeded(4), seats).unwrap();
    table.send_initial_points().unwrap();
    let before = table.total_points();

    match table.play_hand() {
        Err(EngineError::Channel { player, source }) => {
            assert_eq!(player, "c");
            assert!(matches!(source, ChannelError::Disconnected));
        }
        other => panic!("unexpected {other:?}"),
    }
    // points were already paid out and stay that way
    assert_eq!(table.total_points(), before);
    assert!(table.players().all(|p| p.total_committed() == 0));
    assert_eq!(seat_names(&table), vec!["b", "c", "a"]);
}

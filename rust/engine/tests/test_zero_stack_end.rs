mod common;

use common::{passive, seeded};
use holdem_engine::channel::{DecisionContext, DecisionProvider, LocalSeat};
use holdem_engine::errors::EngineError;
use holdem_engine::player::Decision;
use holdem_engine::table::{Seat, Table};

struct Passive;

impl DecisionProvider for Passive {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        passive(ctx)
    }
    fn name(&self) -> &str {
        "passive"
    }
}

struct Shover;

impl DecisionProvider for Shover {
    fn decide(&mut self, _ctx: &DecisionContext) -> Decision {
        Decision::AllIn
    }
    fn name(&self) -> &str {
        "shover"
    }
}

fn two_seats() -> Vec<Seat> {
    vec![
        Seat::new("a", LocalSeat::new(Passive)),
        Seat::new("b", LocalSeat::new(Passive)),
    ]
}

#[test]
fn unfunded_seats_cannot_start_a_hand() {
    let mut table = Table::new(seeded(1), two_seats()).unwrap();
    match table.play_hand() {
        Err(EngineError::BustedPlayer(name)) => assert_eq!(name, "a"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(table.total_points(), 0);
}

#[test]
fn busted_player_blocks_the_next_hand_until_removed() {
    let seats = vec![
        Seat::new("a", LocalSeat::new(Shover)),
        Seat::new("b", LocalSeat::new(Shover)),
    ];
    let mut table = Table::new(seeded(3), seats).unwrap();
    table.send_initial_points().unwrap();
    let total = table.total_points();

    while table.players().all(|p| p.points() > 0) {
        table.play_hand().unwrap();
    }
    let busted = table
        .players()
        .find(|p| p.points() == 0)
        .map(|p| p.name().to_string())
        .unwrap();

    match table.play_hand() {
        Err(EngineError::BustedPlayer(name)) => assert_eq!(name, busted),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(table.total_points(), total);
    assert_eq!(table.remove_busted(), vec![busted]);
    assert_eq!(table.seat_count(), 1);
}

#[test]
fn passive_hand_leaves_everyone_seated() {
    let mut table = Table::new(seeded(1), two_seats()).unwrap();
    table.send_initial_points().unwrap();
    table.play_hand().unwrap();
    assert!(table.remove_busted().is_empty());
    assert_eq!(table.seat_count(), 2);
}

#[test]
fn too_few_or_duplicate_seats_are_rejected() {
    let one = vec![Seat::new("a", LocalSeat::new(Passive))];
    assert!(matches!(Table::new(seeded(1), one), Err(EngineError::Config(_))));

    let dup = vec![
        Seat::new("a", LocalSeat::new(Passive)),
        Seat::new("a", LocalSeat::new(Passive)),
    ];
    assert!(matches!(Table::new(seeded(1), dup), Err(EngineError::Config(_))));
}

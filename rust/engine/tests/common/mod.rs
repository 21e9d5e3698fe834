#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use holdem_engine::channel::{DecisionContext, DecisionProvider, LocalSeat, Notice};
use holdem_engine::config::TableConfig;
use holdem_engine::errors::IllegalMove;
use holdem_engine::player::Decision;
use holdem_engine::table::{Seat, Table};

#[derive(Debug, Default)]
pub struct Entries {
    /// (player, round) of every move request
    pub requests: Vec<(String, u8)>,
    pub rejections: Vec<(String, IllegalMove)>,
    pub notices: Vec<(String, Notice)>,
}

/// Shared log written by every [`Scripted`] player at a table.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Entries>>);

impl Journal {
    pub fn requests_in_round(&self, round: u8) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(_, r)| *r == round)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.0.lock().unwrap().requests.len()
    }

    pub fn rejections(&self) -> Vec<(String, IllegalMove)> {
        self.0.lock().unwrap().rejections.clone()
    }

    pub fn notices_for(&self, name: &str) -> Vec<Notice> {
        self.0
            .lock()
            .unwrap()
            .notices
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    pub fn clear(&self) {
        let mut e = self.0.lock().unwrap();
        e.requests.clear();
        e.rejections.clear();
        e.notices.clear();
    }
}

/// Checks when it can, calls when it can afford to, otherwise goes all-in.
pub fn passive(ctx: &DecisionContext) -> Decision {
    if ctx.can_check() {
        Decision::Check
    } else if ctx.points >= ctx.to_call() {
        Decision::Call
    } else {
        Decision::AllIn
    }
}

/// Plays queued decisions first, then falls back to [`passive`].
pub struct Scripted {
    name: String,
    moves: VecDeque<Decision>,
    journal: Journal,
}

impl Scripted {
    pub fn new(name: &str, moves: Vec<Decision>, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            moves: moves.into(),
            journal: journal.clone(),
        }
    }
}

impl DecisionProvider for Scripted {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        self.journal
            .0
            .lock()
            .unwrap()
            .requests
            .push((self.name.clone(), ctx.round));
        self.moves.pop_front().unwrap_or_else(|| passive(ctx))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rejected(&mut self, reason: &IllegalMove) {
        self.journal
            .0
            .lock()
            .unwrap()
            .rejections
            .push((self.name.clone(), reason.clone()));
    }

    fn observe(&mut self, notice: &Notice) {
        self.journal
            .0
            .lock()
            .unwrap()
            .notices
            .push((self.name.clone(), notice.clone()));
    }
}

/// Seats one scripted player per name and sends the starting points.
pub fn scripted_table(
    cfg: TableConfig,
    names: &[&str],
    mut scripts: Vec<Vec<Decision>>,
    journal: &Journal,
) -> Table {
    scripts.resize(names.len(), Vec::new());
    let seats = names
        .iter()
        .zip(scripts)
        .map(|(name, moves)| Seat::new(*name, LocalSeat::new(Scripted::new(name, moves, journal))))
        .collect();
    let mut table = Table::new(cfg, seats).expect("valid table");
    table.send_initial_points().expect("initial points");
    table
}

pub fn seeded(seed: u64) -> TableConfig {
    TableConfig {
        seed: Some(seed),
        ..TableConfig::default()
    }
}

pub fn seat_names(table: &Table) -> Vec<String> {
    table.players().map(|p| p.name().to_string()).collect()
}

use std::collections::HashSet;

use chrono::Utc;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::channel::{Notice, PlayerChannel};
use crate::config::TableConfig;
use crate::engine::Engine;
use crate::errors::{ConfigError, EngineError};
use crate::player::Player;
use crate::record::{format_hand_id, HandRecord};

/// A player together with the channel used to reach it.
pub struct Seat {
    pub(crate) player: Player,
    pub(crate) channel: Box<dyn PlayerChannel>,
}

impl Seat {
    /// Seats `name` with no points; `Table::send_initial_points` funds it.
    pub fn new(name: impl Into<String>, channel: impl PlayerChannel + 'static) -> Self {
        Self::boxed(name, Box::new(channel))
    }

    pub fn boxed(name: impl Into<String>, channel: Box<dyn PlayerChannel>) -> Self {
        Self {
            player: Player::new(name, 0),
            channel,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat").field("player", &self.player).finish_non_exhaustive()
    }
}

/// A session of hands between a fixed set of seats.
///
/// Seat 0 posts the small blind and seat 1 the big blind; after every hand
/// the seats rotate one place so the blinds move around the table.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    pub(crate) seats: Vec<Seat>,
    rng: ChaCha20Rng,
    date: String,
    hands_played: u32,
}

impl Table {
    pub fn new(config: TableConfig, seats: Vec<Seat>) -> Result<Self, EngineError> {
        config.validate()?;
        config.validate_seats(seats.len())?;
        let mut names = HashSet::new();
        for seat in &seats {
            if !names.insert(seat.player.name()) {
                return Err(ConfigError::DuplicateName(seat.player.name().to_string()).into());
            }
        }
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        Ok(Self {
            config,
            seats,
            rng,
            date: Utc::now().format("%Y%m%d").to_string(),
            hands_played: 0,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Players in current seat order.
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.seats.iter().map(|s| &s.player)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players().find(|p| p.name() == name)
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    /// Points held plus points committed, across all seats.
    pub fn total_points(&self) -> u64 {
        self.players()
            .map(|p| p.points() as u64 + p.total_committed() as u64)
            .sum()
    }

    /// Gives every seat the configured starting stack and tells it so.
    pub fn send_initial_points(&mut self) -> Result<(), EngineError> {
        let points = self.config.starting_points;
        for seat in self.seats.iter_mut() {
            seat.player.set_points(points);
            seat.channel
                .notify(&Notice::InitialPoints(points))
                .map_err(|source| EngineError::Channel {
                    player: seat.player.name().to_string(),
                    source,
                })?;
        }
        info!(points, seats = self.seats.len(), "initial points sent");
        Ok(())
    }

    /// Starts the next hand. Its deck seed is drawn from the table RNG, so a
    /// seeded table replays the same sequence of hands.
    pub fn begin_hand(&mut self) -> Engine<'_> {
        self.hands_played += 1;
        let hand_id = format_hand_id(&self.date, self.hands_played);
        let seed = self.rng.next_u64();
        Engine::new(self, hand_id, seed)
    }

    /// Plays one complete hand. On failure the hand's commitments are refunded.
    pub fn play_hand(&mut self) -> Result<HandRecord, EngineError> {
        let mut engine = self.begin_hand();
        match engine.run() {
            Ok(record) => Ok(record),
            Err(e) => {
                engine.abort();
                Err(e)
            }
        }
    }

    /// Removes seats with no points left and returns their names.
    pub fn remove_busted(&mut self) -> Vec<String> {
        let (busted, kept): (Vec<Seat>, Vec<Seat>) =
            self.seats.drain(..).partition(|s| s.player.points() == 0);
        self.seats = kept;
        busted.into_iter().map(|s| s.player.name().to_string()).collect()
    }

    /// Hands the seats back, e.g. to reuse their channels.
    pub fn into_seats(self) -> Vec<Seat> {
        self.seats
    }
}

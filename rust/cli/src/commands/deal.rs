//! Deal command handler.
//!
//! Deals hole cards to every seat and a complete board from one deck, then
//! shows the best hand category of each seat and who would win the pot.
//! A seed makes the deal reproducible.

use crate::config;
use crate::error::CliError;
use crate::ui::format_cards;
use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::errors::EngineError;
use holdem_engine::hand::{rank_hand, rank_tiers};
use std::io::Write;

/// Handle the deal command.
///
/// `players` and `seed` fall back to the resolved configuration; without any
/// seed a random one is drawn and printed so the deal can be repeated.
pub fn handle_deal_command(
    players: Option<usize>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let players = players.unwrap_or(cfg.players);
    let table = cfg.table_config(seed);
    table
        .validate_seats(players)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let seed = table.seed.unwrap_or_else(rand::random);

    let mut deck = Deck::with_seed(table.n_packs, seed);
    deck.shuffle();
    let holes = (0..players)
        .map(|_| deck.draw_n(2))
        .collect::<Result<Vec<_>, _>>()
        .map_err(EngineError::from)?;
    let board = deck.draw_n(5).map_err(EngineError::from)?;

    let pools: Vec<Vec<Card>> = holes
        .iter()
        .map(|hole| hole.iter().chain(&board).copied().collect())
        .collect();

    writeln!(out, "Seed: {}", seed)?;
    for (i, (hole, pool)) in holes.iter().zip(&pools).enumerate() {
        let rank = rank_hand(pool).map_err(EngineError::from)?;
        writeln!(
            out,
            "Hole P{}: {} ({})",
            i + 1,
            format_cards(hole),
            rank.category.name()
        )?;
    }
    writeln!(out, "Board: {}", format_cards(&board))?;

    let tiers = rank_tiers(&pools).map_err(EngineError::from)?;
    let winners: Vec<String> = tiers
        .first()
        .map(|tier| tier.iter().map(|i| format!("P{}", i + 1)).collect())
        .unwrap_or_default();
    writeln!(out, "Winner: {}", winners.join(", "))?;
    Ok(())
}

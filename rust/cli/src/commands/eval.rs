//! Hand evaluation command.
//!
//! `holdem eval AH KH QH JH 10H` ranks one pool of 5 to 7 cards.
//! Several pools separated by `--vs` are ranked against each other and
//! printed strongest first; pools with exactly equal hands share a place.

use crate::error::{BatchValidationError, CliError};
use crate::ui::format_cards;
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::hand::{best_five, rank_tiers};
use std::io::Write;

const SEPARATOR: &str = "--vs";

/// Handle the eval command.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` naming the offending pool when a card
/// does not parse, a pool holds fewer than 5 or more than 7 cards, or a
/// card appears twice in one pool.
pub fn handle_eval_command(args: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let pools = split_pools(args)?;

    if pools.len() == 1 {
        let (five, rank) = best_five(&pools[0]).map_err(|e| invalid(1, e))?;
        writeln!(
            out,
            "{} (category {})",
            rank.category.name(),
            rank.category.value()
        )?;
        writeln!(out, "Best five: {}", format_cards(&five))?;
        writeln!(out, "Kickers: {:?}", rank.kickers)?;
        return Ok(());
    }

    let mut described = Vec::with_capacity(pools.len());
    for (i, pool) in pools.iter().enumerate() {
        let (five, rank) = best_five(pool).map_err(|e| invalid(i + 1, e))?;
        described.push(format!(
            "{} -> {} [{}]",
            format_cards(pool),
            rank.category.name(),
            format_cards(&five)
        ));
    }
    let tiers = rank_tiers(&pools).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    for (place, tier) in tiers.iter().enumerate() {
        for &i in tier {
            let tie = if tier.len() > 1 { " (tie)" } else { "" };
            writeln!(out, "{}. pool {}: {}{}", place + 1, i + 1, described[i], tie)?;
        }
    }
    Ok(())
}

fn split_pools(args: &[String]) -> Result<Vec<Vec<Card>>, CliError> {
    let mut pools = Vec::new();
    for (i, chunk) in args.split(|a| a == SEPARATOR).enumerate() {
        let cards = parse_cards(&chunk.join(" ")).map_err(|e| invalid(i + 1, e))?;
        if cards.is_empty() {
            return Err(invalid(i + 1, "no cards given"));
        }
        for (j, card) in cards.iter().enumerate() {
            if cards[..j].contains(card) {
                return Err(invalid(i + 1, format!("card {} appears twice", card)));
            }
        }
        pools.push(cards);
    }
    Ok(pools)
}

fn invalid(pool: usize, message: impl ToString) -> CliError {
    BatchValidationError {
        item_context: format!("pool {}", pool),
        message: message.to_string(),
    }
    .into()
}

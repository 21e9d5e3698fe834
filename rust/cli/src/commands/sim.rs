//! Simulation command handler.
//!
//! Seats one bot per player at a single table and plays hands until the
//! requested count is reached or fewer than two players have points left.
//! Busted players are removed between hands. After every hand the table's
//! chip total is checked against the starting total.
//!
//! # Examples
//!
//! ```no_run
//! use holdem_cli::commands::sim::handle_sim_command;
//! use std::io;
//!
//! let bots = Some(vec!["baseline".to_string(), "random".to_string()]);
//! handle_sim_command(100, None, bots, Some(42), false, &mut io::stdout(), &mut io::stderr())
//!     .unwrap();
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_ai::create_seeded_bot;
use holdem_engine::channel::LocalSeat;
use holdem_engine::record::HandRecord;
use holdem_engine::table::{Seat, Table};
use std::io::Write;
use tracing::{debug, info};

/// Handle the sim command.
///
/// # Arguments
///
/// * `hands` - Number of hands to play
/// * `players` - Seat count when `bots` is absent (defaults to the config)
/// * `bots` - Bot kind per seat (defaults to the configured bot in every seat)
/// * `seed` - Table seed; bots that use randomness are seeded from it too
/// * `json` - Print each `HandRecord` as a JSON line instead of a summary line
///
/// In JSON mode the final chip table goes to `err` so `out` stays JSONL.
pub fn handle_sim_command(
    hands: u32,
    players: Option<usize>,
    bots: Option<Vec<String>>,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let kinds = match bots {
        Some(kinds) if !kinds.is_empty() => kinds,
        _ => vec![cfg.bot.clone(); players.unwrap_or(cfg.players)],
    };
    let table_config = cfg.table_config(seed);
    let bot_seed = table_config.seed;

    let mut seats = Vec::with_capacity(kinds.len());
    for (i, kind) in kinds.iter().enumerate() {
        let bot = create_seeded_bot(kind, bot_seed.map(|s| s.wrapping_add(i as u64 + 1)))?;
        seats.push(Seat::new(
            format!("p{}-{}", i + 1, kind.trim()),
            LocalSeat::new(bot),
        ));
    }
    let mut table =
        Table::new(table_config, seats).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    table.send_initial_points()?;
    let total = table.total_points();
    let mut busted: Vec<String> = Vec::new();

    let mut played = 0u32;
    while played < hands {
        if table.seat_count() < 2 {
            ui::display_warning(
                err,
                &format!(
                    "stopped after {} of {} hands: fewer than two players have points",
                    played, hands
                ),
            )?;
            break;
        }
        let record = table.play_hand()?;
        played += 1;

        let now = table.total_points();
        if now != total {
            return Err(CliError::Engine(format!(
                "chip total changed from {} to {} in hand {}",
                total, now, record.hand_id
            )));
        }

        if json {
            let line = record.to_json_line().map_err(std::io::Error::other)?;
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "{}", summary_line(&record))?;
        }

        for name in table.remove_busted() {
            debug!(player = %name, "busted");
            if !json {
                writeln!(out, "  {} is out", name)?;
            }
            busted.push(name);
        }
    }
    info!(played, seats = table.seat_count(), "simulation finished");

    if json {
        write_report(err, played, &table, &busted)
    } else {
        write_report(out, played, &table, &busted)
    }
}

fn summary_line(record: &HandRecord) -> String {
    let winners: Vec<&str> = match &record.showdown {
        Some(showdown) => showdown.winners.iter().map(String::as_str).collect(),
        None => record
            .results
            .iter()
            .filter(|r| r.returned > 0)
            .map(|r| r.name.as_str())
            .collect(),
    };
    let how = if record.showdown.is_some() {
        "showdown"
    } else {
        "uncontested"
    };
    format!(
        "{}: pot {} to {} ({}) board [{}]",
        record.hand_id,
        record.pot(),
        winners.join(", "),
        how,
        ui::format_cards(&record.board)
    )
}

fn write_report(
    out: &mut dyn Write,
    played: u32,
    table: &Table,
    busted: &[String],
) -> Result<(), CliError> {
    writeln!(out, "Simulated: {} hands", played)?;
    let mut rows: Vec<(String, u32)> = table
        .players()
        .map(|p| (p.name().to_string(), p.points()))
        .collect();
    rows.extend(busted.iter().map(|name| (name.clone(), 0)));
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    writeln!(out, "Chips:")?;
    for (name, points) in rows {
        writeln!(out, "  {:<16} {:>8}", name, points)?;
    }
    Ok(())
}

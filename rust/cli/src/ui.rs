//! Small helpers for consistent terminal output across commands.

use holdem_engine::cards::Card;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Cards in wire form separated by spaces, e.g. `10H AS`.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn cards_are_space_separated() {
        let cards = parse_cards("10H AS 2c").unwrap();
        assert_eq!(format_cards(&cards), "10H AS 2C");
        assert_eq!(format_cards(&[]), "");
    }

    #[test]
    fn warnings_are_prefixed() {
        let mut err = Vec::new();
        display_warning(&mut err, "careful").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "WARNING: careful\n");
    }
}

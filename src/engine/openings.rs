//! Opening-name lookup by move prefix.
//!
//! The view layer shows a friendly opening name once the first moves of a
//! game match a known line. Lines are stored in coordinate notation and
//! matched as prefixes of the played history; the deepest match wins, so
//! "Ruy Lopez" beats "King's Knight Opening" beats "Open Game".

use crate::engine::types::Move;

/// Known opening lines, shallowest first. Order is irrelevant to lookup.
const OPENINGS: &[(&[&str], &str)] = &[
    (&["e2e4"], "King's Pawn Opening"),
    (&["e2e4", "e7e5"], "Open Game"),
    (&["e2e4", "e7e5", "g1f3"], "King's Knight Opening"),
    (&["e2e4", "e7e5", "g1f3", "b8c6"], "Two Knights Variation"),
    (&["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"], "Ruy Lopez"),
    (&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4"], "Italian Game"),
    (&["e2e4", "e7e5", "f1c4"], "Bishop's Opening"),
    (&["e2e4", "e7e5", "f2f4"], "King's Gambit"),
    (&["e2e4", "c7c5"], "Sicilian Defence"),
    (&["e2e4", "c7c5", "g1f3", "d7d6"], "Sicilian Defence, Najdorf Setup"),
    (&["e2e4", "e7e6"], "French Defence"),
    (&["e2e4", "c7c6"], "Caro-Kann Defence"),
    (&["e2e4", "d7d5"], "Scandinavian Defence"),
    (&["d2d4"], "Queen's Pawn Opening"),
    (&["d2d4", "d7d5"], "Closed Game"),
    (&["d2d4", "d7d5", "c2c4"], "Queen's Gambit"),
    (&["d2d4", "d7d5", "c2c4", "e7e6"], "Queen's Gambit Declined"),
    (&["d2d4", "d7d5", "c2c4", "d5c4"], "Queen's Gambit Accepted"),
    (&["d2d4", "g8f6"], "Indian Defence"),
    (&["d2d4", "g8f6", "c2c4", "g7g6"], "King's Indian Defence"),
    (&["d2d4", "g8f6", "c2c4", "e7e6"], "Nimzo-Indian Setup"),
    (&["c2c4"], "English Opening"),
    (&["g1f3"], "Reti Opening"),
    (&["f2f3", "e7e5", "g2g4"], "Fool's Mate Trap"),
];

/// The name of the deepest known line the played moves begin with.
pub fn lookup(history: &[Move]) -> Option<&'static str> {
    let played: Vec<String> = history.iter().map(Move::to_string).collect();
    OPENINGS
        .iter()
        .filter(|&&(line, _)| {
            line.len() <= played.len()
                && line.iter().zip(&played).all(|(a, b)| *a == b.as_str())
        })
        .max_by_key(|&&(line, _)| line.len())
        .map(|&(_, name)| name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(list: &[&str]) -> Vec<Move> {
        list.iter()
            .map(|s| Move::from_coordinate(s).unwrap())
            .collect()
    }

    #[test]
    fn empty_history_has_no_name() {
        assert_eq!(lookup(&[]), None);
    }

    #[test]
    fn first_move_matches() {
        assert_eq!(lookup(&moves(&["e2e4"])), Some("King's Pawn Opening"));
        assert_eq!(lookup(&moves(&["d2d4"])), Some("Queen's Pawn Opening"));
        assert_eq!(lookup(&moves(&["c2c4"])), Some("English Opening"));
    }

    #[test]
    fn deepest_prefix_wins() {
        assert_eq!(lookup(&moves(&["e2e4", "e7e5"])), Some("Open Game"));
        assert_eq!(
            lookup(&moves(&["e2e4", "e7e5", "g1f3"])),
            Some("King's Knight Opening")
        );
        assert_eq!(
            lookup(&moves(&["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"])),
            Some("Ruy Lopez")
        );
    }

    #[test]
    fn name_sticks_past_the_known_line() {
        // Moves beyond the table keep the deepest earlier match.
        assert_eq!(
            lookup(&moves(&["e2e4", "c7c5", "b1c3", "b8c6"])),
            Some("Sicilian Defence")
        );
    }

    #[test]
    fn unknown_first_move_has_no_name() {
        assert_eq!(lookup(&moves(&["a2a3"])), None);
        assert_eq!(lookup(&moves(&["h2h4", "e7e5"])), None);
    }
}

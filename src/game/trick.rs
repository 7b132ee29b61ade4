//! Trick tracking during the play phase.

use serde::{Deserialize, Serialize};

use crate::combos::{ComboCatalog, Combination};
use crate::core::{PlayerId, NUM_PLAYERS};

/// The trick in progress.
///
/// A trick opens with a leader and no winning play. Every play replaces the
/// winning play; the trick closes after `NUM_PLAYERS - 1` consecutive passes
/// and the winning seat leads the next one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerId,

    /// Seat and catalogue index of the play to beat.
    winning: Option<(PlayerId, usize)>,
}

impl Trick {
    /// Open a new trick.
    #[must_use]
    pub fn new(leader: PlayerId) -> Self {
        Self {
            leader,
            winning: None,
        }
    }

    #[must_use]
    pub fn leader(&self) -> PlayerId {
        self.leader
    }

    /// Seat holding the winning play.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winning.map(|(seat, _)| seat)
    }

    /// Catalogue index of the winning play.
    #[must_use]
    pub fn winning_index(&self) -> Option<usize> {
        self.winning.map(|(_, index)| index)
    }

    /// The winning combination, looked up in `catalog`.
    #[must_use]
    pub fn winning_combination<'a>(&self, catalog: &'a ComboCatalog) -> Option<&'a Combination> {
        self.winning_index().and_then(|index| catalog.get(index))
    }

    /// Whether the seat to act may pass. The opener of a trick may not.
    #[must_use]
    pub fn can_pass(&self) -> bool {
        self.winning.is_some()
    }

    /// Record a play as the new winning play.
    pub fn record_play(&mut self, seat: PlayerId, index: usize) {
        self.winning = Some((seat, index));
    }

    /// Whether `consecutive_passes` closes this trick.
    #[must_use]
    pub fn closes_after(&self, consecutive_passes: u8) -> bool {
        self.winning.is_some() && usize::from(consecutive_passes) == NUM_PLAYERS - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trick_has_no_winner() {
        let trick = Trick::new(PlayerId::new(2));
        assert_eq!(trick.leader(), PlayerId::new(2));
        assert_eq!(trick.winner(), None);
        assert!(!trick.can_pass());
        assert!(!trick.closes_after(2));
    }

    #[test]
    fn test_record_play_and_close() {
        let catalog = ComboCatalog::new();
        let mut trick = Trick::new(PlayerId::new(0));
        trick.record_play(PlayerId::new(0), 3);
        trick.record_play(PlayerId::new(1), 7);

        assert_eq!(trick.winner(), Some(PlayerId::new(1)));
        assert_eq!(trick.winning_combination(&catalog), catalog.get(7));
        assert!(trick.can_pass());
        assert!(!trick.closes_after(1));
        assert!(trick.closes_after(2));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut trick = Trick::new(PlayerId::new(1));
        trick.record_play(PlayerId::new(2), 40);
        let json = serde_json::to_string(&trick).unwrap();
        let back: Trick = serde_json::from_str(&json).unwrap();
        assert_eq!(trick, back);
    }
}

//! The landlord auction.
//!
//! Seats bid in turn starting from the first bidder. A bid must beat the
//! current winning bid; a pass leaves it unchanged. The auction ends when:
//! - a bid reaches the maximum (that bidder is landlord)
//! - two seats pass in a row after a bid (the last bidder is landlord)
//! - all three seats pass without any bid (no landlord, the game ends)

use crate::core::{ActionId, PlayerId, PublicState, NUM_PLAYERS};

/// Result of one auction action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStep {
    /// Bidding continues with the next seat.
    Continue,
    /// The auction is decided.
    Resolved { landlord: PlayerId },
    /// Everyone passed; nobody is landlord.
    NoBid,
}

/// Legal auction actions: pass, then every bid above `winning_bid` up to `max_bid`.
#[must_use]
pub fn legal_actions(winning_bid: u8, max_bid: u8) -> Vec<ActionId> {
    std::iter::once(ActionId::PASS)
        .chain((winning_bid + 1..=max_bid).map(ActionId::bid))
        .collect()
}

/// Apply a pass (`None`) or a bid for the seat to act.
///
/// Updates the winning bid, provisional landlord and pass counter, and moves
/// the turn on unless the auction ends. Bid legality is the caller's concern.
pub fn apply(public: &mut PublicState, bid: Option<u8>, max_bid: u8) -> AuctionStep {
    let bidder = public.current_player;

    let step = match bid {
        None => {
            public.consecutive_passes += 1;
            let passes = usize::from(public.consecutive_passes);
            match public.landlord {
                None if passes == NUM_PLAYERS => AuctionStep::NoBid,
                Some(landlord) if passes == NUM_PLAYERS - 1 => AuctionStep::Resolved { landlord },
                _ => AuctionStep::Continue,
            }
        }
        Some(value) => {
            debug_assert!(value > public.winning_bid && value <= max_bid);
            public.winning_bid = value;
            public.landlord = Some(bidder);
            public.consecutive_passes = 0;
            if value == max_bid {
                AuctionStep::Resolved { landlord: bidder }
            } else {
                AuctionStep::Continue
            }
        }
    };

    if step == AuctionStep::Continue {
        public.current_player = bidder.next();
    }
    step
}

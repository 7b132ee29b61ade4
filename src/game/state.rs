//! The game state machine: Deal → Auction → Play → GameOver.
//!
//! `DouDizhuState` owns everything about one game: the public record, the
//! three hands, the bottom, the dealer and the trick in progress. Each
//! applied action is dispatched on the current [`Phase`].
//!
//! ## Legal-action cache
//!
//! `legal_actions()` memoises its result in an explicit field. Every
//! mutating call clears it, so a cached list always describes the current
//! state.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace};

use super::auction::{self, AuctionStep};
use super::dealer::Dealer;
use super::scoring::{self, GameOutcome};
use super::trick::Trick;
use crate::cards::{Card, RankCounts};
use crate::combos::{ComboCatalog, Combination};
use crate::core::{
    ActionId, ActionKind, ActionRecord, Actor, GameConfig, GameError, Phase, PlayerId, PlayerMap,
    PublicState, NUM_CARDS, NUM_DEALT_CARDS,
};
use crate::rules::SequentialGame;

/// One game of Dou Dizhu.
///
/// Built by [`DouDizhu::new_game`](super::DouDizhu::new_game). Cloning gives
/// an independent game; the combination catalogue is shared read-only.
#[derive(Clone, Debug)]
pub struct DouDizhuState {
    config: GameConfig,
    catalog: Arc<ComboCatalog>,

    public: PublicState,
    hands: PlayerMap<RankCounts>,

    /// Cards set aside at the end of the deal; empty before that.
    bottom: RankCounts,

    dealer: Dealer,
    trick: Trick,
    outcome: Option<GameOutcome>,

    /// History length when the auction and the play phase began.
    auction_start: Option<usize>,
    play_start: Option<usize>,

    legal_cache: Option<Vec<ActionId>>,
}

impl DouDizhuState {
    pub(crate) fn new(config: GameConfig, catalog: Arc<ComboCatalog>) -> Self {
        Self {
            config,
            catalog,
            public: PublicState::new(),
            hands: PlayerMap::with_default(),
            bottom: RankCounts::new(),
            dealer: Dealer::new(),
            trick: Trick::new(PlayerId::new(0)),
            outcome: None,
            auction_start: None,
            play_start: None,
            legal_cache: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ComboCatalog {
        &self.catalog
    }

    /// Information every seat can see.
    #[must_use]
    pub fn public(&self) -> &PublicState {
        &self.public
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.public.phase
    }

    /// Cards currently held by `seat`.
    #[must_use]
    pub fn hand(&self, seat: PlayerId) -> &RankCounts {
        &self.hands[seat]
    }

    /// The three bottom cards, once dealt.
    #[must_use]
    pub fn bottom(&self) -> &RankCounts {
        &self.bottom
    }

    /// Whether the landlord has taken the bottom into hand.
    #[must_use]
    pub fn bottom_awarded(&self) -> bool {
        self.public.landlord.is_some() && matches!(self.public.phase, Phase::Play | Phase::GameOver)
    }

    #[must_use]
    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    /// The combination the seat to act must beat, if any.
    #[must_use]
    pub fn winning_combination(&self) -> Option<&Combination> {
        self.trick.winning_combination(&self.catalog)
    }

    /// Settlement details once the game ended with a landlord.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Who acts next.
    #[must_use]
    pub fn current_player(&self) -> Actor {
        self.public.actor()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.public.phase == Phase::GameOver
    }

    /// Per-seat payouts; all zero before the game is over.
    #[must_use]
    pub fn returns(&self) -> PlayerMap<i64> {
        self.public.returns.clone()
    }

    /// Each seat's hand as dealt, with the bottom credited to the landlord
    /// once it was awarded. `None` until dealing is complete.
    #[must_use]
    pub fn original_deal(&self) -> Option<PlayerMap<RankCounts>> {
        if !self.dealer.is_complete() {
            return None;
        }
        let mut deal = PlayerMap::new(|seat| *self.dealer.dealt_hand(seat));
        if let (true, Some(landlord)) = (self.bottom_awarded(), self.public.landlord) {
            deal[landlord].add_all(&self.bottom);
        }
        Some(deal)
    }

    // === Legal actions ===

    /// Legal actions for the actor, ascending. Cached until the next mutation.
    pub fn legal_actions(&mut self) -> &[ActionId] {
        if self.legal_cache.is_none() {
            self.legal_cache = Some(self.compute_legal_actions());
        }
        self.legal_cache.as_deref().unwrap_or_default()
    }

    /// Legal actions without touching the cache.
    #[must_use]
    pub fn compute_legal_actions(&self) -> Vec<ActionId> {
        match self.public.phase {
            Phase::Deal => self.dealer.outcomes().into_iter().map(|(id, _)| id).collect(),
            Phase::Auction => auction::legal_actions(self.public.winning_bid, self.config.max_bid),
            Phase::Play => {
                let hand = &self.hands[self.public.current_player];
                let plays = self.catalog.legal_plays(hand, self.winning_combination());
                if self.trick.can_pass() {
                    let mut actions = Vec::with_capacity(plays.len() + 1);
                    actions.push(ActionId::PASS);
                    actions.extend(plays);
                    actions
                } else {
                    plays
                }
            }
            Phase::GameOver => Vec::new(),
        }
    }

    // === Chance ===

    /// Chance outcomes with probabilities.
    pub fn try_chance_outcomes(&self) -> Result<Vec<(ActionId, f64)>, GameError> {
        match self.current_player() {
            Actor::Chance => Ok(self.dealer.outcomes()),
            actor => Err(GameError::NotChanceNode(actor)),
        }
    }

    /// Chance outcomes with probabilities.
    ///
    /// # Panics
    ///
    /// Panics unless chance is to act.
    #[must_use]
    pub fn chance_outcomes(&self) -> Vec<(ActionId, f64)> {
        match self.try_chance_outcomes() {
            Ok(outcomes) => outcomes,
            Err(err) => panic!("{err}"),
        }
    }

    // === Transitions ===

    /// Apply `action` for the actor, or explain why it is not legal.
    ///
    /// On error the state is unchanged.
    pub fn try_apply_action(&mut self, action: ActionId) -> Result<(), GameError> {
        let actor = self.current_player();
        if actor == Actor::Terminal {
            return Err(GameError::GameOver);
        }
        let kind = action.kind(self.catalog.len())?;
        if self.legal_actions().binary_search(&action).is_err() {
            return Err(GameError::IllegalAction {
                action,
                actor,
                phase: self.public.phase,
            });
        }

        trace!(%actor, action = action.raw(), "apply action");
        match (self.public.phase, kind) {
            (Phase::Deal, ActionKind::FaceUpPosition(position)) => {
                self.dealer.choose_face_up(position);
                self.public.face_up_position = Some(position);
            }
            (Phase::Deal, ActionKind::Deal(card)) => self.apply_deal(card),
            (Phase::Auction, ActionKind::Pass) => self.apply_auction(None),
            (Phase::Auction, ActionKind::Bid(value)) => self.apply_auction(Some(value)),
            (Phase::Play, ActionKind::Pass) => self.apply_pass(),
            (Phase::Play, ActionKind::Play(index)) => self.apply_play(index),
            (phase, kind) => unreachable!("legal action {kind:?} has no handler in {phase:?}"),
        }

        self.public.record_action(ActionRecord::new(actor, action));
        self.legal_cache = None;
        self.assert_conservation();
        Ok(())
    }

    /// Apply an action from the legal set.
    ///
    /// # Panics
    ///
    /// Panics if the action is not legal or the game is over.
    pub fn apply_action(&mut self, action: ActionId) {
        if let Err(err) = self.try_apply_action(action) {
            panic!("{err}");
        }
    }

    fn apply_deal(&mut self, card: Card) {
        let dealt = self.dealer.deal(card);
        self.hands[dealt.seat].add(card.rank(), 1);
        self.public.hand_sizes[dealt.seat] += 1;
        if dealt.face_up {
            self.public.first_player = Some(dealt.seat);
            self.public.face_up_rank = Some(card.rank());
        }

        if self.dealer.is_complete() {
            let first = match self.public.first_player {
                Some(seat) => seat,
                None => panic!("Deal finished without a face-up card"),
            };
            self.bottom = self.dealer.deck().counts();
            self.public.phase = Phase::Auction;
            self.public.current_player = first;
            // +1 for the deal card being recorded after this returns
            self.auction_start = Some(self.public.history.len() + 1);
            debug!(first_bidder = %first, bottom = %self.bottom, "deal complete");
        }
    }

    fn apply_auction(&mut self, bid: Option<u8>) {
        match auction::apply(&mut self.public, bid, self.config.max_bid) {
            AuctionStep::Continue => {}
            AuctionStep::NoBid => {
                self.public.phase = Phase::GameOver;
                debug!("auction ended without a bid");
            }
            AuctionStep::Resolved { landlord } => {
                self.hands[landlord].add_all(&self.bottom);
                self.public.hand_sizes[landlord] += self.bottom.total();
                self.public.phase = Phase::Play;
                self.public.current_player = landlord;
                self.public.consecutive_passes = 0;
                self.trick = Trick::new(landlord);
                self.play_start = Some(self.public.history.len() + 1);
                debug!(
                    %landlord,
                    bid = self.public.winning_bid,
                    "auction resolved"
                );
            }
        }
    }

    fn apply_pass(&mut self) {
        let seat = self.public.current_player;
        self.public.consecutive_passes += 1;

        if self.trick.closes_after(self.public.consecutive_passes) {
            let winner = self.trick.winner().unwrap_or(seat);
            self.public.tricks_played += 1;
            self.public.consecutive_passes = 0;
            self.public.current_player = winner;
            self.trick = Trick::new(winner);
            debug!(%winner, tricks = self.public.tricks_played, "trick closed");
        } else {
            self.public.current_player = seat.next();
        }
    }

    fn apply_play(&mut self, index: usize) {
        let seat = self.public.current_player;
        let catalog = Arc::clone(&self.catalog);
        let Some(combo) = catalog.get(index) else {
            panic!("Catalogue index {index} out of range");
        };

        self.public.consecutive_passes = 0;
        if combo.category.is_bomb_like() {
            self.public.bombs_played += 1;
        }
        self.public.hands_played[seat] += 1;
        self.trick.record_play(seat, index);

        self.hands[seat].remove_all(&combo.counts);
        self.public.played_cards.add_all(&combo.counts);
        self.public.hand_sizes[seat] -= combo.card_count();

        if self.hands[seat].is_empty() {
            self.public.final_winner = Some(seat);
            self.public.phase = Phase::GameOver;
            self.settle();
        } else {
            self.public.current_player = seat.next();
        }
    }

    fn settle(&mut self) {
        let Some(outcome) = scoring::settle(&self.public, &self.config) else {
            return;
        };
        self.public.returns = outcome.returns();
        info!(
            landlord = %outcome.landlord,
            winner = %outcome.winner,
            bid = outcome.bid,
            bombs = outcome.bombs,
            spring = outcome.spring,
            returns = ?self.public.returns.to_array(),
            "game scored"
        );
        self.outcome = Some(outcome);
    }

    /// Hands, the undealt deck or unawarded bottom, and played cards always
    /// add up to the full deck.
    fn assert_conservation(&self) {
        let held: u32 = self.hands.values().map(RankCounts::total).sum();
        let reserved = match self.public.phase {
            Phase::Deal => self.dealer.deck().remaining() as u32,
            _ if self.bottom_awarded() => 0,
            _ => self.bottom.total(),
        };
        let played = self.public.played_cards.total();
        assert_eq!(
            held + reserved + played,
            NUM_CARDS as u32,
            "Card conservation broken: held {held}, reserved {reserved}, played {played}"
        );
        for (seat, hand) in self.hands.iter() {
            assert_eq!(hand.total(), self.public.hand_sizes[seat], "Hand size out of sync");
        }
    }

    // === Rendering ===

    /// Human-readable name of an action taken by `actor`.
    pub fn action_to_string(&self, actor: Actor, action: ActionId) -> Result<String, GameError> {
        let kind = action.kind(self.catalog.len())?;
        let text = match (actor, kind) {
            (Actor::Chance, ActionKind::FaceUpPosition(position)) => {
                format!("Decide first card up position {position}")
            }
            (Actor::Chance, ActionKind::Deal(card)) => format!("Deal {card}"),
            (Actor::Player(_), ActionKind::Pass) => "Pass".to_string(),
            (Actor::Player(_), ActionKind::Bid(value)) => format!("Bid {value}"),
            (Actor::Player(_), ActionKind::Play(index)) => match self.catalog.get(index) {
                Some(combo) => combo.to_string(),
                None => return Err(GameError::UnknownAction(action.raw())),
            },
            _ => return Err(GameError::UnknownAction(action.raw())),
        };
        Ok(text)
    }

    fn write_log(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        start: usize,
        end: usize,
    ) -> fmt::Result {
        writeln!(f, "{title}")?;
        for record in self.public.history_since(start).take(end.saturating_sub(start)) {
            let text = self
                .action_to_string(record.actor, record.action)
                .unwrap_or_else(|_| record.action.to_string());
            writeln!(f, "  {} played {text}", record.actor)?;
        }
        Ok(())
    }

    fn write_hands(&self, f: &mut fmt::Formatter<'_>, hands: &PlayerMap<RankCounts>) -> fmt::Result {
        for (seat, hand) in hands.iter() {
            let role = match self.public.landlord {
                Some(landlord) if landlord == seat && self.bottom_awarded() => " (landlord)",
                _ => "",
            };
            writeln!(f, "{seat}{role}: {hand}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DouDizhuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history_len = self.public.history.len();
        writeln!(f, "Phase: {:?}", self.public.phase)?;

        match self.public.phase {
            Phase::Deal => {
                writeln!(f, "Dealt {} of {NUM_DEALT_CARDS} cards", self.dealer.rounds_dealt())?;
                self.write_hands(f, &self.hands)?;
            }
            Phase::Auction => {
                self.write_hands(f, &self.hands)?;
                writeln!(f, "Bottom: {}", self.bottom)?;
                if let Some(start) = self.auction_start {
                    self.write_log(f, "Auction:", start, history_len)?;
                }
            }
            Phase::Play => {
                self.write_hands(f, &self.hands)?;
                writeln!(f, "Bottom: {}", self.bottom)?;
                if let (Some(start), Some(end)) = (self.auction_start, self.play_start) {
                    self.write_log(f, "Auction:", start, end)?;
                }
                if let Some(start) = self.play_start {
                    self.write_log(f, "Play:", start, history_len)?;
                }
            }
            Phase::GameOver => {
                if let Some(deal) = self.original_deal() {
                    self.write_hands(f, &deal)?;
                }
                let auction_end = self.play_start.unwrap_or(history_len);
                if let Some(start) = self.auction_start {
                    self.write_log(f, "Auction:", start, auction_end)?;
                }
                if let Some(start) = self.play_start {
                    self.write_log(f, "Play:", start, history_len)?;
                }
                writeln!(f, "Returns:")?;
                for (seat, value) in self.public.returns.iter() {
                    writeln!(f, "  {seat}: {value}")?;
                }
            }
        }
        Ok(())
    }
}

impl SequentialGame for DouDizhuState {
    fn current_player(&self) -> Actor {
        DouDizhuState::current_player(self)
    }

    fn legal_actions(&mut self) -> &[ActionId] {
        DouDizhuState::legal_actions(self)
    }

    fn apply_action(&mut self, action: ActionId) {
        DouDizhuState::apply_action(self, action);
    }

    fn chance_outcomes(&self) -> Vec<(ActionId, f64)> {
        DouDizhuState::chance_outcomes(self)
    }

    fn returns(&self) -> PlayerMap<i64> {
        DouDizhuState::returns(self)
    }

    fn is_terminal(&self) -> bool {
        DouDizhuState::is_terminal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DouDizhu;

    /// Deal cards 0..51 in order with the face-up card at `position`.
    fn dealt(position: u8) -> DouDizhuState {
        let game = DouDizhu::default();
        let mut state = game.new_game();
        state.apply_action(ActionId::face_up(position));
        for c in 0..NUM_DEALT_CARDS as u8 {
            state.apply_action(ActionId::deal(Card(c)));
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let mut state = DouDizhu::default().new_game();
        assert_eq!(state.current_player(), Actor::Chance);
        assert_eq!(state.legal_actions().len(), 51);
        assert_eq!(state.chance_outcomes().len(), 51);
        assert_eq!(state.returns().to_array(), [0, 0, 0]);
        assert!(state.original_deal().is_none());
    }

    #[test]
    fn test_deal_enters_auction() {
        let state = dealt(5);
        assert_eq!(state.phase(), Phase::Auction);
        assert_eq!(state.public().first_player, Some(PlayerId::new(2)));
        assert_eq!(state.current_player(), Actor::Player(PlayerId::new(2)));
        // round 5 dealt card 5, an eight
        assert_eq!(state.public().face_up_rank, Some(crate::cards::Rank(5)));
        assert_eq!(state.bottom().to_string(), "2(BWJ)(CJ)");
        for seat in PlayerId::all() {
            assert_eq!(state.hand(seat).total(), 17);
        }
    }

    #[test]
    fn test_cache_invalidated_on_apply() {
        let mut state = dealt(0);
        assert_eq!(state.legal_actions().len(), 4);
        state.apply_action(ActionId::bid(2));
        assert_eq!(state.legal_actions(), &[ActionId::PASS, ActionId::bid(3)]);
    }

    #[test]
    fn test_try_apply_rejects_illegal() {
        let mut state = dealt(0);
        let err = state.try_apply_action(ActionId::play(0)).unwrap_err();
        assert!(matches!(err, GameError::IllegalAction { phase: Phase::Auction, .. }));
        assert_eq!(
            state.try_apply_action(ActionId(999_999)),
            Err(GameError::UnknownAction(999_999))
        );
        assert_eq!(state.public().history.len(), 52);
    }

    #[test]
    #[should_panic(expected = "is not legal")]
    fn test_apply_illegal_panics() {
        let mut state = dealt(0);
        state.apply_action(ActionId::face_up(3));
    }

    #[test]
    fn test_chance_outcomes_outside_chance_node() {
        let state = dealt(0);
        assert_eq!(
            state.try_chance_outcomes(),
            Err(GameError::NotChanceNode(Actor::Player(PlayerId::new(0))))
        );
    }

    #[test]
    fn test_landlord_receives_bottom() {
        let mut state = dealt(0);
        state.apply_action(ActionId::bid(3));

        assert_eq!(state.phase(), Phase::Play);
        assert_eq!(state.public().landlord, Some(PlayerId::new(0)));
        assert_eq!(state.hand(PlayerId::new(0)).total(), 20);
        assert!(state.bottom_awarded());
        // the leader cannot pass
        assert!(!state.legal_actions().contains(&ActionId::PASS));

        let deal = state.original_deal().unwrap();
        assert_eq!(deal[PlayerId::new(0)].total(), 20);
        assert_eq!(deal[PlayerId::new(1)].total(), 17);
    }

    #[test]
    fn test_action_to_string() {
        let state = dealt(0);
        let chance = Actor::Chance;
        let seat = Actor::Player(PlayerId::new(0));
        assert_eq!(
            state.action_to_string(chance, ActionId(7)).unwrap(),
            "Decide first card up position 7"
        );
        assert_eq!(state.action_to_string(chance, ActionId::deal(Card(53))).unwrap(), "Deal (CJ)");
        assert_eq!(state.action_to_string(seat, ActionId::PASS).unwrap(), "Pass");
        assert_eq!(state.action_to_string(seat, ActionId::bid(2)).unwrap(), "Bid 2");
        assert_eq!(state.action_to_string(seat, ActionId(26161)).unwrap(), "(BWJ)(CJ)");
        assert!(state.action_to_string(chance, ActionId::PASS).is_err());
    }

    #[test]
    fn test_display_per_phase() {
        let mut state = dealt(0);
        let text = state.to_string();
        assert!(text.starts_with("Phase: Auction"));
        assert!(text.contains("Bottom: 2(BWJ)(CJ)"));

        state.apply_action(ActionId::bid(1));
        state.apply_action(ActionId::PASS);
        state.apply_action(ActionId::PASS);
        let text = state.to_string();
        assert!(text.starts_with("Phase: Play"));
        assert!(text.contains("Player 0 (landlord)"));
        assert!(text.contains("Player 0 played Bid 1"));
    }
}

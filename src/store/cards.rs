//! Card store: the single owner of all card-location state.
//!
//! Five containers hold the 48 catalog cards between them: the ordered deck,
//! the shared face-up field, one hand and one capture collection per player.
//! Every public operation either moves cards between containers atomically
//! or refuses and reports an error; at every observable point the union of
//! the containers is the full catalog with no duplicates and no omissions.
//!
//! The unordered containers are `im::OrdSet`s: persistent sets make
//! snapshots O(1) to clone, and ordered iteration keeps a seeded game
//! replayable.

use im::OrdSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::{catalog, CardId, DECK_SIZE};
use crate::core::error::EngineError;
use crate::core::player::{PlayerKey, PlayerPair};
use crate::core::rng::GameRng;

/// An unordered card container.
pub type CardSet = OrdSet<CardId>;

/// Cards dealt to each hand and to the field at round start.
pub const DEAL_COUNT: usize = 8;

/// All card-location state for one game session.
///
/// ## Example
///
/// ```
/// use hanafuda_engine::core::{GameRng, PlayerKey};
/// use hanafuda_engine::store::CardStore;
///
/// let mut rng = GameRng::new(7);
/// let mut cards = CardStore::new();
///
/// cards.deal_cards(&mut rng).unwrap();
/// assert_eq!(cards.deck().len(), 24);
/// assert_eq!(cards.hand(PlayerKey::P1).len(), 8);
/// assert!(cards.integrity_check());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardStore {
    /// Draw pile, front at index 0.
    deck: Vec<CardId>,
    /// Face-up shared pool.
    field: CardSet,
    /// Cards held by each player.
    hand: PlayerPair<CardSet>,
    /// Cards captured by each player.
    collection: PlayerPair<CardSet>,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore {
    /// Create a store holding the full catalog in the deck.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deck: catalog::full_deck(),
            field: CardSet::new(),
            hand: PlayerPair::with_default(),
            collection: PlayerPair::with_default(),
        }
    }

    // === Accessors ===

    /// The draw pile, front first.
    #[must_use]
    pub fn deck(&self) -> &[CardId] {
        &self.deck
    }

    /// The shared face-up field.
    #[must_use]
    pub fn field(&self) -> &CardSet {
        &self.field
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerKey) -> &CardSet {
        &self.hand[player]
    }

    /// A player's capture collection.
    #[must_use]
    pub fn collection(&self, player: PlayerKey) -> &CardSet {
        &self.collection[player]
    }

    /// Whether both hands are empty (round boundary condition).
    #[must_use]
    pub fn hands_empty(&self) -> bool {
        PlayerKey::BOTH.iter().all(|&p| self.hand[p].is_empty())
    }

    /// Whether the given player still holds cards.
    #[must_use]
    pub fn hand_not_empty(&self, player: PlayerKey) -> bool {
        !self.hand[player].is_empty()
    }

    // === Operations ===

    /// Shuffle and deal the opening hands and field.
    ///
    /// Only valid on a fresh store: the deck must hold the entire catalog.
    /// Deals [`DEAL_COUNT`] cards to each hand and to the field, leaving 24
    /// in the deck. On error nothing is mutated.
    pub fn deal_cards(&mut self, rng: &mut GameRng) -> Result<(), EngineError> {
        if self.deck.len() != DECK_SIZE {
            return Err(EngineError::DeckNotFresh);
        }

        rng.shuffle(&mut self.deck);

        let dealt: Vec<CardId> = self.deck.drain(..3 * DEAL_COUNT).collect();
        self.hand[PlayerKey::P1] = dealt[..DEAL_COUNT].iter().copied().collect();
        self.hand[PlayerKey::P2] = dealt[DEAL_COUNT..2 * DEAL_COUNT].iter().copied().collect();
        self.field = dealt[2 * DEAL_COUNT..].iter().copied().collect();

        debug!(deck = self.deck.len(), "dealt opening hands and field");
        Ok(())
    }

    /// Peek at the front card of the deck without moving it.
    ///
    /// A visibility operation for the UI; card locations are unchanged.
    #[must_use]
    pub fn reveal_card(&self) -> Option<CardId> {
        self.deck.first().copied()
    }

    /// Draw the front card of the deck onto the field.
    ///
    /// Returns the drawn card so the caller can resolve it against the
    /// field's suit-mates.
    pub fn draw_card(&mut self) -> Result<CardId, EngineError> {
        if self.deck.is_empty() {
            return Err(EngineError::DeckEmpty);
        }
        let card = self.deck.remove(0);
        self.field.insert(card);
        Ok(card)
    }

    /// Move a card from the player's hand onto the field.
    ///
    /// The zero-suit-mates outcome of playing a hand card.
    pub fn discard(&mut self, card: CardId, player: PlayerKey) -> Result<(), EngineError> {
        if self.hand[player].remove(&card).is_none() {
            return Err(EngineError::CardNotEligible {
                card,
                owner: player,
            });
        }
        self.field.insert(card);
        Ok(())
    }

    /// Field cards sharing the given card's suit, the card itself excluded.
    ///
    /// A suit holds four cards, so at most three can match.
    #[must_use]
    pub fn field_matches(&self, card: CardId) -> SmallVec<[CardId; 3]> {
        self.field
            .iter()
            .copied()
            .filter(|&c| c != card && c.suit() == card.suit())
            .collect()
    }

    /// Move a matched set of cards into the owner's collection.
    ///
    /// Normally a pair (the played or drawn card plus its field suit-mate);
    /// four cards when a card matches all three field suit-mates. Every card
    /// must currently sit on the field or in the owner's hand. On error
    /// nothing is mutated.
    pub fn collect_cards(&mut self, cards: &[CardId], owner: PlayerKey) -> Result<(), EngineError> {
        for (i, &card) in cards.iter().enumerate() {
            let eligible = !cards[..i].contains(&card)
                && (self.field.contains(&card) || self.hand[owner].contains(&card));
            if !eligible {
                return Err(EngineError::CardNotEligible { card, owner });
            }
        }

        for &card in cards {
            self.field.remove(&card);
            self.hand[owner].remove(&card);
            self.collection[owner].insert(card);
        }
        Ok(())
    }

    /// Recompute the deck-integrity invariant from scratch.
    ///
    /// True iff the union of all containers is exactly the 48-card catalog:
    /// every id a real catalog id, none duplicated, none missing. This is a
    /// continuous self-test: a false result means some caller bypassed the
    /// store's operations.
    #[must_use]
    pub fn integrity_check(&self) -> bool {
        let mut seen: FxHashSet<CardId> = FxHashSet::default();
        let mut total = 0usize;
        let mut in_catalog = true;

        for &card in &self.deck {
            in_catalog &= (card.raw() as usize) < DECK_SIZE;
            seen.insert(card);
            total += 1;
        }
        for card in self.field.iter() {
            in_catalog &= (card.raw() as usize) < DECK_SIZE;
            seen.insert(*card);
            total += 1;
        }
        for &player in &PlayerKey::BOTH {
            for card in self.hand[player].iter().chain(self.collection[player].iter()) {
                in_catalog &= (card.raw() as usize) < DECK_SIZE;
                seen.insert(*card);
                total += 1;
            }
        }

        let valid = in_catalog && total == DECK_SIZE && seen.len() == DECK_SIZE;
        if !valid {
            warn!(total, distinct = seen.len(), in_catalog, "deck integrity violated");
        }
        valid
    }

    /// Restore the full deck and empty every other container.
    pub fn reset(&mut self) {
        self.deck = catalog::full_deck();
        self.field.clear();
        for &player in &PlayerKey::BOTH {
            self.hand[player].clear();
            self.collection[player].clear();
        }
    }

    // === Snapshots ===

    /// Serialize all containers for hand-off to a persistence collaborator.
    pub fn export_state(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Replace this store's state with a previously exported snapshot.
    ///
    /// Rejects snapshots whose containers do not union to the full catalog,
    /// out-of-range ids included, leaving the current state untouched.
    pub fn import_state(&mut self, snapshot: &str) -> Result<(), EngineError> {
        let parsed: CardStore = serde_json::from_str(snapshot)?;
        if !parsed.integrity_check() {
            let mut seen: FxHashSet<CardId> = parsed.deck.iter().copied().collect();
            seen.extend(parsed.field.iter().copied());
            for &player in &PlayerKey::BOTH {
                seen.extend(parsed.hand[player].iter().copied());
                seen.extend(parsed.collection[player].iter().copied());
            }
            // Count only distinct catalog cards; bogus ids never count.
            let counted = seen
                .iter()
                .filter(|c| (c.raw() as usize) < DECK_SIZE)
                .count();
            return Err(EngineError::DeckMismatch { counted });
        }
        *self = parsed;
        Ok(())
    }
}

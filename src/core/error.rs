//! Engine error taxonomy.
//!
//! Two families matter here:
//!
//! - **Invariant violations** (no active player, mismatched card count):
//!   surfaced from the derived accessors as `Err`, never as a stale or
//!   default value. A caller that cleared a flag by hand hears about it.
//! - **Precondition violations** (drawing from an empty deck, dealing a
//!   non-fresh deck, collecting an ineligible card): the operation refuses
//!   to mutate anything and reports why.
//!
//! The timeout variant is a cooperative signal from the scoped timer helper,
//! not an engine failure.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::player::PlayerKey;

/// All errors surfaced by the engine's stores and helpers.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No player carries the active flag.
    #[error("no active player specified")]
    NoActivePlayer,

    /// Both players carry the active flag.
    #[error("multiple active players detected")]
    MultipleActivePlayers,

    /// No player carries the dealer flag.
    #[error("no dealer specified")]
    NoDealer,

    /// Both players carry the dealer flag.
    #[error("multiple dealers detected")]
    MultipleDealers,

    /// `deal_cards` called while cards are still out on the table.
    #[error("cannot deal: deck is not a fresh 48-card deck")]
    DeckNotFresh,

    /// `draw_card` called on an empty deck.
    #[error("cannot draw from an empty deck")]
    DeckEmpty,

    /// A card offered for collection is not on the field or in the
    /// collecting player's hand.
    #[error("card {card} is not eligible for collection by {owner}")]
    CardNotEligible { card: CardId, owner: PlayerKey },

    /// The union of all card containers no longer covers the 48-card
    /// catalog exactly.
    #[error("card containers hold {counted} distinct cards, expected 48")]
    DeckMismatch { counted: usize },

    /// A scoped timeout expired before it was cleared.
    #[error("timeout '{key}' expired in {function}")]
    Timeout { key: String, function: String },

    /// A state snapshot failed to serialize or parse.
    #[error("state snapshot failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

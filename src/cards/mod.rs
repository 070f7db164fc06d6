//! Static card data: the 48-card catalog and its query helpers.

pub mod catalog;

pub use catalog::{
    by_name, cards_of_kind, cards_of_suit, full_deck, Card, CardId, CardKind, Suit, CATALOG,
    DECK_SIZE,
};

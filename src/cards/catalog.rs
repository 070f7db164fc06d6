//! The 48-card hanafuda catalog.
//!
//! Twelve suits of four cards, each suit conventionally a month with a
//! flower name. The catalog is static data: cards are identified by
//! `CardId`, never duplicated or destroyed, only relocated between the
//! containers of the card store.

use serde::{Deserialize, Serialize};

/// Number of cards in the full deck.
pub const DECK_SIZE: usize = 48;

/// Identifier of one of the 48 catalog cards.
///
/// The raw value indexes [`CATALOG`] directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a card ID. Valid values are `0..48`.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Look up the static card definition.
    #[must_use]
    pub fn card(self) -> &'static Card {
        &CATALOG[self.0 as usize]
    }

    /// The card's display name, e.g. `matsu-ni-tsuru`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.card().name
    }

    /// The card's suit (month).
    #[must_use]
    pub fn suit(self) -> Suit {
        self.card().suit
    }

    /// The card's scoring kind.
    #[must_use]
    pub fn kind(self) -> CardKind {
        self.card().kind
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Card suit: one of the twelve flower months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Pine (January)
    Matsu,
    /// Plum blossom (February)
    Ume,
    /// Cherry blossom (March)
    Sakura,
    /// Wisteria (April)
    Fuji,
    /// Iris (May)
    Ayame,
    /// Peony (June)
    Botan,
    /// Bush clover (July)
    Hagi,
    /// Pampas grass (August)
    Susuki,
    /// Chrysanthemum (September)
    Kiku,
    /// Maple (October)
    Momiji,
    /// Willow (November)
    Yanagi,
    /// Paulownia (December)
    Kiri,
}

impl Suit {
    /// The month this suit represents, 1..=12.
    #[must_use]
    pub const fn month(self) -> u8 {
        self as u8 + 1
    }
}

/// Scoring category of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Bright,
    Animal,
    Ribbon,
    Plain,
}

/// Static card definition: name, suit, scoring kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub name: &'static str,
    pub suit: Suit,
    pub kind: CardKind,
}

const fn card(id: u8, name: &'static str, suit: Suit, kind: CardKind) -> Card {
    Card {
        id: CardId(id),
        name,
        suit,
        kind,
    }
}

/// The full 48-card catalog, four cards per month in month order.
pub static CATALOG: [Card; DECK_SIZE] = [
    card(0, "matsu-ni-tsuru", Suit::Matsu, CardKind::Bright),
    card(1, "matsu-no-tan", Suit::Matsu, CardKind::Ribbon),
    card(2, "matsu-no-kasu-1", Suit::Matsu, CardKind::Plain),
    card(3, "matsu-no-kasu-2", Suit::Matsu, CardKind::Plain),
    card(4, "ume-ni-uguisu", Suit::Ume, CardKind::Animal),
    card(5, "ume-no-tan", Suit::Ume, CardKind::Ribbon),
    card(6, "ume-no-kasu-1", Suit::Ume, CardKind::Plain),
    card(7, "ume-no-kasu-2", Suit::Ume, CardKind::Plain),
    card(8, "sakura-ni-maku", Suit::Sakura, CardKind::Bright),
    card(9, "sakura-no-tan", Suit::Sakura, CardKind::Ribbon),
    card(10, "sakura-no-kasu-1", Suit::Sakura, CardKind::Plain),
    card(11, "sakura-no-kasu-2", Suit::Sakura, CardKind::Plain),
    card(12, "fuji-ni-kakku", Suit::Fuji, CardKind::Animal),
    card(13, "fuji-no-tan", Suit::Fuji, CardKind::Ribbon),
    card(14, "fuji-no-kasu-1", Suit::Fuji, CardKind::Plain),
    card(15, "fuji-no-kasu-2", Suit::Fuji, CardKind::Plain),
    card(16, "ayame-ni-yatsuhashi", Suit::Ayame, CardKind::Animal),
    card(17, "ayame-no-tan", Suit::Ayame, CardKind::Ribbon),
    card(18, "ayame-no-kasu-1", Suit::Ayame, CardKind::Plain),
    card(19, "ayame-no-kasu-2", Suit::Ayame, CardKind::Plain),
    card(20, "botan-ni-chou", Suit::Botan, CardKind::Animal),
    card(21, "botan-no-tan", Suit::Botan, CardKind::Ribbon),
    card(22, "botan-no-kasu-1", Suit::Botan, CardKind::Plain),
    card(23, "botan-no-kasu-2", Suit::Botan, CardKind::Plain),
    card(24, "hagi-ni-inoshishi", Suit::Hagi, CardKind::Animal),
    card(25, "hagi-no-tan", Suit::Hagi, CardKind::Ribbon),
    card(26, "hagi-no-kasu-1", Suit::Hagi, CardKind::Plain),
    card(27, "hagi-no-kasu-2", Suit::Hagi, CardKind::Plain),
    card(28, "susuki-ni-tsuki", Suit::Susuki, CardKind::Bright),
    card(29, "susuki-ni-kari", Suit::Susuki, CardKind::Animal),
    card(30, "susuki-no-kasu-1", Suit::Susuki, CardKind::Plain),
    card(31, "susuki-no-kasu-2", Suit::Susuki, CardKind::Plain),
    card(32, "kiku-ni-sakazuki", Suit::Kiku, CardKind::Animal),
    card(33, "kiku-no-tan", Suit::Kiku, CardKind::Ribbon),
    card(34, "kiku-no-kasu-1", Suit::Kiku, CardKind::Plain),
    card(35, "kiku-no-kasu-2", Suit::Kiku, CardKind::Plain),
    card(36, "momiji-ni-shika", Suit::Momiji, CardKind::Animal),
    card(37, "momiji-no-tan", Suit::Momiji, CardKind::Ribbon),
    card(38, "momiji-no-kasu-1", Suit::Momiji, CardKind::Plain),
    card(39, "momiji-no-kasu-2", Suit::Momiji, CardKind::Plain),
    card(40, "yanagi-ni-ono-no-toufuu", Suit::Yanagi, CardKind::Bright),
    card(41, "yanagi-ni-tsubame", Suit::Yanagi, CardKind::Animal),
    card(42, "yanagi-no-tan", Suit::Yanagi, CardKind::Ribbon),
    card(43, "yanagi-no-kasu", Suit::Yanagi, CardKind::Plain),
    card(44, "kiri-ni-ho-oh", Suit::Kiri, CardKind::Bright),
    card(45, "kiri-no-kasu-1", Suit::Kiri, CardKind::Plain),
    card(46, "kiri-no-kasu-2", Suit::Kiri, CardKind::Plain),
    card(47, "kiri-no-kasu-3", Suit::Kiri, CardKind::Plain),
];

// Cards the scoring combinations refer to by name.
pub const MATSU_NI_TSURU: CardId = CardId(0);
pub const SAKURA_NI_MAKU: CardId = CardId(8);
pub const SUSUKI_NI_TSUKI: CardId = CardId(28);
/// The Rain Man bright, excluded from the dry bright combinations.
pub const YANAGI_NI_ONO_NO_TOUFUU: CardId = CardId(40);
pub const KIRI_NI_HO_OH: CardId = CardId(44);
pub const KIKU_NI_SAKAZUKI: CardId = CardId(32);
pub const HAGI_NI_INOSHISHI: CardId = CardId(24);
pub const MOMIJI_NI_SHIKA: CardId = CardId(36);
pub const BOTAN_NI_CHOU: CardId = CardId(20);
pub const MATSU_NO_TAN: CardId = CardId(1);
pub const UME_NO_TAN: CardId = CardId(5);
pub const SAKURA_NO_TAN: CardId = CardId(9);
pub const BOTAN_NO_TAN: CardId = CardId(21);
pub const KIKU_NO_TAN: CardId = CardId(33);
pub const MOMIJI_NO_TAN: CardId = CardId(37);

/// All 48 card IDs in catalog order.
#[must_use]
pub fn full_deck() -> Vec<CardId> {
    (0..DECK_SIZE as u8).map(CardId).collect()
}

/// Look up a card by its display name.
#[must_use]
pub fn by_name(name: &str) -> Option<CardId> {
    CATALOG.iter().find(|c| c.name == name).map(|c| c.id)
}

/// Filter cards down to those of one scoring kind.
pub fn cards_of_kind(cards: impl IntoIterator<Item = CardId>, kind: CardKind) -> Vec<CardId> {
    cards.into_iter().filter(|c| c.kind() == kind).collect()
}

/// Filter cards down to those of one suit.
pub fn cards_of_suit(cards: impl IntoIterator<Item = CardId>, suit: Suit) -> Vec<CardId> {
    cards.into_iter().filter(|c| c.suit() == suit).collect()
}

//! Yaku: the scoring combinations evaluated over a capture collection.
//!
//! Point values and card lists follow the standard koi-koi tables. The
//! bright combinations are mutually exclusive around the Rain Man
//! (`yanagi-ni-ono-no-toufuu`): shikou and sankou require him absent,
//! ame-shikou requires him present. The counting yaku (tan-zaku, tane-zaku,
//! kasu) earn one extra point per card beyond the threshold.
//!
//! Teshi and kuttsuki are hand yaku: they are checked against a freshly
//! dealt 8-card hand, not a collection, and end the round immediately when
//! the dealing UI honors them.

use serde::{Deserialize, Serialize};

use crate::cards::catalog::{
    BOTAN_NI_CHOU, BOTAN_NO_TAN, HAGI_NI_INOSHISHI, KIKU_NI_SAKAZUKI, KIKU_NO_TAN,
    KIRI_NI_HO_OH, MATSU_NI_TSURU, MATSU_NO_TAN, MOMIJI_NI_SHIKA, MOMIJI_NO_TAN,
    SAKURA_NI_MAKU, SAKURA_NO_TAN, SUSUKI_NI_TSUKI, UME_NO_TAN, YANAGI_NI_ONO_NO_TOUFUU,
};
use crate::cards::{CardId, CardKind};
use crate::store::cards::CardSet;

/// The five brights.
const BRIGHTS: [CardId; 5] = [
    MATSU_NI_TSURU,
    SAKURA_NI_MAKU,
    SUSUKI_NI_TSUKI,
    YANAGI_NI_ONO_NO_TOUFUU,
    KIRI_NI_HO_OH,
];

/// The four brights other than the Rain Man.
const DRY_BRIGHTS: [CardId; 4] = [
    MATSU_NI_TSURU,
    SAKURA_NI_MAKU,
    SUSUKI_NI_TSUKI,
    KIRI_NI_HO_OH,
];

const INO_SHIKA_CHOU: [CardId; 3] = [HAGI_NI_INOSHISHI, MOMIJI_NI_SHIKA, BOTAN_NI_CHOU];
const AKA_TAN: [CardId; 3] = [MATSU_NO_TAN, UME_NO_TAN, SAKURA_NO_TAN];
const AO_TAN: [CardId; 3] = [BOTAN_NO_TAN, KIKU_NO_TAN, MOMIJI_NO_TAN];

/// A scoring combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YakuKind {
    /// Five Brights
    Gokou,
    /// Four Brights (no Rain Man)
    Shikou,
    /// Rainy Four Brights (any 3 + Rain Man)
    AmeShikou,
    /// Three Brights (no Rain Man)
    Sankou,
    /// Boar, Deer & Butterfly
    InoShikaChou,
    /// Flower Viewing
    HanamiZake,
    /// Moon Viewing
    TsukimiZake,
    /// Red Poetry Ribbons
    AkaTan,
    /// Blue Ribbons
    AoTan,
    /// Any 5 ribbons, +1/extra
    TanZaku,
    /// Any 5 animals, +1/extra
    TaneZaku,
    /// Any 10 plains, +1/extra
    Kasu,
    /// Four pairs dealt in hand
    Kuttsuki,
    /// Four of a suit dealt in hand
    Teshi,
}

impl YakuKind {
    /// Base point value.
    #[must_use]
    pub const fn points(self) -> i32 {
        match self {
            YakuKind::Gokou => 15,
            YakuKind::Shikou => 8,
            YakuKind::AmeShikou => 7,
            YakuKind::Sankou => 6,
            YakuKind::InoShikaChou
            | YakuKind::HanamiZake
            | YakuKind::TsukimiZake
            | YakuKind::AkaTan
            | YakuKind::AoTan => 5,
            YakuKind::TanZaku | YakuKind::TaneZaku | YakuKind::Kasu => 1,
            YakuKind::Kuttsuki | YakuKind::Teshi => 6,
        }
    }
}

impl std::fmt::Display for YakuKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            YakuKind::Gokou => "gokou",
            YakuKind::Shikou => "shikou",
            YakuKind::AmeShikou => "ame-shikou",
            YakuKind::Sankou => "sankou",
            YakuKind::InoShikaChou => "ino-shika-chou",
            YakuKind::HanamiZake => "hanami-zake",
            YakuKind::TsukimiZake => "tsukimi-zake",
            YakuKind::AkaTan => "aka-tan",
            YakuKind::AoTan => "ao-tan",
            YakuKind::TanZaku => "tan-zaku",
            YakuKind::TaneZaku => "tane-zaku",
            YakuKind::Kasu => "kasu",
            YakuKind::Kuttsuki => "kuttsuki",
            YakuKind::Teshi => "teshi",
        };
        write!(f, "{label}")
    }
}

/// A completed yaku with the collected cards that formed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedYaku {
    pub kind: YakuKind,
    pub cards: Vec<CardId>,
    pub points: i32,
}

fn intersection(collection: &CardSet, cards: &[CardId]) -> Vec<CardId> {
    cards
        .iter()
        .copied()
        .filter(|c| collection.contains(c))
        .collect()
}

fn of_kind(collection: &CardSet, kind: CardKind) -> Vec<CardId> {
    collection
        .iter()
        .copied()
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Evaluate every collection yaku and sum their points.
///
/// Returns the completed combinations and the total score.
#[must_use]
pub fn check_collection(collection: &CardSet) -> (Vec<CompletedYaku>, i32) {
    let mut completed = Vec::new();

    let brights = intersection(collection, &BRIGHTS);
    let dry = intersection(collection, &DRY_BRIGHTS);
    let has_rain = collection.contains(&YANAGI_NI_ONO_NO_TOUFUU);

    if brights.len() == 5 {
        completed.push(CompletedYaku {
            kind: YakuKind::Gokou,
            cards: brights.clone(),
            points: YakuKind::Gokou.points(),
        });
    }
    if !has_rain && dry.len() == 4 {
        completed.push(CompletedYaku {
            kind: YakuKind::Shikou,
            cards: dry.clone(),
            points: YakuKind::Shikou.points(),
        });
    }
    if has_rain && brights.len() == 4 {
        completed.push(CompletedYaku {
            kind: YakuKind::AmeShikou,
            cards: brights.clone(),
            points: YakuKind::AmeShikou.points(),
        });
    }
    if !has_rain && dry.len() == 3 {
        completed.push(CompletedYaku {
            kind: YakuKind::Sankou,
            cards: dry,
            points: YakuKind::Sankou.points(),
        });
    }

    for (kind, cards) in [
        (YakuKind::InoShikaChou, &INO_SHIKA_CHOU[..]),
        (YakuKind::AkaTan, &AKA_TAN[..]),
        (YakuKind::AoTan, &AO_TAN[..]),
        (
            YakuKind::HanamiZake,
            &[SAKURA_NI_MAKU, KIKU_NI_SAKAZUKI][..],
        ),
        (
            YakuKind::TsukimiZake,
            &[SUSUKI_NI_TSUKI, KIKU_NI_SAKAZUKI][..],
        ),
    ] {
        let found = intersection(collection, cards);
        if found.len() == cards.len() {
            completed.push(CompletedYaku {
                kind,
                cards: found,
                points: kind.points(),
            });
        }
    }

    for (kind, card_kind, required) in [
        (YakuKind::TanZaku, CardKind::Ribbon, 5),
        (YakuKind::TaneZaku, CardKind::Animal, 5),
        (YakuKind::Kasu, CardKind::Plain, 10),
    ] {
        let found = of_kind(collection, card_kind);
        if found.len() >= required {
            let extra = (found.len() - required) as i32;
            completed.push(CompletedYaku {
                kind,
                points: kind.points() + extra,
                cards: found,
            });
        }
    }

    let total = completed.iter().map(|y| y.points).sum();
    (completed, total)
}

/// Check a freshly dealt 8-card hand for teshi or kuttsuki.
///
/// Teshi is four cards of one suit; kuttsuki is four suit pairs. Returns
/// `None` for hands of any other size.
#[must_use]
pub fn check_hand(hand: &CardSet) -> Option<CompletedYaku> {
    if hand.len() != 8 {
        return None;
    }

    let mut per_suit = [0u8; 12];
    for card in hand.iter() {
        per_suit[card.suit().month() as usize - 1] += 1;
    }

    if let Some(month) = per_suit.iter().position(|&n| n == 4) {
        let cards = hand
            .iter()
            .copied()
            .filter(|c| c.suit().month() as usize == month + 1)
            .collect();
        return Some(CompletedYaku {
            kind: YakuKind::Teshi,
            cards,
            points: YakuKind::Teshi.points(),
        });
    }

    if per_suit.iter().all(|&n| n == 0 || n == 2) {
        return Some(CompletedYaku {
            kind: YakuKind::Kuttsuki,
            cards: hand.iter().copied().collect(),
            points: YakuKind::Kuttsuki.points(),
        });
    }

    None
}

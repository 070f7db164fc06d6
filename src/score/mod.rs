//! Scoring: yaku evaluation over capture collections and dealt hands.

pub mod yaku;

pub use yaku::{check_collection, check_hand, CompletedYaku, YakuKind};

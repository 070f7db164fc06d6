//! Turn phases.
//!
//! A turn for one player walks the fixed cycle select → draw → collect and
//! wraps back to select for the next. The cycle has no terminal state; round
//! boundaries are decided by the driver, not the phase machine.

use serde::{Deserialize, Serialize};

/// One phase of a player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The active player plays a card from their hand.
    Select,
    /// A card is drawn from the deck and resolved against the field.
    Draw,
    /// Matched cards are collected and scoring combinations evaluated.
    Collect,
}

impl Phase {
    /// The phase a fresh round starts in.
    pub const CYCLE_START: Phase = Phase::Select;

    /// The next phase in the cycle.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Select => Phase::Draw,
            Phase::Draw => Phase::Collect,
            Phase::Collect => Phase::Select,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Select => write!(f, "select"),
            Phase::Draw => write!(f, "draw"),
            Phase::Collect => write!(f, "collect"),
        }
    }
}

//! Core engine types: players, phases, RNG, errors.
//!
//! These are the building blocks the stores and the autoplay driver are
//! assembled from; none of them own mutable game state themselves.

pub mod error;
pub mod phase;
pub mod player;
pub mod rng;

pub use error::EngineError;
pub use phase::Phase;
pub use player::{PlayerKey, PlayerPair};
pub use rng::{GameRng, GameRngState};

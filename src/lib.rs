//! # hanafuda-engine
//!
//! A turn-based Hanafuda (Koi-Koi) game-state engine: deck/field/hand/
//! collection management, the turn-phase state machine, scoring and round
//! bookkeeping, and the autoplay driver that exercises the engine end to
//! end. Rendering, persistence, networking, and identity are external
//! collaborators; the engine is local, synchronous per turn, and
//! single-process.
//!
//! ## Design Principles
//!
//! 1. **Explicit stores**: one `CardStore`, `PlayerStore`, and `GameData`
//!    per session, passed by reference; no ambient singletons.
//!
//! 2. **Integrity first**: the 48-card catalog is conserved across every
//!    operation, and `integrity_check` recomputes that invariant from
//!    scratch whenever asked.
//!
//! 3. **Fail loudly**: a violated invariant (no active player, mismatched
//!    deck) surfaces as an `EngineError`, never as a stale default.
//!
//! 4. **Deterministic**: every random choice routes through a seeded
//!    `GameRng`, so a seeded session replays identically.
//!
//! ## Modules
//!
//! - `core`: player seats, phases, RNG, errors
//! - `cards`: the static 48-card catalog
//! - `store`: the mutable card/player/game-data stores
//! - `score`: yaku evaluation
//! - `autoplay`: the scripted turn driver
//! - `timeout`: scoped timeouts for UI-facing delayed callbacks

pub mod autoplay;
pub mod cards;
pub mod core;
pub mod score;
pub mod store;
pub mod timeout;

// Re-export commonly used types
pub use crate::core::{EngineError, GameRng, GameRngState, Phase, PlayerKey, PlayerPair};

pub use crate::cards::{Card, CardId, CardKind, Suit, CATALOG, DECK_SIZE};

pub use crate::store::{
    CardSet, CardStore, Current, EventLog, GameData, Player, PlayerAction, PlayerStore,
    ResultDraft, RoundResult, Scoreboard, DEAL_COUNT,
};

pub use crate::score::{check_collection, check_hand, CompletedYaku, YakuKind};

pub use crate::autoplay::{Autoplay, AutoplayOptions, AutoplayReport};

pub use crate::timeout::{TimeoutHandle, TimeoutOptions, Timeouts};

//! The three mutable state stores: cards, players, game data.
//!
//! One instance of each is constructed per game session and passed by
//! reference to the autoplay driver and the UI layer; there are no ambient
//! singletons. Each store owns its slice of state exclusively and exposes
//! the documented operations plus derived read-only views.

pub mod cards;
pub mod game;
pub mod players;

pub use cards::{CardSet, CardStore, DEAL_COUNT};
pub use game::{Current, EventLog, GameData, PlayerAction, ResultDraft, RoundResult, Scoreboard};
pub use players::{Player, PlayerStore};

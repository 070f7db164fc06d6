//! Player identification and per-player data storage.
//!
//! ## PlayerKey
//!
//! The engine is a strictly two-seat game: every piece of per-player state
//! belongs to `P1` or `P2`. Identity concerns (names, accounts) live outside
//! the engine; it only ever sees these two roles.
//!
//! ## PlayerPair
//!
//! Per-player data storage backed by a fixed two-element array for O(1)
//! access. Supports iteration and indexing by `PlayerKey`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two fixed player seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKey {
    P1,
    P2,
}

impl PlayerKey {
    /// Both seats, in order.
    pub const BOTH: [PlayerKey; 2] = [PlayerKey::P1, PlayerKey::P2];

    /// Get the other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerKey::P1 => PlayerKey::P2,
            PlayerKey::P2 => PlayerKey::P1,
        }
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerKey::P1 => 0,
            PlayerKey::P2 => 1,
        }
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerKey::P1 => write!(f, "p1"),
            PlayerKey::P2 => write!(f, "p2"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `[T; 2]` with one entry per seat.
///
/// ## Example
///
/// ```
/// use hanafuda_engine::core::{PlayerKey, PlayerPair};
///
/// let mut scores: PlayerPair<i32> = PlayerPair::with_value(0);
///
/// scores[PlayerKey::P1] += 10;
/// assert_eq!(scores[PlayerKey::P1], 10);
/// assert_eq!(scores[PlayerKey::P2], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a new pair with values from a factory function.
    ///
    /// The factory receives the `PlayerKey` for each seat.
    pub fn new(factory: impl Fn(PlayerKey) -> T) -> Self {
        Self {
            data: [factory(PlayerKey::P1), factory(PlayerKey::P2)],
        }
    }

    /// Create a new pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new pair with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerKey) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerKey) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerKey, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerKey, &T)> {
        PlayerKey::BOTH.iter().map(move |&k| (k, self.get(k)))
    }

    /// Iterate over (PlayerKey, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerKey, &mut T)> {
        let [p1, p2] = &mut self.data;
        [(PlayerKey::P1, p1), (PlayerKey::P2, p2)].into_iter()
    }
}

impl<T> Index<PlayerKey> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerKey) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerKey> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerKey) -> &mut Self::Output {
        self.get_mut(player)
    }
}

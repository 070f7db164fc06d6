//! Player store: seat flags, scores, and the koi-koi bonus multiplier.
//!
//! Exactly one player is active and exactly one is the dealer at all times
//! after initialization. The derived accessors re-check that invariant on
//! every read and fail loudly when it is violated rather than handing back
//! a stale player: masking it would let the UI render an inconsistent game.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::EngineError;
use crate::core::player::{PlayerKey, PlayerPair};

/// One player's seat state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Which seat this is.
    pub key: PlayerKey,
    /// Display name.
    pub name: String,
    /// Whether this player is currently taking their turn.
    pub is_active: bool,
    /// Whether this player deals and goes first this round.
    pub is_dealer: bool,
    /// Accumulated score.
    pub score: i32,
}

impl Player {
    fn initial(key: PlayerKey) -> Self {
        Self {
            key,
            name: match key {
                PlayerKey::P1 => "Player 1".to_owned(),
                PlayerKey::P2 => "Player 2".to_owned(),
            },
            // P1 opens the first round.
            is_active: key == PlayerKey::P1,
            is_dealer: key == PlayerKey::P1,
            score: 0,
        }
    }
}

/// Both players plus the round-scoped bonus multiplier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStore {
    players: PlayerPair<Player>,
    bonus_multiplier: u32,
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStore {
    /// Create a store with P1 active and dealing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: PlayerPair::new(Player::initial),
            bonus_multiplier: 1,
        }
    }

    /// Get a player's seat state.
    #[must_use]
    pub fn player(&self, key: PlayerKey) -> &Player {
        &self.players[key]
    }

    /// Mutable access to a seat.
    ///
    /// This is the escape hatch the UI layer uses for things like name
    /// edits. Clearing the active or dealer flags by hand is a programming
    /// error the derived accessors will report on the next read.
    pub fn player_mut(&mut self, key: PlayerKey) -> &mut Player {
        &mut self.players[key]
    }

    /// The player currently flagged active.
    ///
    /// Errors when zero or both players carry the flag.
    pub fn active_player(&self) -> Result<&Player, EngineError> {
        let p1 = &self.players[PlayerKey::P1];
        let p2 = &self.players[PlayerKey::P2];
        match (p1.is_active, p2.is_active) {
            (true, false) => Ok(p1),
            (false, true) => Ok(p2),
            (false, false) => Err(EngineError::NoActivePlayer),
            (true, true) => Err(EngineError::MultipleActivePlayers),
        }
    }

    /// The player currently waiting for their turn.
    pub fn inactive_player(&self) -> Result<&Player, EngineError> {
        self.active_player()
            .map(|p| &self.players[p.key.opponent()])
    }

    /// The player currently flagged as dealer.
    ///
    /// Errors when zero or both players carry the flag.
    pub fn dealer(&self) -> Result<&Player, EngineError> {
        let p1 = &self.players[PlayerKey::P1];
        let p2 = &self.players[PlayerKey::P2];
        match (p1.is_dealer, p2.is_dealer) {
            (true, false) => Ok(p1),
            (false, true) => Ok(p2),
            (false, false) => Err(EngineError::NoDealer),
            (true, true) => Err(EngineError::MultipleDealers),
        }
    }

    /// The current bonus multiplier.
    #[must_use]
    pub fn bonus_multiplier(&self) -> u32 {
        self.bonus_multiplier
    }

    /// Flip both players' active flags atomically.
    pub fn toggle_active_player(&mut self) {
        for (_, p) in self.players.iter_mut() {
            p.is_active = !p.is_active;
        }
        debug!(
            active = %if self.players[PlayerKey::P1].is_active { PlayerKey::P1 } else { PlayerKey::P2 },
            "switched players"
        );
    }

    /// Flip both players' dealer flags atomically.
    pub fn toggle_dealer(&mut self) {
        for (_, p) in self.players.iter_mut() {
            p.is_dealer = !p.is_dealer;
        }
    }

    /// Add a (possibly negative) delta to a player's score.
    ///
    /// Scores are not clamped; the scoring rules keep them in range during
    /// normal play.
    pub fn update_score(&mut self, player: PlayerKey, delta: i32) {
        self.players[player].score += delta;
    }

    /// A player's current score.
    #[must_use]
    pub fn score(&self, player: PlayerKey) -> i32 {
        self.players[player].score
    }

    /// Double the bonus multiplier.
    ///
    /// Chained koi-koi calls escalate multiplicatively, not additively.
    pub fn increment_bonus(&mut self) {
        self.bonus_multiplier *= 2;
    }

    /// Get a player's display name.
    #[must_use]
    pub fn name(&self, player: PlayerKey) -> &str {
        &self.players[player].name
    }

    /// Set a player's display name.
    pub fn set_name(&mut self, player: PlayerKey, name: impl Into<String>) {
        self.players[player].name = name.into();
    }

    /// Reset scores and the multiplier, and reassign the flags.
    ///
    /// With `new_dealer` the named player both deals and opens the next
    /// round (the round winner deals next); without it, the initial
    /// assignment (P1) is restored.
    pub fn reset(&mut self, new_dealer: Option<PlayerKey>) {
        self.bonus_multiplier = 1;
        let dealer = new_dealer.unwrap_or(PlayerKey::P1);
        for (key, p) in self.players.iter_mut() {
            p.score = 0;
            p.is_active = key == dealer;
            p.is_dealer = key == dealer;
        }
        debug!(dealer = %dealer, "set new dealer");
    }

    // === Snapshots ===

    /// Serialize the player state for a persistence collaborator.
    pub fn export_state(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Replace this store's state with an exported snapshot.
    pub fn import_state(&mut self, snapshot: &str) -> Result<(), EngineError> {
        *self = serde_json::from_str(snapshot)?;
        Ok(())
    }
}

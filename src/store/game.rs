//! Game data store: the turn-phase state machine and round bookkeeping.
//!
//! Owns the canonical phase, the round and turn counters, the append-only
//! round-result ledger, and the event log. It never reaches into the other
//! stores on its own: the driver resolves the active player explicitly
//! through the player store when it needs one.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::cards::CardId;
use crate::core::error::EngineError;
use crate::core::phase::Phase;
use crate::core::player::PlayerKey;
use crate::score::{CompletedYaku, YakuKind};
use crate::store::players::PlayerStore;

/// Result of one completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number the result was recorded under.
    pub round: u32,
    /// Winning player, or `None` for a drawn round.
    pub winner: Option<PlayerKey>,
    /// Points scored, bonus multiplier applied.
    pub score: i32,
    /// Completed scoring combinations.
    pub completed_yaku: Vec<CompletedYaku>,
}

/// The caller-supplied part of a round result; the store adds the round tag.
#[derive(Clone, Debug)]
pub struct ResultDraft {
    pub winner: Option<PlayerKey>,
    pub score: i32,
    pub completed_yaku: Vec<CompletedYaku>,
}

/// Actions recorded in the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerAction {
    Discard,
    Match,
    Draw,
    Stop,
    KoiKoi,
    Complete,
}

/// One entry of the append-only event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventLog {
    /// A player acted.
    Player {
        player: PlayerKey,
        action: PlayerAction,
        cards: Vec<CardId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        yaku: Option<YakuKind>,
        timestamp: u64,
    },
    /// A system transition.
    System { message: String, timestamp: u64 },
}

/// Snapshot of where the game stands right now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Current {
    pub round: u32,
    pub turn: u32,
    pub phase: Phase,
    pub player: PlayerKey,
}

/// Net scoreboard over the round history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub p1: i32,
    pub p2: i32,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Phase machine, counters, and the round-result ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameData {
    phase: Phase,
    round_counter: u32,
    turn_counter: u32,
    round_history: Vec<RoundResult>,
    event_history: Vec<EventLog>,
}

impl Default for GameData {
    fn default() -> Self {
        Self::new()
    }
}

impl GameData {
    /// Create a store at round 1, turn 1, cycle start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::CYCLE_START,
            round_counter: 1,
            turn_counter: 1,
            round_history: Vec::new(),
            event_history: Vec::new(),
        }
    }

    // === Accessors ===

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round number (1-based).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round_counter
    }

    /// Current turn number within the round (1-based).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn_counter
    }

    /// The round-result ledger, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoundResult] {
        &self.round_history
    }

    /// The most recently saved result.
    #[must_use]
    pub fn previous_result(&self) -> Option<&RoundResult> {
        self.round_history.last()
    }

    /// The event log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EventLog] {
        &self.event_history
    }

    /// Whether the machine currently sits in the given phase.
    #[must_use]
    pub fn check_phase(&self, phase: Phase) -> bool {
        self.phase == phase
    }

    /// The current round/turn/phase with the active player resolved.
    ///
    /// Surfaces the player store's invariant error if the active flag is
    /// inconsistent, for the display-hiding logic to handle.
    pub fn current(&self, players: &PlayerStore) -> Result<Current, EngineError> {
        Ok(Current {
            round: self.round_counter,
            turn: self.turn_counter,
            phase: self.phase,
            player: players.active_player()?.key,
        })
    }

    // === Operations ===

    /// Advance one phase in the fixed cycle and return the new phase.
    ///
    /// Wrapping back to the cycle start counts a completed
    /// select/draw/collect sequence and increments the turn counter.
    pub fn next_phase(&mut self) -> Phase {
        self.phase = self.phase.next();
        debug!(phase = %self.phase, "switched phase");
        if self.phase == Phase::CYCLE_START {
            self.turn_counter += 1;
            debug!(turn = self.turn_counter, "turn");
        }
        self.phase
    }

    /// Append a result to the ledger, tagged with the current round number.
    ///
    /// Append-only: a second call in the same round yields a second entry
    /// with the same tag. Avoiding duplicates is the driver's job.
    pub fn save_result(&mut self, draft: ResultDraft) -> &RoundResult {
        let result = RoundResult {
            round: self.round_counter,
            winner: draft.winner,
            score: draft.score,
            completed_yaku: draft.completed_yaku,
        };
        info!(
            round = result.round,
            winner = ?result.winner,
            score = result.score,
            "round result saved"
        );
        self.round_history.push(result);
        self.round_history
            .last()
            .expect("history cannot be empty after push")
    }

    /// Advance to the next round: counter up, turn and phase to start.
    ///
    /// The ledger is untouched; only `reset` clears it.
    pub fn next_round(&mut self) {
        self.round_counter += 1;
        self.turn_counter = 1;
        self.phase = Phase::CYCLE_START;
        info!(round = self.round_counter, "start round");
    }

    /// Clear everything back to initial values.
    ///
    /// Returns the serialized round history so the caller can archive it
    /// with a persistence collaborator before it is gone.
    pub fn reset(&mut self) -> Result<String, EngineError> {
        let archived = serde_json::to_string(&self.round_history)?;
        self.round_counter = 1;
        self.turn_counter = 1;
        self.phase = Phase::CYCLE_START;
        self.round_history.clear();
        self.event_history.clear();
        Ok(archived)
    }

    // === Event log ===

    /// Record a player action.
    pub fn log_player_action(
        &mut self,
        player: PlayerKey,
        action: PlayerAction,
        cards: Vec<CardId>,
        yaku: Option<YakuKind>,
    ) {
        self.event_history.push(EventLog::Player {
            player,
            action,
            cards,
            yaku,
            timestamp: unix_now(),
        });
    }

    /// Record a system message.
    pub fn log_system_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(message = %message, "system event");
        self.event_history.push(EventLog::System {
            message,
            timestamp: unix_now(),
        });
    }

    // === Derived scoring ===

    /// Net scores over the ledger.
    ///
    /// Both players start from `10 * max_rounds`; each round's score moves
    /// points from loser to winner, clamped to `0..=2 * base`.
    #[must_use]
    pub fn scoreboard(&self, max_rounds: u32) -> Scoreboard {
        let base = 10 * max_rounds as i32;
        let tally = |player: PlayerKey| -> i32 {
            self.round_history
                .iter()
                .filter(|r| r.winner == Some(player))
                .map(|r| r.score)
                .sum()
        };
        let clamp = |score: i32| score.clamp(0, base * 2);

        let p1 = tally(PlayerKey::P1);
        let p2 = tally(PlayerKey::P2);
        Scoreboard {
            p1: clamp(base + p1 - p2),
            p2: clamp(base + p2 - p1),
        }
    }

    /// Whether either player has been played down to zero.
    #[must_use]
    pub fn points_exhausted(&self, max_rounds: u32) -> bool {
        let board = self.scoreboard(max_rounds);
        board.p1 == 0 || board.p2 == 0
    }

    // === Snapshots ===

    /// Serialize the full store for a persistence collaborator.
    pub fn export_state(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Replace this store's state with an exported snapshot.
    pub fn import_state(&mut self, snapshot: &str) -> Result<(), EngineError> {
        *self = serde_json::from_str(snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(winner: Option<PlayerKey>, score: i32) -> ResultDraft {
        ResultDraft {
            winner,
            score,
            completed_yaku: Vec::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let data = GameData::new();
        assert_eq!(data.phase(), Phase::Select);
        assert_eq!(data.round(), 1);
        assert_eq!(data.turn(), 1);
        assert!(data.history().is_empty());
    }

    #[test]
    fn test_phase_cycle() {
        let mut data = GameData::new();
        let seen: Vec<Phase> = (0..4).map(|_| data.next_phase()).collect();
        assert_eq!(
            seen,
            vec![Phase::Draw, Phase::Collect, Phase::Select, Phase::Draw]
        );
    }

    #[test]
    fn test_turn_increments_on_wrap() {
        let mut data = GameData::new();
        assert_eq!(data.turn(), 1);

        // Two full cycles, one increment each.
        for _ in 0..6 {
            data.next_phase();
        }
        assert_eq!(data.turn(), 3);
    }

    #[test]
    fn test_check_phase() {
        let mut data = GameData::new();
        assert!(data.check_phase(Phase::Select));
        data.next_phase();
        assert!(data.check_phase(Phase::Draw));
        assert!(!data.check_phase(Phase::Select));
    }

    #[test]
    fn test_current_resolves_active_player() {
        let mut data = GameData::new();
        let mut players = PlayerStore::new();

        let current = data.current(&players).unwrap();
        assert_eq!(current.round, 1);
        assert_eq!(current.phase, Phase::Select);
        assert_eq!(current.player, PlayerKey::P1);

        players.toggle_active_player();
        data.next_phase();
        let current = data.current(&players).unwrap();
        assert_eq!(current.player, PlayerKey::P2);
        assert_eq!(current.phase, Phase::Draw);
    }

    #[test]
    fn test_current_surfaces_invariant_error() {
        let data = GameData::new();
        let mut players = PlayerStore::new();
        players.player_mut(PlayerKey::P1).is_active = false;

        assert!(matches!(
            data.current(&players).unwrap_err(),
            EngineError::NoActivePlayer
        ));
    }

    #[test]
    fn test_save_result_tags_current_round() {
        let mut data = GameData::new();

        let saved = data.save_result(draft(Some(PlayerKey::P1), 7));
        assert_eq!(saved.round, 1);

        // Append-only: same round tag twice is two entries.
        data.save_result(draft(None, 0));
        assert_eq!(data.history().len(), 2);
        assert_eq!(data.history()[0].round, 1);
        assert_eq!(data.history()[1].round, 1);
    }

    #[test]
    fn test_next_round() {
        let mut data = GameData::new();
        for _ in 0..4 {
            data.next_phase();
        }
        data.save_result(draft(Some(PlayerKey::P2), 5));

        data.next_round();
        assert_eq!(data.round(), 2);
        assert_eq!(data.turn(), 1);
        assert_eq!(data.phase(), Phase::Select);
        // History survives the round boundary.
        assert_eq!(data.history().len(), 1);

        let saved = data.save_result(draft(None, 0));
        assert_eq!(saved.round, 2);
    }

    #[test]
    fn test_reset_archives_history() {
        let mut data = GameData::new();
        data.save_result(draft(Some(PlayerKey::P1), 7));
        data.next_round();
        data.save_result(draft(Some(PlayerKey::P2), 12));
        data.log_system_message("END");

        let archived = data.reset().unwrap();
        let parsed: Vec<RoundResult> = serde_json::from_str(&archived).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].winner, Some(PlayerKey::P2));

        assert!(data.history().is_empty());
        assert!(data.events().is_empty());
        assert_eq!(data.round(), 1);
        assert_eq!(data.turn(), 1);
        assert_eq!(data.phase(), Phase::Select);
    }

    #[test]
    fn test_event_log_order() {
        let mut data = GameData::new();
        data.log_system_message("START ROUND 1");
        data.log_player_action(PlayerKey::P1, PlayerAction::Discard, vec![CardId(3)], None);

        assert_eq!(data.events().len(), 2);
        assert!(matches!(data.events()[0], EventLog::System { .. }));
        match &data.events()[1] {
            EventLog::Player {
                player,
                action,
                cards,
                ..
            } => {
                assert_eq!(*player, PlayerKey::P1);
                assert_eq!(*action, PlayerAction::Discard);
                assert_eq!(cards, &vec![CardId(3)]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_scoreboard() {
        let mut data = GameData::new();
        data.save_result(draft(Some(PlayerKey::P1), 10));
        data.next_round();
        data.save_result(draft(Some(PlayerKey::P2), 4));

        let board = data.scoreboard(3);
        // Base 30, net transfer 6 to P1.
        assert_eq!(board.p1, 36);
        assert_eq!(board.p2, 24);
        assert!(!data.points_exhausted(3));
    }

    #[test]
    fn test_scoreboard_clamps() {
        let mut data = GameData::new();
        data.save_result(draft(Some(PlayerKey::P1), 100));

        let board = data.scoreboard(3);
        assert_eq!(board.p1, 60);
        assert_eq!(board.p2, 0);
        assert!(data.points_exhausted(3));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut data = GameData::new();
        data.next_phase();
        data.save_result(draft(Some(PlayerKey::P1), 5));
        data.log_system_message("checkpoint");

        let snapshot = data.export_state().unwrap();
        let mut restored = GameData::new();
        restored.import_state(&snapshot).unwrap();
        assert_eq!(restored.phase(), data.phase());
        assert_eq!(restored.history(), data.history());
        assert_eq!(restored.events(), data.events());
    }
}

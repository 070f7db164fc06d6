//! Cross-store protocol tests.
//!
//! These drive the card, player, and game-data stores by hand, without the
//! autoplay driver, and verify the invariants each store promises at its
//! boundary.

use hanafuda_engine::{
    CardStore, EngineError, GameData, GameRng, Phase, PlayerKey, PlayerStore, ResultDraft,
    RoundResult, DECK_SIZE,
};

// =============================================================================
// Card store
// =============================================================================

/// A fresh engine holds the full catalog in the deck and passes integrity.
#[test]
fn test_fresh_engine_invariant() {
    let cards = CardStore::new();
    assert_eq!(cards.deck().len(), 48);
    assert!(cards.integrity_check());
}

/// Dealing leaves 24 cards in the deck with integrity preserved.
#[test]
fn test_deal_leaves_half_deck() {
    let mut rng = GameRng::new(42);
    let mut cards = CardStore::new();

    cards.deal_cards(&mut rng).unwrap();

    assert_eq!(cards.deck().len(), 24);
    assert!(cards.integrity_check());
}

/// A draw moves exactly one card from deck to field.
#[test]
fn test_draw_moves_one_card() {
    let mut rng = GameRng::new(42);
    let mut cards = CardStore::new();
    cards.deal_cards(&mut rng).unwrap();

    let deck_before = cards.deck().len();
    let field_before = cards.field().len();

    cards.draw_card().unwrap();

    assert_eq!(cards.deck().len(), deck_before - 1);
    assert_eq!(cards.field().len(), field_before + 1);
    assert!(cards.integrity_check());
}

/// Collecting a hand/field pair grows the collection by two.
#[test]
fn test_collect_pair_moves_both_cards() {
    let mut rng = GameRng::new(42);
    let mut cards = CardStore::new();
    cards.deal_cards(&mut rng).unwrap();

    let hand_card = *cards.hand(PlayerKey::P1).iter().next().unwrap();
    let field_card = *cards.field().iter().next().unwrap();
    let field_before = cards.field().len();

    cards
        .collect_cards(&[hand_card, field_card], PlayerKey::P1)
        .unwrap();

    assert_eq!(cards.field().len(), field_before - 1);
    assert_eq!(cards.collection(PlayerKey::P1).len(), 2);
    assert!(cards.integrity_check());
}

/// The integrity check is a recomputation, not a cached flag: corrupting
/// the containers behind the store's back is detected.
#[test]
fn test_integrity_check_detects_corruption() {
    let cards = CardStore::new();
    let snapshot = cards.export_state().unwrap();

    // Drop the deck from the snapshot and deserialize the corrupt state
    // directly, bypassing the validated import path.
    let tampered = snapshot.replace(
        &serde_json::to_string(cards.deck()).unwrap(),
        "[]",
    );
    let corrupt: CardStore = serde_json::from_str(&tampered).unwrap();

    assert!(!corrupt.integrity_check());

    // The validated import path refuses the same snapshot.
    let mut fresh = CardStore::new();
    assert!(matches!(
        fresh.import_state(&tampered).unwrap_err(),
        EngineError::DeckMismatch { .. }
    ));
}

// =============================================================================
// Game data store
// =============================================================================

/// The phase machine cycles deterministically.
#[test]
fn test_phase_cycle_order() {
    let mut data = GameData::new();

    let phases: Vec<Phase> = (0..4).map(|_| data.next_phase()).collect();
    assert_eq!(
        phases,
        vec![Phase::Draw, Phase::Collect, Phase::Select, Phase::Draw]
    );
}

/// Results are append-only and tagged with the live round counter.
#[test]
fn test_save_result_round_tagging() {
    let mut data = GameData::new();
    let draft = |score| ResultDraft {
        winner: Some(PlayerKey::P1),
        score,
        completed_yaku: Vec::new(),
    };

    data.save_result(draft(3));
    data.save_result(draft(5));

    assert_eq!(data.history().len(), 2);
    assert!(data.history().iter().all(|r| r.round == 1));
}

/// `reset` hands back the archived history, then the ledger is empty.
#[test]
fn test_reset_returns_archive() {
    let mut data = GameData::new();
    data.save_result(ResultDraft {
        winner: Some(PlayerKey::P2),
        score: 12,
        completed_yaku: Vec::new(),
    });
    let len_before = data.history().len();

    let archived = data.reset().unwrap();
    let parsed: Vec<RoundResult> = serde_json::from_str(&archived).unwrap();

    assert_eq!(parsed.len(), len_before);
    assert!(data.history().is_empty());
}

// =============================================================================
// Player store
// =============================================================================

/// Toggling always leaves exactly one player flagged.
#[test]
fn test_toggles_preserve_exactly_one() {
    let mut players = PlayerStore::new();

    for _ in 0..5 {
        players.toggle_active_player();
        assert!(players.active_player().is_ok());
        players.toggle_dealer();
        assert!(players.dealer().is_ok());
    }
}

/// Force-clearing both active flags makes the accessor fail rather than
/// return a stale player.
#[test]
fn test_cleared_flags_raise() {
    let mut players = PlayerStore::new();
    players.player_mut(PlayerKey::P1).is_active = false;
    players.player_mut(PlayerKey::P2).is_active = false;

    assert!(matches!(
        players.active_player().unwrap_err(),
        EngineError::NoActivePlayer
    ));
}

// =============================================================================
// Manual turn protocol
// =============================================================================

/// A hand-driven player cycle: select + resolve, draw + resolve, phase
/// wraps, seats swap. Mirrors what the autoplay driver does internally.
#[test]
fn test_manual_turn_protocol() {
    let mut rng = GameRng::new(99);
    let mut cards = CardStore::new();
    let mut players = PlayerStore::new();
    let mut data = GameData::new();

    cards.deal_cards(&mut rng).unwrap();

    for _ in 0..2 {
        let player = players.active_player().unwrap().key;

        // Select: resolve the first hand card against the field.
        let card = *cards.hand(player).iter().next().unwrap();
        let matches = cards.field_matches(card);
        match matches.len() {
            0 => cards.discard(card, player).unwrap(),
            _ => cards.collect_cards(&[card, matches[0]], player).unwrap(),
        }
        data.next_phase();

        // Draw: resolve the drawn card the same way.
        let drawn = cards.draw_card().unwrap();
        let matches = cards.field_matches(drawn);
        if !matches.is_empty() {
            cards.collect_cards(&[drawn, matches[0]], player).unwrap();
        }
        data.next_phase();

        // Collect phase closes the cycle.
        data.next_phase();
        players.toggle_active_player();

        assert!(cards.integrity_check());
    }

    // Back to the cycle start with P1 active; one full turn for each seat.
    assert_eq!(data.phase(), Phase::Select);
    assert_eq!(players.active_player().unwrap().key, PlayerKey::P1);
    assert_eq!(cards.hand(PlayerKey::P1).len(), 7);
    assert_eq!(cards.hand(PlayerKey::P2).len(), 7);
    assert_eq!(cards.deck().len(), 22);
}

/// Store resets restore the initial observable state.
#[test]
fn test_session_reset() {
    let mut rng = GameRng::new(3);
    let mut cards = CardStore::new();
    let mut players = PlayerStore::new();

    cards.deal_cards(&mut rng).unwrap();
    players.toggle_active_player();
    players.increment_bonus();

    cards.reset();
    players.reset(None);

    assert_eq!(cards.deck().len(), DECK_SIZE);
    assert!(cards.hands_empty());
    assert!(cards.integrity_check());
    assert_eq!(players.active_player().unwrap().key, PlayerKey::P1);
    assert_eq!(players.bonus_multiplier(), 1);
}

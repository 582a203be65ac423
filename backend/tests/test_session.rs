//! Tests for the Session state machine
//!
//! Covers player validation, buy-in tracking, stage transitions and
//! the final-standing checks that gate settlement.

use poker_settle_core::{
    FinalHolding, PositionError, Session, SessionConfig, SessionError, Stage, Valuation,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn session_with(names: &[&str]) -> Session {
    let mut session = Session::new(SessionConfig::default());
    for name in names {
        session.add_player(name).unwrap();
    }
    session
}

fn cash_config() -> SessionConfig {
    SessionConfig {
        valuation: Valuation::Cash,
        ..SessionConfig::default()
    }
}

/// Three players, buy-ins [2, 1, 1], in final standing
fn final_standing_table() -> Session {
    let mut session = session_with(&["Alice", "Bob", "Carol"]);
    session.start().unwrap();
    session.add_buy_in("alice").unwrap();
    session.begin_final_standing().unwrap();
    session
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn test_new_players_start_with_one_buy_in() {
    let session = session_with(&["Alice"]);

    assert_eq!(session.stage(), Stage::Setup);
    assert_eq!(session.players()[0].buy_ins(), 1);
}

#[test]
fn test_names_are_trimmed() {
    let session = session_with(&["  Alice  "]);
    assert_eq!(session.players()[0].name(), "Alice");
}

#[test]
fn test_empty_name_rejected() {
    let mut session = session_with(&[]);
    assert_eq!(session.add_player("   "), Err(SessionError::EmptyName));
}

#[test]
fn test_duplicate_name_rejected_case_insensitively() {
    let mut session = session_with(&["Alice"]);

    assert_eq!(
        session.add_player("ALICE"),
        Err(SessionError::DuplicateName {
            name: "ALICE".to_string()
        })
    );
}

#[test]
fn test_tenth_player_rejected() {
    let mut session = session_with(&["A", "B", "C", "D", "E", "F", "G", "H", "I"]);

    assert_eq!(
        session.add_player("J"),
        Err(SessionError::TooManyPlayers { max: 9 })
    );
}

#[test]
fn test_remove_player_only_during_setup() {
    let mut session = session_with(&["Alice", "Bob"]);
    session.remove_player("bob").unwrap();
    assert_eq!(session.players().len(), 1);

    session.start().unwrap();
    assert!(matches!(
        session.remove_player("Alice"),
        Err(SessionError::InvalidStage {
            stage: Stage::BuyIns,
            ..
        })
    ));
}

#[test]
fn test_start_requires_players() {
    let mut session = session_with(&[]);
    assert_eq!(session.start(), Err(SessionError::NoPlayers));
}

// ============================================================================
// Buy-ins
// ============================================================================

#[test]
fn test_buy_ins_tracked_per_player() {
    let mut session = session_with(&["Alice", "Bob"]);
    session.start().unwrap();

    assert_eq!(session.add_buy_in("Alice"), Ok(2));
    assert_eq!(session.add_buy_in("Alice"), Ok(3));
    assert_eq!(session.remove_buy_in("Bob"), Ok(0));
    assert_eq!(session.remove_buy_in("Bob"), Ok(0));

    assert_eq!(session.total_pot(), 600.0);
    assert_eq!(session.total_chips(), 1200);
}

#[test]
fn test_late_player_can_join_during_buy_ins() {
    let mut session = session_with(&["Alice"]);
    session.start().unwrap();

    session.add_player("Bob").unwrap();

    assert_eq!(session.players().len(), 2);
    assert_eq!(session.total_pot(), 400.0);
}

#[test]
fn test_unknown_player_buy_in_rejected() {
    let mut session = session_with(&["Alice"]);
    session.start().unwrap();

    assert_eq!(
        session.add_buy_in("Zed"),
        Err(SessionError::UnknownPlayer {
            name: "Zed".to_string()
        })
    );
}

#[test]
fn test_buy_in_amount_must_be_positive() {
    let mut session = session_with(&["Alice"]);
    assert!(session.set_buy_in_amount(0.0).is_err());
    assert!(session.set_buy_in_amount(f64::NAN).is_err());

    session.set_buy_in_amount(50.0).unwrap();
    assert_eq!(session.total_pot(), 50.0);
}

#[test]
fn test_starting_stack_and_valuation_fixed_after_setup() {
    let mut session = session_with(&["Alice"]);
    assert!(session.set_starting_stack(0).is_err());

    session.set_starting_stack(1000).unwrap();
    session.set_valuation(Valuation::Cash).unwrap();
    assert_eq!(session.total_chips(), 1000);
    assert_eq!(session.config().valuation, Valuation::Cash);

    session.start().unwrap();
    assert!(matches!(
        session.set_starting_stack(500),
        Err(SessionError::InvalidStage { stage: Stage::BuyIns, .. })
    ));
    assert!(matches!(
        session.set_valuation(Valuation::Chips),
        Err(SessionError::InvalidStage { .. })
    ));
    session.set_buy_in_amount(100.0).unwrap();
    assert_eq!(session.total_pot(), 100.0);
}

#[test]
fn test_late_buy_in_during_final_standing() {
    let mut session = final_standing_table();

    assert_eq!(session.add_buy_in("Bob"), Ok(2));
    assert_eq!(session.total_chips(), 2000);
    assert_eq!(session.remove_buy_in("Bob"), Ok(1));
    assert_eq!(session.total_chips(), 1600);

    session.add_buy_in("Carol").unwrap();
    session.record_final("Alice", FinalHolding::Chips(1000)).unwrap();
    session.record_final("Bob", FinalHolding::Chips(400)).unwrap();
    session.record_final("Carol", FinalHolding::Chips(600)).unwrap();
    assert!(session.reconcile().is_balanced());

    let settlement = session.settle().unwrap();
    assert!(settlement.is_balanced());
    assert_eq!(settlement.transactions[0].to_string(), "Carol pays Alice 100.00");
}

#[test]
fn test_buy_ins_closed_after_settlement() {
    let mut session = final_standing_table();
    session.record_final("Alice", FinalHolding::Chips(800)).unwrap();
    session.record_final("Bob", FinalHolding::Chips(400)).unwrap();
    session.record_final("Carol", FinalHolding::Chips(400)).unwrap();
    session.settle().unwrap();

    assert!(matches!(
        session.add_buy_in("Bob"),
        Err(SessionError::InvalidStage { stage: Stage::Settlement, .. })
    ));
}

#[test]
fn test_final_standing_without_chips_in_play_fails() {
    let mut session = session_with(&["Alice", "Bob"]);
    session.start().unwrap();
    session.remove_buy_in("Alice").unwrap();
    session.remove_buy_in("Bob").unwrap();

    assert_eq!(
        session.begin_final_standing(),
        Err(SessionError::Position(PositionError::DivisionUndefined {
            total_chips: 0
        }))
    );
    assert_eq!(session.stage(), Stage::BuyIns);
}

// ============================================================================
// Final Standing & Settlement
// ============================================================================

#[test]
fn test_chip_session_settles() {
    let mut session = final_standing_table();
    session.record_final("Alice", FinalHolding::Chips(1000)).unwrap();
    session.record_final("Bob", FinalHolding::Chips(400)).unwrap();
    session.record_final("Carol", FinalHolding::Chips(200)).unwrap();

    let nets: Vec<f64> = session
        .positions()
        .unwrap()
        .iter()
        .map(|p| p.net_position)
        .collect();
    assert_eq!(nets, vec![100.0, 0.0, -100.0]);

    let settlement = session.settle().unwrap();

    assert_eq!(session.stage(), Stage::Settlement);
    assert_eq!(settlement.transactions.len(), 1);
    assert_eq!(settlement.transactions[0].to_string(), "Carol pays Alice 100.00");
    assert_eq!(session.settlement().unwrap(), settlement);
}

#[test]
fn test_chip_mismatch_blocks_settlement() {
    let mut session = final_standing_table();
    session.record_final("Alice", FinalHolding::Chips(1000)).unwrap();
    session.record_final("Bob", FinalHolding::Chips(400)).unwrap();

    assert_eq!(
        session.settle(),
        Err(SessionError::ChipCountMismatch {
            expected: 1600,
            actual: 1400
        })
    );
    assert_eq!(session.stage(), Stage::FinalStanding);
}

#[test]
fn test_force_settle_reports_imbalance() {
    let mut session = final_standing_table();
    session.record_final("Alice", FinalHolding::Chips(1000)).unwrap();
    session.record_final("Bob", FinalHolding::Chips(400)).unwrap();

    let settlement = session.force_settle().unwrap();

    assert!(!settlement.is_balanced());
    assert_eq!(settlement.imbalance, -100.0);
    assert_eq!(session.stage(), Stage::Settlement);
}

#[test]
fn test_holding_kind_must_match_valuation() {
    let mut session = final_standing_table();

    assert_eq!(
        session.record_final("Alice", FinalHolding::Cash(500.0)),
        Err(SessionError::HoldingMismatch {
            expected: Valuation::Chips
        })
    );
}

#[test]
fn test_cash_session_settles_when_pot_matches() {
    let mut session = Session::new(cash_config());
    session.add_player("Alice").unwrap();
    session.add_player("Bob").unwrap();
    session.start().unwrap();
    session.begin_final_standing().unwrap();
    session.record_final("Alice", FinalHolding::Cash(275.5)).unwrap();
    session.record_final("Bob", FinalHolding::Cash(124.5)).unwrap();

    let settlement = session.settle().unwrap();

    assert_eq!(settlement.transactions[0].to_string(), "Bob pays Alice 75.50");
}

#[test]
fn test_cash_session_rejects_mismatched_pot() {
    let mut session = Session::new(cash_config());
    session.add_player("Alice").unwrap();
    session.add_player("Bob").unwrap();
    session.start().unwrap();
    session.begin_final_standing().unwrap();
    session.record_final("Alice", FinalHolding::Cash(300.0)).unwrap();

    assert_eq!(
        session.settle(),
        Err(SessionError::CashTotalMismatch {
            expected: 400.0,
            actual: 300.0
        })
    );
}

#[test]
fn test_negative_cash_rejected() {
    let mut session = Session::new(cash_config());
    session.add_player("Alice").unwrap();
    session.start().unwrap();
    session.begin_final_standing().unwrap();

    assert!(matches!(
        session.record_final("Alice", FinalHolding::Cash(-1.0)),
        Err(SessionError::InvalidAmount { .. })
    ));
}

#[test]
fn test_stages_cannot_be_skipped() {
    let mut session = session_with(&["Alice"]);

    assert!(matches!(
        session.settle(),
        Err(SessionError::InvalidStage { stage: Stage::Setup, .. })
    ));
    assert!(matches!(
        session.record_final("Alice", FinalHolding::Chips(400)),
        Err(SessionError::InvalidStage { .. })
    ));
    assert!(matches!(
        session.begin_final_standing(),
        Err(SessionError::InvalidStage { .. })
    ));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_keeping_names() {
    let mut session = final_standing_table();
    let old_id = session.id();

    session.reset(true);

    assert_eq!(session.stage(), Stage::Setup);
    assert_ne!(session.id(), old_id);
    let names: Vec<&str> = session.players().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert!(session.players().iter().all(|p| p.buy_ins() == 1));
    assert!(session.players().iter().all(|p| p.final_holding().is_none()));
}

#[test]
fn test_reset_restores_default_amounts() {
    let config = SessionConfig {
        currency_symbol: "€".to_string(),
        valuation: Valuation::Cash,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config);
    session.add_player("Alice").unwrap();
    session.set_buy_in_amount(50.0).unwrap();
    session.set_starting_stack(1000).unwrap();

    session.reset(true);

    assert_eq!(session.config().buy_in_amount, 200.0);
    assert_eq!(session.config().starting_stack, 400);
    assert_eq!(session.config().currency_symbol, "€");
    assert_eq!(session.config().valuation, Valuation::Cash);
    assert_eq!(session.total_pot(), 200.0);
}

#[test]
fn test_reset_clearing_names() {
    let mut session = final_standing_table();
    session.reset(false);
    assert!(session.players().is_empty());
}

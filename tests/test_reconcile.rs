//! Tests for the row reconciler — fallback states, case-insensitive
//! matching, and candidate/selected-signal precedence.

mod common;

use chrono::{TimeZone, Utc};
use common::{candidate, candidate_with_contract, universe_of};
use signaldesk::application::reconcile::{build_from_decision_only, merge};
use signaldesk::domain::entities::merged_row::NOT_EVALUATED;
use signaldesk::domain::entities::snapshots::{DecisionCandidate, DecisionRun, UniverseSymbol};
use signaldesk::domain::values::stage_status::StageStatus;

fn run_with(candidates: Vec<DecisionCandidate>) -> DecisionRun {
    DecisionRun {
        pipeline_timestamp: Some(Utc.with_ymd_and_hms(2026, 4, 1, 14, 30, 0).unwrap()),
        candidates,
        ..Default::default()
    }
}

#[test]
fn test_uncovered_symbol_gets_fallback_sentinels() {
    let universe = universe_of(&["SPY", "QQQ"]);
    let run = run_with(vec![candidate("SPY", "ELIGIBLE")]);

    let rows = merge(&universe.symbols, Some(&run));
    assert_eq!(rows.len(), 2);

    let qqq = &rows[1];
    assert_eq!(qqq.symbol, "QQQ");
    assert_eq!(qqq.verdict, NOT_EVALUATED);
    assert_eq!(qqq.final_verdict, NOT_EVALUATED);
    assert_eq!(qqq.stage_status, StageStatus::NotRun);
    assert_eq!(qqq.stage1_status, StageStatus::NotRun);
    assert_eq!(qqq.stage2_status, StageStatus::NotRun);
    assert_eq!(qqq.provider_status, StageStatus::NotRun);
    assert!(qqq.score.is_none());
    assert!(qqq.band.is_none());
    assert!(qqq.price.is_none());
    assert!(qqq.expiration.is_none());
    assert!(qqq.evaluated_at.is_none());
    assert!(qqq.data_freshness.is_none());
    assert!(!qqq.has_candidates);
}

#[test]
fn test_empty_decision_means_all_fallback() {
    let universe = universe_of(&["SPY", "QQQ", "IWM"]);

    for decision in [None, Some(&DecisionRun::default())] {
        let rows = merge(&universe.symbols, decision);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.verdict == NOT_EVALUATED));
    }
}

#[test]
fn test_merge_is_case_insensitive() {
    let universe = universe_of(&["spy"]);
    let run = run_with(vec![candidate("SPY", "ELIGIBLE")]);

    let rows = merge(&universe.symbols, Some(&run));
    assert_eq!(rows.len(), 1, "casing differences must not duplicate rows");
    assert_eq!(rows[0].symbol, "spy", "display keeps the universe casing");
    assert_eq!(rows[0].verdict, "ELIGIBLE");
    assert!(rows[0].has_candidates);
}

#[test]
fn test_selected_signal_overrides_candidate() {
    let universe = universe_of(&["SPY"]);
    let mut run = run_with(vec![candidate("SPY", "ELIGIBLE")]);
    run.selected_signals = vec![candidate("spy", "SELECTED")];

    let rows = merge(&universe.symbols, Some(&run));
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].verdict, "SELECTED",
        "the pipeline's final choice wins over the considered list"
    );
}

#[test]
fn test_merged_row_fields_from_candidate_and_run() {
    let universe = universe_of(&["SPY"]);
    let mut c = candidate_with_contract("SPY", "ELIGIBLE", "CSP", "2026-04-18T00:00:00Z");
    c.score = Some(82.5);
    let ts = Utc.with_ymd_and_hms(2026, 4, 1, 14, 30, 0).unwrap();
    let run = DecisionRun {
        pipeline_timestamp: Some(ts),
        candidates: vec![c],
        ..Default::default()
    };

    let rows = merge(&universe.symbols, Some(&run));
    let spy = &rows[0];
    assert_eq!(spy.verdict, "ELIGIBLE");
    assert_eq!(spy.final_verdict, "ELIGIBLE");
    assert_eq!(spy.score, Some(82.5));
    assert_eq!(spy.expiration.as_deref(), Some("2026-04-18"), "expiry is normalized to the date prefix");
    assert_eq!(spy.stage_status, StageStatus::Run);
    assert_eq!(spy.stage1_status, StageStatus::Pass);
    assert_eq!(spy.stage2_status, StageStatus::Pass);
    assert_eq!(spy.strategy.as_deref(), Some("CSP"));
    assert_eq!(spy.evaluated_at, Some(ts));
    assert_eq!(spy.data_freshness, Some(ts));
}

#[test]
fn test_stage2_runs_without_concrete_contract() {
    let universe = universe_of(&["SPY"]);
    let run = run_with(vec![candidate("SPY", "ELIGIBLE")]);

    let rows = merge(&universe.symbols, Some(&run));
    assert_eq!(rows[0].stage2_status, StageStatus::Run);
}

#[test]
fn test_price_falls_back_to_universe_entry() {
    let mut entry = UniverseSymbol::new("SPY");
    entry.last_price = Some(512.3);
    let run = run_with(vec![candidate("SPY", "ELIGIBLE")]);

    let rows = merge(&[entry], Some(&run));
    assert_eq!(rows[0].price, Some(512.3));
}

#[test]
fn test_decision_only_symbol_still_emitted() {
    let universe = universe_of(&["SPY"]);
    let run = run_with(vec![candidate("SPY", "ELIGIBLE"), candidate("NVDA", "REJECTED")]);

    let rows = merge(&universe.symbols, Some(&run));
    assert_eq!(rows.len(), 2, "output covers the union of both snapshots");
    assert_eq!(rows[1].symbol, "NVDA");
    assert_eq!(rows[1].verdict, "REJECTED");
}

#[test]
fn test_decision_only_dedup_and_precedence() {
    let mut run = run_with(vec![
        candidate("SPY", "ELIGIBLE"),
        candidate("QQQ", "REJECTED"),
        candidate("SPY", "DUPLICATE"),
    ]);
    run.selected_signals = vec![candidate("QQQ", "SELECTED")];

    let rows = build_from_decision_only(&run);
    assert_eq!(rows.len(), 2, "no duplicate symbols");
    assert_eq!(rows[0].symbol, "SPY");
    assert_eq!(
        rows[0].verdict, "DUPLICATE",
        "within the candidates list the last write to the index wins"
    );
    assert_eq!(rows[1].symbol, "QQQ");
    assert_eq!(
        rows[1].verdict, "SELECTED",
        "selected signals override candidates, position stays first-seen"
    );
}

#[test]
fn test_decision_only_rows_are_evaluated() {
    let run = run_with(vec![candidate_with_contract(
        "SPY",
        "ELIGIBLE",
        "CSP",
        "2026-04-18",
    )]);

    let rows = build_from_decision_only(&run);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].has_candidates);
    assert_eq!(rows[0].stage_status, StageStatus::Run);
    assert!(rows[0].evaluated_at.is_some());
}

#[test]
fn test_short_expiry_degrades_to_none() {
    let universe = universe_of(&["SPY"]);
    let run = run_with(vec![candidate_with_contract("SPY", "ELIGIBLE", "CSP", "bad")]);

    let rows = merge(&universe.symbols, Some(&run));
    assert!(rows[0].expiration.is_none(), "malformed expiry degrades to null, not failure");
}

#[test]
fn test_duplicate_universe_symbols_collapse() {
    let universe = universe_of(&["SPY", "spy"]);
    let rows = merge(&universe.symbols, None);
    assert_eq!(rows.len(), 1);
}

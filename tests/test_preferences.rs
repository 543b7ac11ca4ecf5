//! Tests for persisted table preferences — defaults, fallback on corrupt
//! state, and column-toggle persistence through the opportunities use case.

mod common;

use common::{opportunity, setup_with_feed, FailingStore};
use signaldesk::application::preferences::{self, TablePreferences};
use signaldesk::domain::ports::kv_store::KeyValueStore;
use signaldesk::domain::values::band::Band;
use signaldesk::domain::values::sorting::{FilterSpec, SortDirection, SortField};
use signaldesk::infrastructure::feeds::fixture::FixtureFeed;
use signaldesk::infrastructure::storage::memory::MemoryStore;

#[test]
fn test_missing_state_falls_back_to_defaults() {
    let store = MemoryStore::new();
    let prefs = preferences::load(&store, "main");
    assert_eq!(prefs.sort.field, SortField::Rank);
    assert_eq!(prefs.sort.direction, SortDirection::Ascending);
    assert_eq!(prefs.filters, FilterSpec::default());
}

#[test]
fn test_round_trip() {
    let store = MemoryStore::new();
    let mut prefs = TablePreferences::default();
    prefs.sort = prefs.sort.toggle(SortField::Symbol);
    prefs.filters.band = Some(Band::A);
    prefs.filters.max_capital_pct = Some(15.0);

    preferences::save(&store, "main", &prefs);
    let loaded = preferences::load(&store, "main");

    assert_eq!(loaded.sort.field, SortField::Symbol);
    assert_eq!(loaded.sort.direction, SortDirection::Ascending);
    assert_eq!(loaded.filters.band, Some(Band::A));
    assert_eq!(loaded.filters.max_capital_pct, Some(15.0));
}

#[test]
fn test_views_are_independent() {
    let store = MemoryStore::new();
    let mut prefs = TablePreferences::default();
    prefs.filters.band = Some(Band::C);
    preferences::save(&store, "watchlist", &prefs);

    assert_eq!(preferences::load(&store, "watchlist").filters.band, Some(Band::C));
    assert_eq!(preferences::load(&store, "main").filters.band, None);
}

#[test]
fn test_corrupt_state_falls_back_to_defaults() {
    let store = MemoryStore::new();
    store.set("prefs:main", "][ not json").unwrap();

    let prefs = preferences::load(&store, "main");
    assert_eq!(prefs.sort.field, SortField::Rank);
}

#[test]
fn test_reset_restores_defaults() {
    let store = MemoryStore::new();
    let mut prefs = TablePreferences::default();
    prefs.filters.band = Some(Band::B);
    preferences::save(&store, "main", &prefs);

    preferences::reset(&store, "main");
    assert_eq!(preferences::load(&store, "main").filters.band, None);
}

#[test]
fn test_failing_store_reads_default_and_writes_noop() {
    let prefs = preferences::load(&FailingStore, "main");
    assert_eq!(prefs.sort.field, SortField::Rank);

    // Must not panic.
    preferences::save(&FailingStore, "main", &prefs);
    preferences::reset(&FailingStore, "main");
}

#[tokio::test]
async fn test_sort_toggle_persists_across_invocations() {
    let feed = FixtureFeed::new().with_opportunities(vec![
        opportunity("LOW", None, None, None, Some(10.0)),
        opportunity("HIGH", None, None, None, Some(90.0)),
    ]);
    let desk = setup_with_feed(feed);

    // First click on score: default direction, descending.
    let first = desk
        .opportunities_table("main", None, Some(SortField::Score))
        .await
        .unwrap();
    assert_eq!(first.rows[0].symbol, "HIGH");
    assert_eq!(first.sort.unwrap().direction, SortDirection::Descending);

    // Second click toggles the persisted direction.
    let second = desk
        .opportunities_table("main", None, Some(SortField::Score))
        .await
        .unwrap();
    assert_eq!(second.rows[0].symbol, "LOW");
    assert_eq!(second.sort.unwrap().direction, SortDirection::Ascending);

    // No click: the toggled state is still in effect.
    let third = desk.opportunities_table("main", None, None).await.unwrap();
    assert_eq!(third.rows[0].symbol, "LOW");
}

#[tokio::test]
async fn test_filters_persist_per_view() {
    let feed = FixtureFeed::new().with_opportunities(vec![
        opportunity("A1", Some(Band::A), None, None, None),
        opportunity("B1", Some(Band::B), None, None, None),
    ]);
    let desk = setup_with_feed(feed);

    let filters = FilterSpec {
        band: Some(Band::A),
        ..Default::default()
    };
    let filtered = desk
        .opportunities_table("main", Some(filters), None)
        .await
        .unwrap();
    assert_eq!(filtered.shown, 1);

    // Filters were persisted; a bare call reuses them.
    let again = desk.opportunities_table("main", None, None).await.unwrap();
    assert_eq!(again.shown, 1);
    assert_eq!(again.rows[0].symbol, "A1");

    assert_eq!(desk.preferences("main").filters.band, Some(Band::A));
}

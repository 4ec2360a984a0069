mod common;

use std::fs;

use common::{fren, MemorySnapshots};
use fren_rank::workflows::frens::{
    AccountId, CollectorError, FileSnapshotStore, SnapshotKey, TrendAnalyzer,
};

#[test]
fn all_weeks_absent_spends_whole_budget() {
    let snapshots = MemorySnapshots::default();
    let analyzer = TrendAnalyzer::new(&snapshots);

    let history = analyzer
        .history(&AccountId::from("ghost"), SnapshotKey::new(10, 2025), 7)
        .expect("history");

    assert!(history.scores.is_empty());
    assert!(history.tags.is_empty());
    assert_eq!(snapshots.lookups(), 7);
}

#[test]
fn history_is_oldest_first_and_skips_gaps() {
    let snapshots = MemorySnapshots::default()
        .with_week(SnapshotKey::new(2, 2024), vec![fren("ada", 5), fren("bob", 1)])
        .with_week(SnapshotKey::new(52, 2023), vec![fren("ada", 3)])
        .with_week(SnapshotKey::new(51, 2023), vec![fren("bob", 9)]);
    let analyzer = TrendAnalyzer::new(&snapshots);

    let history = analyzer
        .history(&AccountId::from("ada"), SnapshotKey::new(2, 2024), 4)
        .expect("history");

    assert_eq!(history.scores, vec![3, 5]);
    assert_eq!(history.tags, vec!["52,2023", "2,2024"]);
    assert_eq!(snapshots.lookups(), 4);
}

#[test]
fn weeks_beyond_the_budget_are_not_read() {
    let snapshots = MemorySnapshots::default()
        .with_week(SnapshotKey::new(20, 2025), vec![fren("ada", 4)])
        .with_week(SnapshotKey::new(17, 2025), vec![fren("ada", 8)]);
    let analyzer = TrendAnalyzer::new(&snapshots);

    let history = analyzer
        .history(&AccountId::from("ada"), SnapshotKey::new(20, 2025), 3)
        .expect("history");

    assert_eq!(history.scores, vec![4]);
    assert_eq!(snapshots.lookups(), 3);
}

#[test]
fn walk_stops_at_year_zero() {
    let snapshots = MemorySnapshots::default();
    let analyzer = TrendAnalyzer::new(&snapshots);

    let history = analyzer
        .history(&AccountId::from("ada"), SnapshotKey::new(1, 0), 50)
        .expect("history");

    assert!(history.is_empty());
    assert_eq!(snapshots.lookups(), 1);
}

#[test]
fn malformed_weeks_on_disk_count_as_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileSnapshotStore::new(dir.path());

    for (key, liked) in [(SnapshotKey::new(40, 2025), 6), (SnapshotKey::new(38, 2025), 2)] {
        store
            .get_or_create(key, &move || Ok::<_, CollectorError>(vec![fren("ada", liked)]))
            .expect("snapshot created");
    }
    fs::write(
        store.path_for(SnapshotKey::new(39, 2025)),
        "{\"frens\": [{\"id\": \"ada\"}]}",
    )
    .expect("write legacy week");

    let history = TrendAnalyzer::new(&store)
        .history(&AccountId::from("ada"), SnapshotKey::new(40, 2025), 5)
        .expect("history");

    assert_eq!(history.scores, vec![2, 6]);
    assert_eq!(history.tags, vec!["38,2025", "40,2025"]);
}

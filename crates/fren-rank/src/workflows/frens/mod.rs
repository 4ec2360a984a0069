//! Fren ranking: scoring, weekly snapshots, trend history, and the
//! highlight/unfollow selections built on top of them.

pub mod actions;
pub mod collector;
pub mod domain;
pub mod report;
pub mod score;
pub mod selection;
pub mod snapshot;
pub mod trend;

pub use actions::{
    prune_candidates, publish_highlights, ActionError, Confirmation, ConfirmationGate,
    HighlightPublisher, PruneOutcome, RelationshipGateway,
};
pub use collector::{
    CollectorError, ExportFileGraph, FollowedProfile, FrenCollector, GraphCollector, GraphExport,
    SocialGraph, TimelineTweet,
};
pub use domain::{Account, AccountId, Snapshot, SnapshotKey};
pub use report::{
    highlight_pages, ranking_views, write_ranking_csv, AccountView, HighlightPage, RankMarker,
    ReportError,
};
pub use score::{score, EngagementBreakdown};
pub use selection::{
    rank_by_score, select_highlights, select_removal_candidates, RemovalCandidate,
    RemovalCriteria,
};
pub use snapshot::{FileSnapshotStore, SnapshotError, SnapshotLoad, SnapshotReader};
pub use trend::{TrendAnalyzer, TrendHistory, WeekCursor};

use std::cmp::Reverse;

use tracing::debug;

use super::domain::{Account, SnapshotKey};
use super::score::score;
use super::snapshot::{SnapshotError, SnapshotReader};
use super::trend::{TrendAnalyzer, TrendHistory};

/// Top `n` reciprocal follows by descending score. Ties keep snapshot order.
pub fn select_highlights(frens: &[Account], n: usize) -> Vec<Account> {
    if n == 0 {
        return Vec::new();
    }

    let mut mutuals: Vec<&Account> = frens.iter().filter(|fren| fren.follows_back).collect();
    mutuals.sort_by_key(|fren| Reverse(score(fren)));
    mutuals.into_iter().take(n).cloned().collect()
}

/// Full snapshot ordered by descending score, for display.
pub fn rank_by_score(frens: &[Account]) -> Vec<&Account> {
    let mut ranked: Vec<&Account> = frens.iter().collect();
    ranked.sort_by_key(|fren| Reverse(score(fren)));
    ranked
}

/// Parameters for picking accounts to unfollow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalCriteria {
    pub count: usize,
    pub min_datapoints: usize,
    pub max_scanned: usize,
    pub start: SnapshotKey,
}

/// An unfollow candidate together with the history that justified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalCandidate {
    pub account: Account,
    pub history: TrendHistory,
}

/// Lowest-scoring accounts with enough history to judge them.
///
/// Order is ascending by score, then non-mutuals before mutuals, then fewer
/// lifetime tweets first. Accounts whose history has fewer than
/// `min_datapoints` entries are skipped rather than treated as low scorers.
pub fn select_removal_candidates<R: SnapshotReader>(
    frens: &[Account],
    criteria: &RemovalCriteria,
    analyzer: &TrendAnalyzer<R>,
) -> Result<Vec<RemovalCandidate>, SnapshotError> {
    let mut accepted = Vec::new();
    if criteria.count == 0 {
        return Ok(accepted);
    }

    let mut ordered: Vec<&Account> = frens.iter().collect();
    ordered.sort_by_key(|fren| (score(fren), fren.follows_back, fren.total_tweets_lifetime));

    for fren in ordered {
        let history = analyzer.history(&fren.id, criteria.start, criteria.max_scanned)?;
        if history.len() < criteria.min_datapoints {
            debug!(
                fren = %fren.handle,
                datapoints = history.len(),
                required = criteria.min_datapoints,
                "skipping removal candidate with too little history"
            );
            continue;
        }

        accepted.push(RemovalCandidate {
            account: fren.clone(),
            history,
        });
        if accepted.len() == criteria.count {
            break;
        }
    }

    Ok(accepted)
}

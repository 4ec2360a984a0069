use super::domain::{AccountId, SnapshotKey};
use super::score::score;
use super::snapshot::{SnapshotError, SnapshotReader};

/// Walks week keys backwards from a starting week, yielding at most `budget`
/// keys and never a key with a negative year.
#[derive(Debug, Clone)]
pub struct WeekCursor {
    next: SnapshotKey,
    remaining: usize,
}

impl WeekCursor {
    pub fn new(start: SnapshotKey, budget: usize) -> Self {
        Self {
            next: start,
            remaining: budget,
        }
    }
}

impl Iterator for WeekCursor {
    type Item = SnapshotKey;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.next.year < 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next;
        self.next = current.previous();
        Some(current)
    }
}

/// Score series for one account, oldest week first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendHistory {
    pub scores: Vec<i64>,
    pub tags: Vec<String>,
}

impl TrendHistory {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn datapoints(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.tags
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

/// Reconstructs per-account score history from stored snapshots.
pub struct TrendAnalyzer<R> {
    reader: R,
}

impl<R: SnapshotReader> TrendAnalyzer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Scan up to `max_scanned` weeks back from `start` (inclusive). Every
    /// scanned week costs budget whether or not the account appears in it;
    /// weeks without the account leave no gap marker in the result.
    pub fn history(
        &self,
        target: &AccountId,
        start: SnapshotKey,
        max_scanned: usize,
    ) -> Result<TrendHistory, SnapshotError> {
        let mut history = TrendHistory::default();

        for key in WeekCursor::new(start, max_scanned) {
            let Some(snapshot) = self.reader.get(key)? else {
                continue;
            };
            if let Some(account) = snapshot.find(target) {
                history.scores.push(score(account));
                history.tags.push(key.tag());
            }
        }

        history.scores.reverse();
        history.tags.reverse();
        Ok(history)
    }
}

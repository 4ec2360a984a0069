#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use fren_rank::workflows::frens::{
    Account, AccountId, Snapshot, SnapshotError, SnapshotKey, SnapshotReader,
};

/// In-memory snapshot source that counts every lookup.
#[derive(Default)]
pub struct MemorySnapshots {
    weeks: HashMap<SnapshotKey, Snapshot>,
    lookups: Cell<usize>,
}

impl MemorySnapshots {
    pub fn with_week(mut self, key: SnapshotKey, frens: Vec<Account>) -> Self {
        self.weeks.insert(key, Snapshot { key, frens });
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl SnapshotReader for MemorySnapshots {
    fn get(&self, key: SnapshotKey) -> Result<Option<Snapshot>, SnapshotError> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.weeks.get(&key).cloned())
    }
}

/// Mutual follow with `liked` likes over a single tweet, so score == liked.
pub fn fren(id: &str, liked: u64) -> Account {
    Account {
        id: AccountId::from(id),
        display_name: format!("Fren {id}"),
        handle: id.to_string(),
        total_tweets_lifetime: 100,
        profile_image_url: String::new(),
        follows_back: true,
        following_count: 200,
        followers_count: 200,
        tweets_in_window: 1,
        liked,
        retweeted: 0,
        quoted: 0,
        replied: 0,
    }
}

pub fn one_sided(id: &str, liked: u64) -> Account {
    Account {
        follows_back: false,
        ..fren(id, liked)
    }
}

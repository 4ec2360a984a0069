use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable external identifier of a followed account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One followed account ("fren") as captured in a weekly snapshot.
///
/// The engagement counters cover the collector's trailing window and count the
/// operator's own interactions with this account's content. Field names on
/// disk are kept short for compatibility with existing snapshot files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "at")]
    pub handle: String,
    #[serde(rename = "total_tweets")]
    pub total_tweets_lifetime: u64,
    #[serde(rename = "pfp_url")]
    pub profile_image_url: String,

    pub follows_back: bool,
    #[serde(rename = "following")]
    pub following_count: u64,
    #[serde(rename = "followers")]
    pub followers_count: u64,

    #[serde(rename = "tweets")]
    pub tweets_in_window: u64,

    pub liked: u64,
    pub retweeted: u64,
    pub quoted: u64,
    pub replied: u64,
}

impl Account {
    pub fn profile_url(&self) -> String {
        format!("https://twitter.com/{}", self.handle)
    }
}

/// Calendar key of a weekly snapshot: ISO week number plus the calendar year
/// of the day the snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotKey {
    pub week: u32,
    pub year: i32,
}

impl SnapshotKey {
    pub const LAST_WEEK_OF_YEAR: u32 = 52;

    pub fn new(week: u32, year: i32) -> Self {
        Self { week, year }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            week: date.iso_week().week(),
            year: date.year(),
        }
    }

    /// The key one week earlier. Week 1 rolls back to week 52 of the prior
    /// year; week 53 snapshots are only reachable as a starting point.
    pub fn previous(self) -> Self {
        if self.week <= 1 {
            Self {
                week: Self::LAST_WEEK_OF_YEAR,
                year: self.year - 1,
            }
        } else {
            Self {
                week: self.week - 1,
                year: self.year,
            }
        }
    }

    /// `"week,year"`, the label attached to trend datapoints.
    pub fn tag(&self) -> String {
        format!("{},{}", self.week, self.year)
    }

    pub fn file_name(&self) -> String {
        format!("frens_{}_{}.json", self.week, self.year)
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} of {}", self.week, self.year)
    }
}

/// Immutable, ordered set of accounts captured for one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub key: SnapshotKey,
    pub frens: Vec<Account>,
}

impl Snapshot {
    pub fn find(&self, id: &AccountId) -> Option<&Account> {
        self.frens.iter().find(|account| &account.id == id)
    }

    pub fn len(&self) -> usize {
        self.frens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frens.is_empty()
    }
}

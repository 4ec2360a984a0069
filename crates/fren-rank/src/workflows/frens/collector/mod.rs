//! Turning social-graph data into snapshot accounts.
//!
//! Talking to the network (pagination, rate limits, auth) stays behind
//! [`SocialGraph`]; this module only walks what the graph hands back and
//! tallies engagement inside the lookback window.

mod export;

pub use export::{ExportFileGraph, GraphExport};

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{Account, AccountId};

/// Default lookback for engagement counters.
pub const ENGAGEMENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("failed to read graph export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid graph export: {0}")]
    Format(#[from] serde_json::Error),
    #[error("social graph unavailable: {0}")]
    Graph(String),
    #[error("no graph export configured; pass --export to create this week's snapshot")]
    NotConfigured,
}

/// Anything that can produce a fresh, ordered list of accounts for a new
/// snapshot.
pub trait FrenCollector {
    fn collect(&self) -> Result<Vec<Account>, CollectorError>;
}

impl<F> FrenCollector for F
where
    F: Fn() -> Result<Vec<Account>, CollectorError>,
{
    fn collect(&self) -> Result<Vec<Account>, CollectorError> {
        self()
    }
}

/// Profile data for one followed account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowedProfile {
    pub id: AccountId,
    pub display_name: String,
    pub handle: String,
    pub total_tweets: u64,
    pub profile_image_url: String,
    pub following_count: u64,
    pub followers_count: u64,
}

/// A tweet as seen from the operator's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineTweet {
    pub created_at: DateTime<Utc>,
    /// The operator liked this tweet.
    #[serde(default)]
    pub favorited: bool,
    /// The operator retweeted this tweet.
    #[serde(default)]
    pub retweeted: bool,
    #[serde(default)]
    pub quoted_author: Option<AccountId>,
    #[serde(default)]
    pub in_reply_to: Option<AccountId>,
}

/// Read access to the operator's social graph.
pub trait SocialGraph {
    /// Id of the operator's own account.
    fn own_id(&self) -> Result<AccountId, CollectorError>;
    /// Accounts the operator follows, in the order the network lists them.
    fn friends(&self) -> Result<Vec<FollowedProfile>, CollectorError>;
    /// Whether `fren` follows `own` back.
    fn follows_back(&self, own: &AccountId, fren: &AccountId) -> Result<bool, CollectorError>;
    /// Timeline of `user`, newest tweet first.
    fn timeline(&self, user: &AccountId) -> Result<Vec<TimelineTweet>, CollectorError>;
}

/// Builds snapshot accounts by walking a [`SocialGraph`].
pub struct GraphCollector<G> {
    graph: G,
    now: DateTime<Utc>,
    window: Duration,
}

impl<G: SocialGraph> GraphCollector<G> {
    pub fn new(graph: G, now: DateTime<Utc>) -> Self {
        Self {
            graph,
            now,
            window: Duration::days(ENGAGEMENT_WINDOW_DAYS),
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    fn cutoff(&self) -> DateTime<Utc> {
        self.now - self.window
    }
}

impl<G: SocialGraph> FrenCollector for GraphCollector<G> {
    fn collect(&self) -> Result<Vec<Account>, CollectorError> {
        let own = self.graph.own_id()?;
        let cutoff = self.cutoff();

        let mut frens = Vec::new();
        let mut index: HashMap<AccountId, usize> = HashMap::new();

        for profile in self.graph.friends()? {
            // Keep the first listing if the network repeats an account.
            if index.contains_key(&profile.id) {
                continue;
            }
            debug!(fren = %profile.handle, "processing fren");
            let follows_back = self.graph.follows_back(&own, &profile.id)?;

            let mut tweets = 0;
            let mut liked = 0;
            let mut retweeted = 0;
            for tweet in self.graph.timeline(&profile.id)? {
                if tweet.created_at < cutoff {
                    break;
                }
                tweets += 1;
                if tweet.retweeted {
                    retweeted += 1;
                }
                if tweet.favorited {
                    liked += 1;
                }
            }

            index.insert(profile.id.clone(), frens.len());
            frens.push(Account {
                id: profile.id,
                display_name: profile.display_name,
                handle: profile.handle,
                total_tweets_lifetime: profile.total_tweets,
                profile_image_url: profile.profile_image_url,
                follows_back,
                following_count: profile.following_count,
                followers_count: profile.followers_count,
                tweets_in_window: tweets,
                liked,
                retweeted,
                quoted: 0,
                replied: 0,
            });
        }

        for tweet in self.graph.timeline(&own)? {
            if tweet.created_at < cutoff {
                break;
            }
            if let Some(position) = tweet.quoted_author.as_ref().and_then(|id| index.get(id)) {
                frens[*position].quoted += 1;
            }
            if let Some(position) = tweet.in_reply_to.as_ref().and_then(|id| index.get(id)) {
                frens[*position].replied += 1;
            }
        }

        info!(frens = frens.len(), "collected fren engagement");
        Ok(frens)
    }
}

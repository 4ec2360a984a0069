//! Engagement scoring. Everything here is pure numeric computation; string
//! formatting for display lives at the edge in [`format_ratio`].

use super::domain::Account;

pub const LIKE_WEIGHT: u64 = 1;
pub const RETWEET_WEIGHT: u64 = 10;
pub const QUOTE_WEIGHT: u64 = 5;
pub const REPLY_WEIGHT: u64 = 3;

/// Composite engagement score used for every ranking decision.
///
/// Raw interaction volume is weighted per action type and multiplied by the
/// account's activity in the window. Accounts that do not follow back are
/// scaled down by `tweets * (following / followers)`, floored at 1, so a
/// one-sided follow only keeps its score when the account has a favourable
/// follower ratio.
pub fn score(account: &Account) -> i64 {
    if account.tweets_in_window == 0 {
        return 0;
    }

    let base = [
        (account.liked, LIKE_WEIGHT),
        (account.retweeted, RETWEET_WEIGHT),
        (account.quoted, QUOTE_WEIGHT),
        (account.replied, REPLY_WEIGHT),
    ]
    .into_iter()
    .fold(0u64, |total, (count, weight)| {
        total.saturating_add(count.saturating_mul(weight))
    })
    .saturating_mul(account.tweets_in_window);

    if account.follows_back {
        return i64::try_from(base).unwrap_or(i64::MAX);
    }

    if account.followers_count == 0 {
        return 0;
    }

    let follow_ratio = account.following_count as f64 / account.followers_count as f64;
    let divisor = (account.tweets_in_window as f64 * follow_ratio).max(1.0);
    to_score(base as f64 / divisor)
}

fn to_score(value: f64) -> i64 {
    // `as` truncates toward zero and saturates at the i64 bounds.
    value.trunc() as i64
}

/// followers / following, 0 when the account follows nobody.
pub fn ratio(account: &Account) -> f64 {
    if account.following_count == 0 {
        0.0
    } else {
        account.followers_count as f64 / account.following_count as f64
    }
}

fn window_percentage(count: u64, account: &Account) -> f64 {
    if account.tweets_in_window == 0 {
        0.0
    } else {
        count as f64 / account.tweets_in_window as f64 * 100.0
    }
}

pub fn liked_ratio(account: &Account) -> f64 {
    window_percentage(account.liked, account)
}

pub fn retweeted_ratio(account: &Account) -> f64 {
    window_percentage(account.retweeted, account)
}

pub fn quoted_ratio(account: &Account) -> f64 {
    window_percentage(account.quoted, account)
}

pub fn replied_ratio(account: &Account) -> f64 {
    window_percentage(account.replied, account)
}

/// Per-type engagement percentages for one account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementBreakdown {
    pub liked: f64,
    pub retweeted: f64,
    pub quoted: f64,
    pub replied: f64,
}

impl EngagementBreakdown {
    pub fn of(account: &Account) -> Self {
        Self {
            liked: liked_ratio(account),
            retweeted: retweeted_ratio(account),
            quoted: quoted_ratio(account),
            replied: replied_ratio(account),
        }
    }
}

pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

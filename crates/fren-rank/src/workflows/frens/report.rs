use std::io::Write;

use serde::Serialize;

use super::domain::Account;
use super::score::{format_ratio, ratio, score, EngagementBreakdown};
use super::selection::RemovalCandidate;

/// Maximum entries per published highlight post.
pub const HIGHLIGHT_PAGE_SIZE: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unable to write ranking csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Display row for one account with all ratios already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub rank: usize,
    pub handle: String,
    pub display_name: String,
    pub url: String,
    pub score: i64,
    pub follows_back: bool,
    pub ratio: String,
    pub tweets: u64,
    pub liked_ratio: String,
    pub retweeted_ratio: String,
    pub quoted_ratio: String,
    pub replied_ratio: String,
}

impl AccountView {
    pub fn new(rank: usize, account: &Account) -> Self {
        let engagement = EngagementBreakdown::of(account);
        Self {
            rank,
            handle: account.handle.clone(),
            display_name: account.display_name.clone(),
            url: account.profile_url(),
            score: score(account),
            follows_back: account.follows_back,
            ratio: format_ratio(ratio(account)),
            tweets: account.tweets_in_window,
            liked_ratio: format_ratio(engagement.liked),
            retweeted_ratio: format_ratio(engagement.retweeted),
            quoted_ratio: format_ratio(engagement.quoted),
            replied_ratio: format_ratio(engagement.replied),
        }
    }
}

/// Build 1-based ranked rows from an already ordered account list.
pub fn ranking_views<'a, I>(ranked: I) -> Vec<AccountView>
where
    I: IntoIterator<Item = &'a Account>,
{
    ranked
        .into_iter()
        .enumerate()
        .map(|(index, account)| AccountView::new(index + 1, account))
        .collect()
}

pub fn write_ranking_csv<W: Write>(writer: W, views: &[AccountView]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for view in views {
        csv_writer.serialize(view)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMarker {
    First,
    Second,
    Third,
    Listed,
}

impl RankMarker {
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => Self::First,
            1 => Self::Second,
            2 => Self::Third,
            _ => Self::Listed,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::First => "🥇",
            Self::Second => "🥈",
            Self::Third => "🥉",
            Self::Listed => "✨",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightEntry {
    pub marker: RankMarker,
    pub handle: String,
}

/// One publishable batch of highlights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPage {
    pub number: usize,
    pub total: usize,
    pub entries: Vec<HighlightEntry>,
}

impl HighlightPage {
    pub fn render(&self) -> String {
        let mut text = if self.total > 1 {
            format!("Weekly fren highlights ({}/{})\n", self.number, self.total)
        } else {
            "Weekly fren highlights\n".to_string()
        };
        for entry in &self.entries {
            text.push_str(entry.marker.symbol());
            text.push_str(" @");
            text.push_str(&entry.handle);
            text.push('\n');
        }
        text
    }
}

/// Split ranked highlights into pages of at most [`HIGHLIGHT_PAGE_SIZE`].
/// Rank markers follow the position in the whole ranking, not in the page.
pub fn highlight_pages(highlights: &[Account]) -> Vec<HighlightPage> {
    let total = highlights.len().div_ceil(HIGHLIGHT_PAGE_SIZE);
    highlights
        .chunks(HIGHLIGHT_PAGE_SIZE)
        .enumerate()
        .map(|(page_index, chunk)| HighlightPage {
            number: page_index + 1,
            total,
            entries: chunk
                .iter()
                .enumerate()
                .map(|(offset, account)| HighlightEntry {
                    marker: RankMarker::for_position(page_index * HIGHLIGHT_PAGE_SIZE + offset),
                    handle: account.handle.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Multi-line summary of a removal candidate and its score trend.
pub fn describe_candidate(candidate: &RemovalCandidate) -> String {
    let account = &candidate.account;
    let mut text = format!(
        "@{} ({}) score {} | follows back: {} | lifetime tweets: {}\n",
        account.handle,
        account.display_name,
        score(account),
        if account.follows_back { "yes" } else { "no" },
        account.total_tweets_lifetime,
    );
    for (tag, value) in candidate.history.datapoints() {
        text.push_str(&format!("  week {tag}: {value}\n"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::frens::domain::AccountId;
    use crate::workflows::frens::trend::TrendHistory;

    fn fren(handle: &str) -> Account {
        Account {
            id: AccountId::from(handle),
            display_name: handle.to_uppercase(),
            handle: handle.to_string(),
            total_tweets_lifetime: 50,
            profile_image_url: String::new(),
            follows_back: true,
            following_count: 40,
            followers_count: 80,
            tweets_in_window: 8,
            liked: 2,
            retweeted: 1,
            quoted: 0,
            replied: 0,
        }
    }

    #[test]
    fn pages_hold_at_most_ten_entries_with_global_markers() {
        let highlights: Vec<_> = (0..23).map(|i| fren(&format!("f{i}"))).collect();
        let pages = highlight_pages(&highlights);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].entries.len(), 10);
        assert_eq!(pages[2].entries.len(), 3);
        assert_eq!(pages[0].entries[0].marker, RankMarker::First);
        assert_eq!(pages[0].entries[1].marker, RankMarker::Second);
        assert_eq!(pages[0].entries[2].marker, RankMarker::Third);
        assert_eq!(pages[0].entries[3].marker, RankMarker::Listed);
        assert!(pages[1]
            .entries
            .iter()
            .all(|entry| entry.marker == RankMarker::Listed));
        assert!(pages[1].render().starts_with("Weekly fren highlights (2/3)"));
    }

    #[test]
    fn no_highlights_means_no_pages() {
        assert!(highlight_pages(&[]).is_empty());
    }

    #[test]
    fn view_formats_ratios_to_two_decimals() {
        let view = AccountView::new(1, &fren("ada"));
        assert_eq!(view.ratio, "2.00");
        assert_eq!(view.liked_ratio, "25.00");
        assert_eq!(view.retweeted_ratio, "12.50");
        assert_eq!(view.score, 96);
        assert_eq!(view.url, "https://twitter.com/ada");
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let frens = vec![fren("ada"), fren("bob")];
        let views = ranking_views(&frens);
        let mut buffer = Vec::new();
        write_ranking_csv(&mut buffer, &views).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert!(lines
            .next()
            .expect("header")
            .starts_with("rank,handle,display_name"));
        assert!(lines.next().expect("row").starts_with("1,ada,ADA"));
        assert!(lines.next().expect("row").starts_with("2,bob,BOB"));
    }

    #[test]
    fn candidate_description_lists_trend_oldest_first() {
        let candidate = RemovalCandidate {
            account: fren("ada"),
            history: TrendHistory {
                scores: vec![5, 3],
                tags: vec!["40,2025".to_string(), "41,2025".to_string()],
            },
        };
        let text = describe_candidate(&candidate);
        assert!(text.contains("week 40,2025: 5\n  week 41,2025: 3"));
    }
}

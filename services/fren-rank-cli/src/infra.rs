use chrono::{DateTime, NaiveDate, Utc};
use fren_rank::workflows::frens::{
    Account, ActionError, CollectorError, ExportFileGraph, FrenCollector, GraphCollector,
    HighlightPublisher, RelationshipGateway,
};
use std::path::PathBuf;

/// Collects from a graph export file, read only if a snapshot actually has to
/// be created.
pub(crate) struct ExportCollector {
    pub(crate) path: Option<PathBuf>,
    pub(crate) now: DateTime<Utc>,
}

impl FrenCollector for ExportCollector {
    fn collect(&self) -> Result<Vec<Account>, CollectorError> {
        let path = self.path.as_ref().ok_or(CollectorError::NotConfigured)?;
        let graph = ExportFileGraph::from_path(path)?;
        GraphCollector::new(graph, self.now).collect()
    }
}

/// Prints each announcement page so it can be posted by hand or piped to a
/// posting client.
#[derive(Default)]
pub(crate) struct ConsolePublisher;

impl HighlightPublisher for ConsolePublisher {
    fn publish(&self, text: &str) -> Result<(), ActionError> {
        println!("{text}");
        Ok(())
    }
}

/// Emits one `unfollow <id> @<handle>` line per confirmed removal for the
/// network client to execute.
#[derive(Default)]
pub(crate) struct ConsoleGateway;

impl RelationshipGateway for ConsoleGateway {
    fn unfollow(&self, account: &Account) -> Result<(), ActionError> {
        println!("unfollow {} @{}", account.id, account.handle);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_with_whitespace() {
        assert_eq!(
            parse_date(" 2025-10-16 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 16).expect("valid date"))
        );
        assert!(parse_date("16/10/2025").is_err());
    }

    #[test]
    fn export_collector_without_path_is_not_configured() {
        let collector = ExportCollector {
            path: None,
            now: Utc::now(),
        };
        assert!(matches!(
            collector.collect(),
            Err(CollectorError::NotConfigured)
        ));
    }
}

use crate::cli::GlobalArgs;
use crate::infra::{ConsoleGateway, ConsolePublisher, ExportCollector};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use fren_rank::config::{AppConfig, RankingConfig};
use fren_rank::error::AppError;
use fren_rank::telemetry;
use fren_rank::workflows::frens::{
    highlight_pages, prune_candidates, publish_highlights, rank_by_score, ranking_views,
    select_highlights, select_removal_candidates, write_ranking_csv, AccountView,
    ConfirmationGate, FileSnapshotStore, RemovalCriteria, Snapshot, SnapshotKey, TrendAnalyzer,
};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct ShowArgs {
    /// Also write the ranking as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

/// Everything a subcommand needs, loaded once before any work starts.
pub(crate) struct RunContext {
    ranking: RankingConfig,
    store: FileSnapshotStore,
    key: SnapshotKey,
    today: NaiveDate,
    collector: ExportCollector,
}

impl RunContext {
    pub(crate) fn prepare(args: GlobalArgs) -> Result<Self, AppError> {
        let GlobalArgs {
            data_dir,
            config: config_path,
            export,
            today,
        } = args;

        let mut config = AppConfig::load()?;
        if let Some(data_dir) = data_dir {
            config.storage.data_dir = data_dir;
        }
        if let Some(path) = config_path {
            config.ranking_config_path = path;
        }

        telemetry::init(&config.telemetry)?;

        let ranking = RankingConfig::from_path(&config.ranking_config_path)?;
        let (today, now) = match today {
            Some(date) => {
                let end_of_day = date
                    .and_hms_opt(23, 59, 59)
                    .map(|moment| moment.and_utc())
                    .unwrap_or_else(Utc::now);
                (date, end_of_day)
            }
            None => (Local::now().date_naive(), Utc::now()),
        };

        info!(
            environment = ?config.environment,
            data_dir = %config.storage.data_dir.display(),
            %today,
            "fren ranking run starting"
        );

        Ok(Self {
            ranking,
            store: FileSnapshotStore::new(config.storage.data_dir),
            key: SnapshotKey::from_date(today),
            today,
            collector: ExportCollector { path: export, now },
        })
    }

    fn current_snapshot(&self) -> Result<Snapshot, AppError> {
        Ok(self.store.get_or_create(self.key, &self.collector)?)
    }
}

pub(crate) fn run_show(context: &RunContext, args: ShowArgs) -> Result<(), AppError> {
    let snapshot = context.current_snapshot()?;
    let views = ranking_views(rank_by_score(&snapshot.frens));

    render_ranking(context, &views);

    if let Some(path) = args.csv {
        let file = std::fs::File::create(&path)?;
        write_ranking_csv(BufWriter::new(file), &views)?;
        println!("\nCSV written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_shoutout(context: &RunContext) -> Result<(), AppError> {
    let snapshot = context.current_snapshot()?;
    let highlights = select_highlights(&snapshot.frens, context.ranking.shoutout_count);
    if highlights.is_empty() {
        println!("No mutual follows to highlight for {}.", context.key);
        return Ok(());
    }

    let pages = highlight_pages(&highlights);
    let published = publish_highlights(&pages, &ConsolePublisher)?;
    info!(
        pages = published,
        highlights = highlights.len(),
        "highlight announcement published"
    );
    Ok(())
}

pub(crate) fn run_unfollow(context: &RunContext) -> Result<(), AppError> {
    let snapshot = context.current_snapshot()?;
    let criteria = RemovalCriteria {
        count: context.ranking.unfollow_count,
        min_datapoints: context.ranking.unfollow_datapoints_min,
        max_scanned: context.ranking.unfollow_datapoints_max,
        start: context.key,
    };
    let analyzer = TrendAnalyzer::new(&context.store);
    let candidates = select_removal_candidates(&snapshot.frens, &criteria, &analyzer)?;

    if candidates.is_empty() {
        println!(
            "No removal candidates with at least {} weeks of history.",
            criteria.min_datapoints
        );
        return Ok(());
    }

    println!(
        "{} removal candidates for {}, lowest score first\n",
        candidates.len(),
        context.key
    );

    let stdin = io::stdin();
    let mut gate = ConfirmationGate::new(stdin.lock(), io::stdout());
    let outcome = prune_candidates(&candidates, &mut gate, &ConsoleGateway)?;

    println!(
        "\nUnfollowed {} of {} candidates{}",
        outcome.removed.len(),
        candidates.len(),
        if outcome.cancelled {
            format!(" ({} left untouched)", outcome.skipped.len())
        } else {
            String::new()
        }
    );
    Ok(())
}

fn render_ranking(context: &RunContext, views: &[AccountView]) {
    println!("Fren ranking for {} (as of {})", context.key, context.today);
    if views.is_empty() {
        println!("No frens in this snapshot.");
        return;
    }

    for view in views {
        println!(
            "{:>3}. @{} ({}) score {} | mutual: {} | ratio {} | {} tweets: {}% liked, {}% retweeted, {}% quoted, {}% replied",
            view.rank,
            view.handle,
            view.display_name,
            view.score,
            if view.follows_back { "yes" } else { "no" },
            view.ratio,
            view.tweets,
            view.liked_ratio,
            view.retweeted_ratio,
            view.quoted_ratio,
            view.replied_ratio,
        );
    }
}

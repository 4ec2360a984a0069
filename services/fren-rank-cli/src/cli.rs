use crate::commands::{run_show, run_shoutout, run_unfollow, RunContext, ShowArgs};
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fren_rank::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fren-rank",
    about = "Rank the accounts you follow by engagement, highlight the best, prune the rest",
    version
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print this week's ranking
    Show(ShowArgs),
    /// Publish this week's highlight announcement
    Shoutout,
    /// Walk removal candidates and unfollow the ones you confirm
    Unfollow,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Directory holding weekly snapshots (overrides FREN_DATA_DIR)
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Ranking config file (overrides FREN_CONFIG)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
    /// Social graph export used when this week's snapshot has to be created
    #[arg(long, global = true)]
    pub(crate) export: Option<PathBuf>,
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let context = RunContext::prepare(cli.global)?;
    match command {
        Command::Show(args) => run_show(&context, args),
        Command::Shoutout => run_shoutout(&context),
        Command::Unfollow => run_unfollow(&context),
    }
}

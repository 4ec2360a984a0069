mod cli;
mod commands;
mod infra;

use fren_rank::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

mod cli;
mod infra;
mod routes;
mod server;
mod shell;

use applicant_book::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

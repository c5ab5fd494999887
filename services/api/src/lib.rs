mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use clubhouse::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

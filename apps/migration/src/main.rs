//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and supports `up`, `down`, `status`, `fresh`, `refresh` and `reset`.
//! `run_cli` installs its own tracing subscriber (`-v` for debug output).

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    migration::load_env();

    cli::run_cli(migration::Migrator).await;
}

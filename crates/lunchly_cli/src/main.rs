//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lunchly_core` linkage and print deterministic probe lines.
//! - When a store is configured, list the top ten customers by bookings.

use lunchly_core::db::open_db;
use lunchly_core::{CoreConfig, CustomerRepository, SqliteCustomerRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lunchly_core ping={}", lunchly_core::ping());
    println!("lunchly_core version={}", lunchly_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lunchly_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        lunchly_core::init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path).map_err(|err| format!("store open failed: {err}"))?;
    let repo = SqliteCustomerRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let top = repo.top_ten().map_err(|err| err.to_string())?;

    log::info!("event=cli_top_ten module=cli status=ok rows={}", top.len());
    println!("lunchly_core db={}", config.db_path.display());
    for customer in top {
        let id = customer
            .id()
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!("{id} {}", customer.full_name());
    }
    Ok(())
}

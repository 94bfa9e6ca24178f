//! Command-line front end for the clinic core.
//!
//! # Responsibility
//! - Resolve configuration (file, env, flags) and start logging.
//! - Open the database and hand each command to `ClinicApi`.

mod commands;

use anyhow::Context;
use clap::Parser;
use commands::{Cli, DbTarget, Outcome};
use log::warn;
use petclinic_core::db::{open_db, open_db_in_memory};
use petclinic_core::{init_logging, ClinicConfig};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config =
        ClinicConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(path) = cli.db.clone() {
        config.database.path = Some(path);
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }
    init_logging(&config.logging).context("failed to initialize logging")?;

    let conn = match cli.db_target(config.database.path.as_deref()) {
        DbTarget::File(path) => open_db(&path)
            .with_context(|| format!("failed to open database `{}`", path.display()))?,
        DbTarget::Memory => {
            warn!("event=db_open module=cli status=warn reason=in_memory persisted=false");
            open_db_in_memory().context("failed to open in-memory database")?
        }
    };

    match commands::run(cli.command, &conn)? {
        Outcome::Success(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Failure(err) => {
            let body = serde_json::json!({
                "status": err.status_code(),
                "error": err.to_string(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            Ok(exit_code_for(err.status_code()))
        }
    }
}

/// 4xx maps to exit code 4, everything else to 5.
fn exit_code_for(status: u16) -> ExitCode {
    if (400..500).contains(&status) {
        ExitCode::from(4)
    } else {
        ExitCode::from(5)
    }
}

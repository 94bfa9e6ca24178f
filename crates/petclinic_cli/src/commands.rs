//! Command definitions and dispatch onto `ClinicApi` handlers.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::debug;
use petclinic_core::{
    health_check, ApiError, ApiResult, ClinicApi, CreatePetRequest, CreateVetRequest,
    MakeVisitRequest, PetId, UpdatePetRequest, UpdateVetRequest, VetId,
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Database file used when no flag, env var or config file names one.
pub const DEFAULT_DB_FILE: &str = "petclinic.db";

#[derive(Debug, Parser)]
#[command(name = "petclinic", version, about = "Pet clinic records: pets, vets and visits")]
pub struct Cli {
    /// JSON config file.
    #[arg(long, global = true, env = "PETCLINIC_CONFIG")]
    pub config: Option<PathBuf>,
    /// SQLite database file; overrides config and env.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Use a throwaway in-memory database; nothing outlives the command.
    #[arg(long, global = true, conflicts_with = "db")]
    pub in_memory: bool,
    /// Log level; overrides config and env.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

/// Where the front end keeps its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    File(PathBuf),
    Memory,
}

impl Cli {
    /// `--in-memory` wins, then the configured path, then `DEFAULT_DB_FILE`.
    pub fn db_target(&self, configured: Option<&Path>) -> DbTarget {
        if self.in_memory {
            return DbTarget::Memory;
        }
        DbTarget::File(
            configured
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check database reachability and schema version.
    Health,
    #[command(subcommand)]
    Pets(PetCommand),
    #[command(subcommand)]
    Vets(VetCommand),
    #[command(subcommand)]
    Visits(VisitCommand),
}

#[derive(Debug, Subcommand)]
pub enum PetCommand {
    List,
    Get {
        id: PetId,
    },
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<i32>,
        #[arg(long)]
        species: Option<String>,
    },
    Update {
        id: PetId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<i32>,
        #[arg(long)]
        species: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum VetCommand {
    List,
    Get {
        id: VetId,
    },
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
    Update {
        id: VetId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum VisitCommand {
    /// Record a visit of pet `pet_id` to vet `vet_id`.
    Make {
        pet_id: PetId,
        vet_id: VetId,
        /// Visit date as YYYY-MM-DD.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List visits of one pet.
    List { pet_id: PetId },
}

/// Result of one command: a JSON body or a handler error.
pub enum Outcome {
    Success(Value),
    Failure(ApiError),
}

fn respond<T: Serialize>(result: ApiResult<T>) -> serde_json::Result<Outcome> {
    match result {
        Ok(body) => Ok(Outcome::Success(serde_json::to_value(body)?)),
        Err(err) => {
            debug!(
                "event=cli_command module=cli status=rejected status_code={}",
                err.status_code()
            );
            Ok(Outcome::Failure(err))
        }
    }
}

pub fn run(command: Command, conn: &Connection) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Command::Health => health(conn)?,
        Command::Pets(command) => run_pet(&clinic_api(conn)?, command)?,
        Command::Vets(command) => run_vet(&clinic_api(conn)?, command)?,
        Command::Visits(command) => run_visit(&clinic_api(conn)?, command)?,
    };
    Ok(outcome)
}

fn clinic_api(conn: &Connection) -> anyhow::Result<ClinicApi<'_>> {
    ClinicApi::try_new(conn).context("database is not ready")
}

fn health(conn: &Connection) -> anyhow::Result<Outcome> {
    let report = health_check(conn).context("health check failed")?;
    Ok(Outcome::Success(serde_json::json!({
        "healthy": report.is_healthy(),
        "schemaVersion": report.schema_version,
        "latestSupported": report.latest_supported,
        "version": petclinic_core::core_version(),
    })))
}

fn run_pet(api: &ClinicApi<'_>, command: PetCommand) -> serde_json::Result<Outcome> {
    match command {
        PetCommand::List => respond(api.get_all_pets()),
        PetCommand::Get { id } => respond(api.get_pet(id)),
        PetCommand::Create { name, age, species } => {
            respond(api.create_pet(CreatePetRequest { name, age, species }))
        }
        PetCommand::Update {
            id,
            name,
            age,
            species,
        } => respond(api.update_pet(id, UpdatePetRequest { name, age, species })),
    }
}

fn run_vet(api: &ClinicApi<'_>, command: VetCommand) -> serde_json::Result<Outcome> {
    match command {
        VetCommand::List => respond(api.get_all_vets()),
        VetCommand::Get { id } => respond(api.get_vet(id)),
        VetCommand::Create { name, specialty } => {
            respond(api.create_vet(CreateVetRequest { name, specialty }))
        }
        VetCommand::Update {
            id,
            name,
            specialty,
        } => respond(api.update_vet(id, UpdateVetRequest { name, specialty })),
    }
}

fn run_visit(api: &ClinicApi<'_>, command: VisitCommand) -> serde_json::Result<Outcome> {
    match command {
        VisitCommand::Make {
            pet_id,
            vet_id,
            date,
            description,
        } => respond(api.make_visit(pet_id, vet_id, MakeVisitRequest { date, description })),
        VisitCommand::List { pet_id } => respond(api.get_pet_visits(pet_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, Command, DbTarget, Outcome, PetCommand, DEFAULT_DB_FILE};
    use clap::Parser;
    use petclinic_core::db::open_db_in_memory;
    use std::path::{Path, PathBuf};

    #[test]
    fn db_target_defaults_to_file_and_honors_in_memory() {
        let cli = Cli::parse_from(["petclinic", "pets", "list"]);
        assert_eq!(
            cli.db_target(None),
            DbTarget::File(PathBuf::from(DEFAULT_DB_FILE))
        );
        assert_eq!(
            cli.db_target(Some(Path::new("/srv/clinic.db"))),
            DbTarget::File(PathBuf::from("/srv/clinic.db"))
        );

        let cli = Cli::parse_from(["petclinic", "--in-memory", "pets", "list"]);
        assert_eq!(
            cli.db_target(Some(Path::new("/srv/clinic.db"))),
            DbTarget::Memory
        );
        let conflicting =
            Cli::try_parse_from(["petclinic", "--in-memory", "--db", "x.db", "health"]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn parses_pet_create_with_negative_age() {
        let cli = Cli::parse_from([
            "petclinic", "pets", "create", "--name", "Sofi", "--age", "-1", "--species", "CAT",
        ]);
        assert!(matches!(
            cli.command,
            Command::Pets(PetCommand::Create { age: Some(-1), .. })
        ));
    }

    #[test]
    fn duplicate_pet_command_reports_conflict() {
        let conn = open_db_in_memory().unwrap();
        let create = || {
            Cli::parse_from([
                "petclinic", "pets", "create", "--name", "Sofi", "--age", "2", "--species", "cat",
            ])
            .command
        };

        assert!(matches!(run(create(), &conn).unwrap(), Outcome::Success(_)));
        match run(create(), &conn).unwrap() {
            Outcome::Failure(err) => assert_eq!(err.status_code(), 409),
            Outcome::Success(body) => panic!("expected conflict, got {body}"),
        }
    }

    #[test]
    fn health_reports_current_schema() {
        let conn = open_db_in_memory().unwrap();
        match run(Command::Health, &conn).unwrap() {
            Outcome::Success(body) => assert_eq!(body["healthy"], true),
            Outcome::Failure(err) => panic!("unexpected failure: {err}"),
        }
    }
}

use crate::db::schema::USERS_TABLE_DDL;
use crate::db::store::UserStore;
use crate::service::credits::{CreditService, DEFAULT_DEDUCTION, DEFAULT_REQUIRED};
use crate::types::outcome::Outcome;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Parser)]
#[command(name = "supa-credits", version, about = "Inspect and adjust user credit balances")]
pub struct Cli {
    /// Authenticate with the public anon key instead of the service-role key.
    #[arg(long, global = true)]
    pub anon: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the balance for a user.
    Get { email: String },
    /// Deduct credits from a user.
    Deduct {
        email: String,
        #[arg(short, long, default_value_t = DEFAULT_DEDUCTION)]
        amount: i64,
    },
    /// Check whether a user holds enough credits.
    Has {
        email: String,
        #[arg(short, long, default_value_t = DEFAULT_REQUIRED)]
        required: i64,
    },
    /// Grant development credits, creating the user if needed.
    Grant { email: String, amount: i64 },
    /// Print the SQL that provisions the users table.
    Schema,
}

/// What a command prints and whether it counts as success.
#[derive(Debug)]
pub struct Report {
    pub body: Value,
    pub success: bool,
}

impl Report {
    fn from_outcome<T: Serialize>(outcome: Outcome<T>) -> Result<Self, serde_json::Error> {
        let success = outcome.success;
        Ok(Self {
            body: serde_json::to_value(&outcome)?,
            success,
        })
    }
}

pub async fn run<S: UserStore>(
    command: &Command,
    service: &CreditService<S>,
) -> Result<Report, serde_json::Error> {
    match command {
        Command::Get { email } => {
            Report::from_outcome(Outcome::from(service.get_user_credits(email).await))
        }
        Command::Deduct { email, amount } => {
            Report::from_outcome(Outcome::from(service.deduct_credits(email, *amount).await))
        }
        Command::Has { email, required } => {
            let has = service.has_credits(email, *required).await;
            Ok(Report {
                body: json!({ "hasCredits": has }),
                success: true,
            })
        }
        Command::Grant { email, amount } => {
            Report::from_outcome(Outcome::from(service.add_test_credits(email, *amount).await))
        }
        Command::Schema => Ok(schema_report()),
    }
}

pub fn schema_report() -> Report {
    Report {
        body: Value::String(USERS_TABLE_DDL.trim().to_string()),
        success: true,
    }
}

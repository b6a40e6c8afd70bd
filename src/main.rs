use clap::Parser;
use mimalloc::MiMalloc;
use serde_json::Value;
use std::process::ExitCode;
use supa_credits::cli::{self, Cli, Command};
use supa_credits::{ClientRole, Config, CreditService, SupabaseClient};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    let role = if args.anon {
        ClientRole::Anon
    } else {
        ClientRole::ServiceRole
    };

    // Printing the DDL needs no credentials.
    let report = if let Command::Schema = args.command {
        cli::schema_report()
    } else {
        info!(
            supabase_url = %cfg.supabase_url,
            table = %cfg.users_table,
            role = ?role,
            "connecting"
        );
        let client = SupabaseClient::new(&cfg, role)?;
        let service = CreditService::with_client(client, &cfg)?;
        cli::run(&args.command, &service).await?
    };

    match &report.body {
        Value::String(text) => println!("{text}"),
        body => println!("{}", serde_json::to_string_pretty(body)?),
    }

    if report.success {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("command failed");
        Ok(ExitCode::FAILURE)
    }
}

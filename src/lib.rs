pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;

pub use config::Config;
pub use db::{ClientRole, PostgrestUserStore, SupabaseClient, User, UserStore};
pub use error::CreditsError;
pub use service::CreditService;
pub use types::Outcome;

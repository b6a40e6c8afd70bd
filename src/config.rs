//! Connection settings for the hosted database.
//!
//! Sources, lowest to highest priority:
//! - built-in defaults (local Supabase stack)
//! - `credits.toml`, or the file named by `CREDITS_CONFIG`
//! - `CREDITS_*` environment variables
//! - `NEXT_PUBLIC_SUPABASE_URL` and `NEXT_PUBLIC_SUPABASE_ANON_KEY`
//! - `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `SUPABASE_SERVICE_ROLE_KEY`

use crate::error::CreditsError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "credits.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub supabase_url: Url,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default)]
    pub service_role_key: String,
    pub users_table: String,
    pub loglevel: String,
    #[serde(default)]
    pub proxy: Option<Url>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: Url::parse("http://localhost:54321").expect("static default URL"),
            anon_key: String::new(),
            service_role_key: String::new(),
            users_table: "users".to_string(),
            loglevel: "info".to_string(),
            proxy: None,
            request_timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Layered figment used by [`Config::load`].
    pub fn figment() -> Figment {
        let file = std::env::var("CREDITS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("CREDITS_").ignore(&["config"]))
            .merge(Env::raw().filter_map(public_supabase_env_key))
            .merge(Env::raw().filter_map(supabase_env_key))
    }

    pub fn load() -> Result<Self, CreditsError> {
        Ok(Self::figment().extract()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn public_supabase_env_key(key: &UncasedStr) -> Option<Uncased<'_>> {
    let mapped = match key.as_str().to_ascii_uppercase().as_str() {
        "NEXT_PUBLIC_SUPABASE_URL" => "supabase_url",
        "NEXT_PUBLIC_SUPABASE_ANON_KEY" => "anon_key",
        _ => return None,
    };
    Some(mapped.into())
}

/// Server-side names; merged after the `NEXT_PUBLIC_` forms so they win.
fn supabase_env_key(key: &UncasedStr) -> Option<Uncased<'_>> {
    let mapped = match key.as_str().to_ascii_uppercase().as_str() {
        "SUPABASE_URL" => "supabase_url",
        "SUPABASE_ANON_KEY" => "anon_key",
        "SUPABASE_SERVICE_ROLE_KEY" => "service_role_key",
        _ => return None,
    };
    Some(mapped.into())
}

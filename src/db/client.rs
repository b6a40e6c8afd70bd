use crate::config::Config;
use crate::error::CreditsError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

const X_CLIENT_INFO: &str = "x-client-info";

/// Which API key a client authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    /// Public key, subject to row level security.
    Anon,
    /// Privileged key for server-side work; bypasses row level security.
    ServiceRole,
}

impl ClientRole {
    fn key<'a>(&self, cfg: &'a Config) -> Result<&'a str, CreditsError> {
        let (key, name) = match self {
            ClientRole::Anon => (cfg.anon_key.as_str(), "anon_key"),
            ClientRole::ServiceRole => (cfg.service_role_key.as_str(), "service_role_key"),
        };
        if key.trim().is_empty() {
            return Err(CreditsError::MissingKey(name));
        }
        Ok(key)
    }
}

/// REST client bound to one project and one key tier.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: Url,
    role: ClientRole,
}

impl SupabaseClient {
    pub fn new(cfg: &Config, role: ClientRole) -> Result<Self, CreditsError> {
        let key = role.key(cfg)?;

        let mut headers = HeaderMap::new();
        let mut apikey = HeaderValue::from_str(key)?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            X_CLIENT_INFO,
            HeaderValue::from_static(concat!("supa-credits/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout());
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let http = builder.build()?;

        let rest_url = rest_base(&cfg.supabase_url)?;
        debug!(rest_url = %rest_url, role = ?role, "REST client initialised");
        Ok(Self {
            http,
            rest_url,
            role,
        })
    }

    /// Client for browser-equivalent contexts.
    pub fn anon(cfg: &Config) -> Result<Self, CreditsError> {
        Self::new(cfg, ClientRole::Anon)
    }

    /// Client for server-side operations.
    pub fn service_role(cfg: &Config) -> Result<Self, CreditsError> {
        Self::new(cfg, ClientRole::ServiceRole)
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn role(&self) -> ClientRole {
        self.role
    }

    /// Endpoint for a table, e.g. `<project>/rest/v1/users`.
    pub fn table_url(&self, table: &str) -> Result<Url, CreditsError> {
        Ok(self.rest_url.join(table)?)
    }
}

fn rest_base(project_url: &Url) -> Result<Url, CreditsError> {
    let mut base = project_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("rest/v1/")?)
}

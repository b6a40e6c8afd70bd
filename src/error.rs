use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error as ThisError;

/// PostgREST code returned when a single-object request matched zero (or
/// more than one) rows.
pub const PGRST_NO_ROWS: &str = "PGRST116";

#[derive(Debug, ThisError)]
pub enum CreditsError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Missing {0}; set it in the environment or credits.toml")]
    MissingKey(&'static str),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("{}", .0.message)]
    Postgrest(PostgrestError),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient credits")]
    InsufficientCredits { current: i64 },

    #[error("Invalid credit amount: {0}")]
    InvalidAmount(i64),
}

impl CreditsError {
    /// Balance reported alongside an insufficient-credits failure.
    pub fn current_credits(&self) -> Option<i64> {
        match self {
            CreditsError::InsufficientCredits { current } => Some(*current),
            _ => None,
        }
    }

    pub fn is_no_rows(&self) -> bool {
        matches!(self, CreditsError::Postgrest(e) if e.is_no_rows())
    }
}

/// Error body returned by PostgREST on non-2xx responses.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PostgrestError {
    /// Absent on bodies produced by the API gateway rather than PostgREST.
    #[serde(default)]
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    pub fn is_no_rows(&self) -> bool {
        self.code == PGRST_NO_ROWS
    }
}

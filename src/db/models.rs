use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a `users` row. Tables keyed by bigint and by uuid both
/// show up in Supabase projects, so either form is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Int(id) => write!(f, "{id}"),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub credits: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a user that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub credits: i64,
}

/// Patch payload written by every credit change.
#[derive(Debug, Clone, Serialize)]
pub struct CreditsUpdate {
    pub credits: i64,
    pub updated_at: DateTime<Utc>,
}

/// Lookup key normalisation shared by every read and insert.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

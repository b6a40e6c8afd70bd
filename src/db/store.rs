use crate::db::client::SupabaseClient;
use crate::db::models::{CreditsUpdate, NewUser, User, UserId};
use crate::error::{CreditsError, PostgrestError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Columns read back on lookups.
pub const USER_COLUMNS: &str = "id,email,credits,updated_at";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Remote `users` table as seen by the credit operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact match on an already-normalised email. `Ok(None)` when no row matched.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CreditsError>;

    /// Write a new balance and timestamp; returns the stored row if the store echoed it.
    async fn set_credits(
        &self,
        id: &UserId,
        credits: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, CreditsError>;

    async fn insert(&self, user: NewUser) -> Result<Option<User>, CreditsError>;
}

/// `UserStore` over the PostgREST endpoint of a Supabase project.
#[derive(Clone)]
pub struct PostgrestUserStore {
    client: SupabaseClient,
    table_url: Url,
}

impl PostgrestUserStore {
    pub fn new(client: SupabaseClient, table: &str) -> Result<Self, CreditsError> {
        let table_url = client.table_url(table)?;
        Ok(Self { client, table_url })
    }

    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }
}

#[async_trait]
impl UserStore for PostgrestUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CreditsError> {
        let filter = format!("eq.{email}");
        let resp = self
            .client
            .http()
            .get(self.table_url.clone())
            .query(&[("select", USER_COLUMNS), ("email", filter.as_str())])
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        match decode::<User>(resp).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_no_rows() => {
                debug!(email, "no user row matched");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn set_credits(
        &self,
        id: &UserId,
        credits: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, CreditsError> {
        let filter = format!("eq.{id}");
        let resp = self
            .client
            .http()
            .patch(self.table_url.clone())
            .query(&[("id", filter.as_str())])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&CreditsUpdate {
                credits,
                updated_at,
            })
            .send()
            .await?;

        let rows: Vec<User> = decode(resp).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, user: NewUser) -> Result<Option<User>, CreditsError> {
        let resp = self
            .client
            .http()
            .post(self.table_url.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&user)
            .send()
            .await?;

        let rows: Vec<User> = decode(resp).await?;
        Ok(rows.into_iter().next())
    }
}

/// Decode a 2xx body as `T`, anything else as a PostgREST error body.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, CreditsError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }
    match serde_json::from_slice::<PostgrestError>(&body) {
        Ok(err) => {
            debug!(%status, code = %err.code, "PostgREST returned an error body");
            Err(CreditsError::Postgrest(err))
        }
        Err(_) => Err(CreditsError::UpstreamStatus(status)),
    }
}

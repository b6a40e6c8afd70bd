use crate::config::Config;
use crate::db::client::SupabaseClient;
use crate::db::models::{NewUser, normalize_email};
use crate::db::store::{PostgrestUserStore, UserStore};
use crate::error::CreditsError;
use crate::types::credits::{Deduction, GrantAction, TestCreditGrant, UserCredits};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Amount taken by a single unit of usage.
pub const DEFAULT_DEDUCTION: i64 = 1;
/// Balance needed to use the service once.
pub const DEFAULT_REQUIRED: i64 = 1;

/// Credit operations over a [`UserStore`].
///
/// Each call is one or two sequential round trips. Deduction reads then
/// writes, so concurrent deductions for the same user can both succeed
/// against the same starting balance.
pub struct CreditService<S> {
    store: S,
}

impl CreditService<PostgrestUserStore> {
    /// Service backed by the project's `users` table using the service-role key.
    pub fn from_config(cfg: &Config) -> Result<Self, CreditsError> {
        let client = SupabaseClient::service_role(cfg)?;
        Self::with_client(client, cfg)
    }

    pub fn with_client(client: SupabaseClient, cfg: &Config) -> Result<Self, CreditsError> {
        let store = PostgrestUserStore::new(client, &cfg.users_table)?;
        Ok(Self::new(store))
    }
}

impl<S: UserStore> CreditService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Balance for `email`; a missing user reads as zero credits.
    pub async fn get_user_credits(&self, email: &str) -> Result<UserCredits, CreditsError> {
        let email = normalize_email(email);
        let user = self.store.find_by_email(&email).await.inspect_err(|e| {
            warn!(email = %email, error = %e, "credit lookup failed");
        })?;
        let credits = user.as_ref().map_or(0, |u| u.credits);
        debug!(email = %email, credits, found = user.is_some(), "credit lookup");
        Ok(UserCredits { user, credits })
    }

    /// Take `amount` credits from an existing user.
    pub async fn deduct_credits(&self, email: &str, amount: i64) -> Result<Deduction, CreditsError> {
        ensure_non_negative(amount)?;
        let user = self
            .get_user_credits(email)
            .await?
            .user
            .ok_or(CreditsError::UserNotFound)?;

        let current = user.credits;
        if current < amount {
            info!(email = %user.email, current, amount, "deduction refused: insufficient credits");
            return Err(CreditsError::InsufficientCredits { current });
        }

        let new_credits = current - amount;
        let stored = self
            .store
            .set_credits(&user.id, new_credits, Utc::now())
            .await
            .inspect_err(|e| {
                warn!(email = %user.email, error = %e, "failed to persist deduction");
            })?;
        info!(
            email = %user.email,
            previous = current,
            new = new_credits,
            "credits deducted"
        );

        Ok(Deduction {
            previous_credits: current,
            new_credits,
            deducted: amount,
            user: stored,
        })
    }

    /// Whether `email` holds at least `required` credits. Lookup failures read as `false`.
    pub async fn has_credits(&self, email: &str, required: i64) -> bool {
        self.get_user_credits(email)
            .await
            .is_ok_and(|found| found.credits >= required)
    }

    /// Development helper: add `amount` to an existing balance, or create the
    /// user with `amount` as its opening balance.
    pub async fn add_test_credits(
        &self,
        email: &str,
        amount: i64,
    ) -> Result<TestCreditGrant, CreditsError> {
        ensure_non_negative(amount)?;
        let email = normalize_email(email);

        let grant = match self.store.find_by_email(&email).await? {
            Some(existing) => {
                let new_credits = existing
                    .credits
                    .checked_add(amount)
                    .ok_or(CreditsError::InvalidAmount(amount))?;
                let stored = self
                    .store
                    .set_credits(&existing.id, new_credits, Utc::now())
                    .await?;
                TestCreditGrant {
                    action: GrantAction::Updated,
                    previous_credits: Some(existing.credits),
                    new_credits,
                    added: amount,
                    user: stored,
                }
            }
            None => {
                let stored = self
                    .store
                    .insert(NewUser {
                        email: email.clone(),
                        credits: amount,
                    })
                    .await?;
                TestCreditGrant {
                    action: GrantAction::Created,
                    previous_credits: None,
                    new_credits: amount,
                    added: amount,
                    user: stored,
                }
            }
        };

        info!(email = %email, action = ?grant.action, credits = grant.new_credits, "test credits granted");
        Ok(grant)
    }
}

fn ensure_non_negative(amount: i64) -> Result<(), CreditsError> {
    if amount < 0 {
        return Err(CreditsError::InvalidAmount(amount));
    }
    Ok(())
}

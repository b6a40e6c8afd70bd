use crate::db::models::User;
use serde::Serialize;

/// Result of a balance lookup. Unknown users read as zero credits.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserCredits {
    pub user: Option<User>,
    pub credits: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deduction {
    pub previous_credits: i64,
    pub new_credits: i64,
    pub deducted: i64,
    pub user: Option<User>,
}

/// Which branch of the test-credit upsert ran.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrantAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestCreditGrant {
    pub action: GrantAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_credits: Option<i64>,
    pub new_credits: i64,
    pub added: i64,
    pub user: Option<User>,
}

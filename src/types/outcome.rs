use crate::error::CreditsError;
use serde::Serialize;

/// Tagged success/failure object for callers that want a plain JSON shape
/// instead of a `Result`.
///
/// Success flattens the payload next to `"success": true`; failure carries the
/// error's display message and, for insufficient balances, `currentCredits`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_credits: Option<i64>,
}

impl<T> Outcome<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            current_credits: None,
        }
    }

    pub fn failed(err: &CreditsError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
            current_credits: err.current_credits(),
        }
    }
}

impl<T> From<Result<T, CreditsError>> for Outcome<T> {
    fn from(result: Result<T, CreditsError>) -> Self {
        match result {
            Ok(data) => Outcome::ok(data),
            Err(e) => Outcome::failed(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::credits::Deduction;
    use serde_json::json;

    #[test]
    fn success_flattens_payload() {
        let outcome: Outcome<Deduction> = Ok(Deduction {
            previous_credits: 5,
            new_credits: 2,
            deducted: 3,
            user: None,
        })
        .into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "success": true,
                "previousCredits": 5,
                "newCredits": 2,
                "deducted": 3,
                "user": null
            })
        );
    }

    #[test]
    fn insufficient_credits_reports_balance() {
        let outcome: Outcome<Deduction> = Err(CreditsError::InsufficientCredits { current: 1 }).into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "success": false,
                "error": "Insufficient credits",
                "currentCredits": 1
            })
        );
    }

    #[test]
    fn other_failures_carry_only_the_message() {
        let outcome: Outcome<Deduction> = Err(CreditsError::UserNotFound).into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "success": false, "error": "User not found" })
        );
    }
}

pub mod credits;
pub mod outcome;

pub use credits::{Deduction, GrantAction, TestCreditGrant, UserCredits};
pub use outcome::Outcome;

pub mod credits;

pub use credits::{CreditService, DEFAULT_DEDUCTION, DEFAULT_REQUIRED};

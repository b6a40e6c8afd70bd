//! Database module: the hosted `users` table and the clients that reach it.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring `users` rows and write payloads
//! - `schema.rs`: SQL DDL for provisioning the table (Postgres)
//! - `client.rs`: REST client setup for the anon and service-role key tiers
//! - `store.rs`: the `UserStore` seam and its PostgREST implementation

pub mod client;
pub mod models;
pub mod schema;
pub mod store;

pub use client::{ClientRole, SupabaseClient};
pub use models::{NewUser, User, UserId};
pub use schema::USERS_TABLE_DDL;
pub use store::{PostgrestUserStore, UserStore};

//! SQL DDL for provisioning the credit-bearing `users` table.

/// Postgres schema with:
/// - `id` UUID primary key generated server-side
/// - `email` UNIQUE, always written lowercase by this crate
/// - `credits` INTEGER, non-negative, defaulting to 0
/// - `updated_at` refreshed by every credit write
pub const USERS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS public.users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email TEXT NOT NULL UNIQUE,
    credits INTEGER NOT NULL DEFAULT 0 CHECK (credits >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

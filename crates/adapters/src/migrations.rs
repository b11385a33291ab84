//! Shape of the `properties` table as the listing site maintains it.
//!
//! The auditor only ever reads this table; the statements here exist so test
//! fixtures are built against the same columns the queries expect.

pub const MIGRATIONS: &[&str] = &[r#"
CREATE TABLE IF NOT EXISTS properties (
    id TEXT PRIMARY KEY NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    images TEXT,
    featured INTEGER NOT NULL DEFAULT 0,
    active INTEGER NOT NULL DEFAULT 1
);
"#];

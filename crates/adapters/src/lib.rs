pub mod fs;
pub mod migrations;
pub mod presenters;
pub mod sqlite;

pub use fs::load_migration_snapshot;
pub use presenters::present_coverage_report;
pub use sqlite::{resolve_database_path, SqlitePropertyRepository};

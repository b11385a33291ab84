mod snapshot;

pub use snapshot::load_migration_snapshot;

mod queries;

use std::path::PathBuf;

use listing_audit_application::{ApplicationError, PropertyRepository};
use listing_audit_domain::{PropertyId, PropertyRecord};
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use queries::PropertyRow;

/// Turns a connection string into a database file path.
///
/// Accepts plain paths as well as the `file:` URLs the listing site keeps in
/// `DATABASE_URL`.
pub fn resolve_database_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("file:"))
        .unwrap_or(trimmed);
    let without_query = without_scheme
        .split_once('?')
        .map_or(without_scheme, |(path, _)| path);
    PathBuf::from(without_query)
}

/// Read-only handle on the listing database.
///
/// The connection is opened by [`SqlitePropertyRepository::connect`] and
/// closed by [`SqlitePropertyRepository::close`], or on drop if the caller
/// never gets that far.
#[derive(Debug)]
pub struct SqlitePropertyRepository {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqlitePropertyRepository {
    pub fn connect(path: impl Into<PathBuf>) -> Result<Self, ApplicationError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "database path must not be empty".to_string(),
            ));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|error| {
            ApplicationError::DataAccess(format!(
                "failed to open {}: {error}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "opened listing database");

        Ok(Self {
            path,
            conn: Some(conn),
        })
    }

    /// Closes the connection and reports whether SQLite released it cleanly.
    pub fn close(mut self) -> Result<(), ApplicationError> {
        self.release()
    }

    fn connection(&self) -> Result<&Connection, ApplicationError> {
        self.conn
            .as_ref()
            .ok_or_else(|| ApplicationError::DataAccess("connection already closed".to_string()))
    }

    fn release(&mut self) -> Result<(), ApplicationError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        conn.close().map_err(|(_, error)| {
            ApplicationError::DataAccess(format!(
                "failed to close {}: {error}",
                self.path.display()
            ))
        })?;
        debug!(path = %self.path.display(), "released listing database");
        Ok(())
    }
}

impl Drop for SqlitePropertyRepository {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            warn!(%error, "listing database was not released cleanly");
        }
    }
}

impl PropertyRepository for SqlitePropertyRepository {
    fn fetch_active_properties(&self) -> Result<Vec<PropertyRecord>, ApplicationError> {
        let rows = queries::fetch_active_properties(self.connection()?).map_err(|error| {
            ApplicationError::DataAccess(format!("failed to fetch active properties: {error}"))
        })?;

        rows.into_iter().map(into_record).collect()
    }
}

fn into_record(row: PropertyRow) -> Result<PropertyRecord, ApplicationError> {
    let id = PropertyId::new(row.id).map_err(|error| {
        ApplicationError::DataAccess(format!(
            "property {:?} has an unusable id: {error}",
            row.slug
        ))
    })?;
    Ok(PropertyRecord {
        id,
        slug: row.slug,
        title: row.title,
        images: row.images,
        featured: row.featured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::MIGRATIONS;
    use listing_audit_domain::{DomainError, ImageCoverage, MalformedImagePolicy};
    use rusqlite::params;
    use tempfile::TempDir;

    fn create_db(dir: &TempDir) -> PathBuf {
        let db_path = dir.path().join("listings.sqlite3");
        let conn = Connection::open(&db_path).expect("open");
        for migration in MIGRATIONS {
            conn.execute_batch(migration).expect("migrate");
        }
        conn.execute(
            "INSERT INTO properties (id, slug, title, images, featured, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params!["clx1", "harbour-loft", "Harbour Loft", r#"["a.jpg"]"#, true, true],
        )
        .expect("insert");
        conn.execute(
            "INSERT INTO properties (id, slug, title, images, featured, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params!["clx2", "hidden-cabin", "Hidden Cabin", Option::<String>::None, false, false],
        )
        .expect("insert");
        db_path
    }

    #[test]
    fn connect_and_fetch_active_properties() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = create_db(&dir);

        let repo = SqlitePropertyRepository::connect(&db_path).expect("connect");

        let records = repo.fetch_active_properties().expect("fetch");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "clx1");
        assert_eq!(records[0].slug, "harbour-loft");
        assert!(records[0].featured);

        repo.close().expect("close");
    }

    #[test]
    fn fetch_after_release_is_a_data_access_error() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = create_db(&dir);

        let mut repo = SqlitePropertyRepository::connect(&db_path).expect("connect");
        repo.release().expect("release");
        repo.release().expect("second release is a no-op");

        assert!(repo.conn.is_none());
        assert!(matches!(
            repo.fetch_active_properties(),
            Err(ApplicationError::DataAccess(_))
        ));
    }

    #[test]
    fn unreadable_image_column_is_counted_as_malformed() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = create_db(&dir);
        Connection::open(&db_path)
            .expect("open")
            .execute_batch(
                "INSERT INTO properties (id, slug, title, images, featured, active)
                 VALUES ('clx3', 'garbled-flat', 'Garbled Flat', CAST(x'fffe5b' AS TEXT), 0, 1);",
            )
            .expect("insert");

        let repo = SqlitePropertyRepository::connect(&db_path).expect("connect");
        let records = repo.fetch_active_properties().expect("fetch");
        assert_eq!(records.len(), 2);

        let coverage = ImageCoverage::classify(records, MalformedImagePolicy::Skip)
            .expect("classify");
        assert_eq!(coverage.with_images.len(), 1);
        assert_eq!(coverage.malformed().count(), 1);

        let records = repo.fetch_active_properties().expect("fetch");
        assert!(matches!(
            ImageCoverage::classify(records, MalformedImagePolicy::FailFast),
            Err(DomainError::MalformedImageData { property_id, .. }) if property_id == "clx3"
        ));
    }

    #[test]
    fn connection_is_read_only() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = create_db(&dir);

        let repo = SqlitePropertyRepository::connect(&db_path).expect("connect");
        let result = repo
            .connection()
            .expect("open connection")
            .execute("DELETE FROM properties", []);
        assert!(result.is_err());
    }

    #[test]
    fn missing_database_is_a_data_access_error() {
        let dir = TempDir::new().expect("tempdir");
        let result = SqlitePropertyRepository::connect(dir.path().join("absent.sqlite3"));
        assert!(matches!(result, Err(ApplicationError::DataAccess(_))));
    }

    #[test]
    fn missing_table_is_a_data_access_error() {
        let dir = TempDir::new().expect("tempdir");
        let db_path = dir.path().join("empty.sqlite3");
        Connection::open(&db_path)
            .expect("open")
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .expect("create");

        let repo = SqlitePropertyRepository::connect(&db_path).expect("connect");
        assert!(matches!(
            repo.fetch_active_properties(),
            Err(ApplicationError::DataAccess(_))
        ));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(
            SqlitePropertyRepository::connect(""),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[test]
    fn database_urls_resolve_to_paths() {
        assert_eq!(
            resolve_database_path("file:./prisma/dev.db"),
            PathBuf::from("./prisma/dev.db")
        );
        assert_eq!(
            resolve_database_path("sqlite:///var/lib/listings.db?mode=ro"),
            PathBuf::from("/var/lib/listings.db")
        );
        assert_eq!(
            resolve_database_path(" listings.sqlite3 "),
            PathBuf::from("listings.sqlite3")
        );
    }
}

use listing_audit_domain::ImagePayload;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Result, Row};

/// A `properties` row before its id has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub images: ImagePayload,
    pub featured: bool,
}

pub fn fetch_active_properties(conn: &Connection) -> Result<Vec<PropertyRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, slug, title, images, featured
         FROM properties
         WHERE active = 1
         ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PropertyRow {
            id: read_id(row, 0)?,
            slug: row.get(1)?,
            title: row.get(2)?,
            images: read_images(row, 3)?,
            featured: row.get(4)?,
        })
    })?;

    rows.collect()
}

// Ids are opaque: text keys from the web app, integer keys from older dumps.
fn read_id(row: &Row<'_>, index: usize) -> Result<String> {
    match row.get_ref(index)? {
        ValueRef::Integer(value) => Ok(value.to_string()),
        _ => row.get(index),
    }
}

// A bad payload belongs to one listing; it must not fail the whole fetch.
fn read_images(row: &Row<'_>, index: usize) -> Result<ImagePayload> {
    let payload = match row.get_ref(index)? {
        ValueRef::Null => ImagePayload::Absent,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => ImagePayload::Text(text.to_string()),
            Err(error) => ImagePayload::Unreadable(error.to_string()),
        },
        ValueRef::Integer(value) => ImagePayload::Text(value.to_string()),
        ValueRef::Real(value) => ImagePayload::Text(value.to_string()),
    };
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::MIGRATIONS;
    use rusqlite::params;

    fn setup_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory sqlite should open");
        for migration in MIGRATIONS {
            conn.execute_batch(migration)
                .expect("schema should be created");
        }
        conn
    }

    fn insert(conn: &Connection, id: &str, images: Option<&str>, featured: bool, active: bool) {
        conn.execute(
            "INSERT INTO properties (id, slug, title, images, featured, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                format!("slug-{id}"),
                format!("Property {id}"),
                images,
                featured,
                active
            ],
        )
        .expect("row insert should succeed");
    }

    #[test]
    fn fetch_returns_only_active_rows_in_insertion_order() {
        let conn = setup_conn();
        insert(&conn, "c", Some(r#"["1.jpg"]"#), true, true);
        insert(&conn, "a", None, false, false);
        insert(&conn, "b", None, false, true);

        let rows = fetch_active_properties(&conn).expect("query should succeed");
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();

        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(rows[0].images, ImagePayload::Text(r#"["1.jpg"]"#.to_string()));
        assert!(rows[0].featured);
        assert_eq!(rows[1].images, ImagePayload::Absent);
        assert!(!rows[1].featured);
    }

    #[test]
    fn integer_ids_are_read_as_text() {
        let conn = Connection::open_in_memory().expect("in-memory sqlite should open");
        conn.execute_batch(
            "CREATE TABLE properties (
                id INTEGER PRIMARY KEY,
                slug TEXT NOT NULL,
                title TEXT NOT NULL,
                images TEXT,
                featured INTEGER NOT NULL,
                active INTEGER NOT NULL
            );
            INSERT INTO properties VALUES (42, 'old-mill', 'Old Mill', '[]', 0, 1);",
        )
        .expect("legacy schema should be created");

        let rows = fetch_active_properties(&conn).expect("query should succeed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "42");
    }

    #[test]
    fn undecodable_image_column_does_not_fail_the_fetch() {
        let conn = setup_conn();
        insert(&conn, "good", Some(r#"["a.jpg"]"#), false, true);
        conn.execute_batch(
            "INSERT INTO properties (id, slug, title, images, featured, active)
             VALUES ('garbled', 'garbled', 'Garbled', CAST(x'fffe5b' AS TEXT), 0, 1);
             INSERT INTO properties (id, slug, title, images, featured, active)
             VALUES ('blob', 'blob', 'Blob', CAST('[\"b.jpg\"]' AS BLOB), 0, 1);",
        )
        .expect("rows should insert");

        let rows = fetch_active_properties(&conn).expect("query should succeed");
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();

        assert_eq!(ids, vec!["good", "garbled", "blob"]);
        assert_eq!(rows[0].images, ImagePayload::Text(r#"["a.jpg"]"#.to_string()));
        assert!(matches!(rows[1].images, ImagePayload::Unreadable(_)));
        assert_eq!(rows[2].images, ImagePayload::Text(r#"["b.jpg"]"#.to_string()));
    }

    #[test]
    fn missing_table_is_an_error() {
        let conn = Connection::open_in_memory().expect("in-memory sqlite should open");
        assert!(fetch_active_properties(&conn).is_err());
    }
}

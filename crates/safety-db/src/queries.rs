use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension};
use safety_types::models::Stored;
use uuid::Uuid;

use crate::Database;
use crate::models::{Collection, Document, Record, Sort, SortOrder};

impl Database {
    // -- Untyped documents --

    /// Persist `doc` in `collection` and return its generated id.
    pub fn create(&self, collection: Collection, doc: &serde_json::Value) -> Result<String> {
        if !doc.is_object() {
            bail!("Documents must be JSON objects");
        }

        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(doc)?;

        self.with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO {} (id, doc) VALUES (?1, ?2)", collection.table()),
                (&id, &body),
            )?;
            Ok(())
        })?;

        Ok(id)
    }

    /// First document (in insertion order) whose `field` equals `value`.
    pub fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>> {
        let path = json_path(field)?;
        self.with_conn(|conn| query_one(conn, collection, &path, value))
    }

    /// Every document in `collection`; insertion order unless `sort` is given.
    pub fn find_all(&self, collection: Collection, sort: Option<Sort<'_>>) -> Result<Vec<Document>> {
        let order_by = match sort {
            None => "rowid ASC".to_string(),
            Some(sort) => {
                let path = json_path(sort.field)?;
                let dir = match sort.order {
                    SortOrder::Ascending => "ASC",
                    SortOrder::Descending => "DESC",
                };
                format!("json_extract(doc, '{path}') {dir}, rowid {dir}")
            }
        };

        self.with_conn(|conn| query_all(conn, collection, &order_by))
    }

    // -- Typed records --

    pub fn insert<T: Record>(&self, record: &T) -> Result<String> {
        self.create(T::COLLECTION, &serde_json::to_value(record)?)
    }

    pub fn find_record<T: Record>(&self, field: &str, value: &str) -> Result<Option<Stored<T>>> {
        self.find_one(T::COLLECTION, field, value)?
            .map(decode::<T>)
            .transpose()
    }

    pub fn list_records<T: Record>(&self, sort: Option<Sort<'_>>) -> Result<Vec<Stored<T>>> {
        self.find_all(T::COLLECTION, sort)?
            .into_iter()
            .map(decode::<T>)
            .collect()
    }
}

fn decode<T: Record>(doc: Document) -> Result<Stored<T>> {
    let record = serde_json::from_value(doc.body)
        .map_err(|e| anyhow::anyhow!("Corrupt {} document '{}': {}", T::COLLECTION.table(), doc.id, e))?;
    Ok(Stored { id: doc.id, record })
}

/// Field names are spliced into SQL, so only plain identifiers are accepted.
fn json_path(field: &str) -> Result<String> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("Invalid document field name: {:?}", field);
    }
    Ok(format!("$.{}", field))
}

fn query_one(
    conn: &Connection,
    collection: Collection,
    path: &str,
    value: &str,
) -> Result<Option<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, doc FROM {} WHERE json_extract(doc, '{}') = ?1 ORDER BY rowid LIMIT 1",
        collection.table(),
        path
    ))?;

    let row = stmt
        .query_row([value], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .optional()?;

    row.map(|(id, body)| Ok(Document { id, body: serde_json::from_str(&body)? }))
        .transpose()
}

fn query_all(conn: &Connection, collection: Collection, order_by: &str) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, doc FROM {} ORDER BY {}",
        collection.table(),
        order_by
    ))?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, body)| Ok(Document { id, body: serde_json::from_str(&body)? }))
        .collect()
}

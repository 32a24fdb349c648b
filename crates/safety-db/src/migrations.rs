use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::models::Collection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (document collections)");

        let mut batch = String::from("BEGIN;\n");
        for collection in Collection::ALL {
            batch.push_str(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id          TEXT PRIMARY KEY,
                    doc         TEXT NOT NULL CHECK (json_valid(doc)),
                    inserted_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                );\n",
                table = collection.table()
            ));
        }
        batch.push_str(
            "
            CREATE INDEX IF NOT EXISTS idx_accounts_email
                ON accounts(json_extract(doc, '$.email'));

            INSERT INTO schema_version (version) VALUES (1);
            COMMIT;
            ",
        );

        // A failed batch leaves the transaction open; roll it back so the
        // connection is usable and nothing half-applied is kept
        if let Err(e) = conn.execute_batch(&batch) {
            if !conn.is_autocommit() {
                conn.execute_batch("ROLLBACK;")?;
            }
            return Err(e.into());
        }
    }

    info!("Database migrations complete");
    Ok(())
}

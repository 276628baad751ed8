use rusqlite::{named_params, Connection, OptionalExtension};

use crate::error::AppResult;

pub struct StateRepository;

impl StateRepository {
    pub fn get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
        let mut stmt = conn.prepare("SELECT value FROM app_state WHERE key = ?1")?;

        let value = stmt
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;

        Ok(value)
    }

    pub fn upsert(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO app_state (key, value)
                VALUES (:key, :value)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = CURRENT_TIMESTAMP
            "#,
            named_params! {":key": key, ":value": value},
        )?;

        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> AppResult<()> {
        conn.execute("DELETE FROM app_state WHERE key = ?1", [key])?;
        Ok(())
    }
}

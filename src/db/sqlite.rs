//! SQLite-backed channel store.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use super::{ChannelSnapshot, ChannelStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS channel (
    name        TEXT PRIMARY KEY,
    flags       TEXT NOT NULL DEFAULT '',
    "key"       TEXT NOT NULL DEFAULT '',
    topic       TEXT NOT NULL DEFAULT '',
    user_limit  INTEGER NOT NULL DEFAULT 0,
    ban_list    TEXT NOT NULL DEFAULT '',
    except_list TEXT NOT NULL DEFAULT '',
    invite_list TEXT NOT NULL DEFAULT ''
)
"#;

/// Channel store over a SQLite pool.
pub struct SqliteChannelStore {
    pool: SqlitePool,
}

impl SqliteChannelStore {
    /// Connect to the given SQLite URL (e.g. `sqlite://channels.db?mode=rwc`
    /// or `sqlite::memory:`) and ensure the schema exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        // A single connection keeps `sqlite::memory:` coherent; channel
        // persistence traffic is far below the point where pooling matters.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool, ensuring the schema exists.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ChannelStore for SqliteChannelStore {
    async fn save(&self, snapshot: &ChannelSnapshot) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO channel
              (name, flags, "key", topic, user_limit, ban_list, except_list, invite_list)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&snapshot.name)
        .bind(&snapshot.flags)
        .bind(&snapshot.key)
        .bind(&snapshot.topic)
        .bind(snapshot.user_limit as i64)
        .bind(&snapshot.ban_list)
        .bind(&snapshot.except_list)
        .bind(&snapshot.invite_list)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM channel WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<ChannelSnapshot>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT name, flags, "key", topic, user_limit, ban_list, except_list, invite_list
            FROM channel
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ChannelSnapshot {
                name: row.get("name"),
                flags: row.get("flags"),
                key: row.get("key"),
                topic: row.get("topic"),
                user_limit: row.get::<i64, _>("user_limit").max(0) as u64,
                ban_list: row.get("ban_list"),
                except_list: row.get("except_list"),
                invite_list: row.get("invite_list"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> ChannelSnapshot {
        ChannelSnapshot {
            name: name.to_string(),
            flags: "Pnt".to_string(),
            key: "sekrit".to_string(),
            topic: "hello".to_string(),
            user_limit: 25,
            ban_list: "*!*@evil.example".to_string(),
            except_list: String::new(),
            invite_list: String::new(),
        }
    }

    #[tokio::test]
    async fn save_load_round_trip() {
        let store = SqliteChannelStore::connect("sqlite::memory:").await.unwrap();

        store.save(&snapshot("#keep")).await.unwrap();
        store.save(&snapshot("#also")).await.unwrap();

        let rows = store.load_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "#also");
        assert_eq!(rows[1], snapshot("#keep"));
    }

    #[tokio::test]
    async fn save_is_upsert() {
        let store = SqliteChannelStore::connect("sqlite::memory:").await.unwrap();

        store.save(&snapshot("#keep")).await.unwrap();
        let mut updated = snapshot("#keep");
        updated.topic = "new topic".to_string();
        store.save(&updated).await.unwrap();

        let rows = store.load_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].topic, "new topic");
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = SqliteChannelStore::connect("sqlite::memory:").await.unwrap();

        store.save(&snapshot("#keep")).await.unwrap();
        store.delete("#keep").await.unwrap();
        // Deleting an absent row is not an error.
        store.delete("#keep").await.unwrap();

        assert!(store.load_all().await.unwrap().is_empty());
    }
}

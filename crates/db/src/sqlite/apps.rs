//! SQLite-Implementierung des AppRepository

use async_trait::async_trait;
use sqlx::Row as _;
use sso_core::AppId;

use crate::error::DbError;
use crate::models::AppRecord;
use crate::repository::{AppRepository, DbResult};
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl AppRepository for SqliteDb {
    async fn find_app(&self, id: AppId) -> DbResult<AppRecord> {
        let row = sqlx::query("SELECT id, name, secret FROM apps WHERE id = ?")
            .bind(id.inner())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::nicht_gefunden(format!("App {id}")))?;

        Ok(AppRecord {
            id: AppId(row.try_get("id")?),
            name: row.try_get("name")?,
            secret: row.try_get("secret")?,
        })
    }

    async fn create_app(&self, name: &str, secret: &[u8]) -> DbResult<AppId> {
        if secret.is_empty() {
            return Err(DbError::intern("App-Secret darf nicht leer sein"));
        }

        let ergebnis = sqlx::query("INSERT INTO apps (name, secret) VALUES (?, ?)")
            .bind(name)
            .bind(secret)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let fehler = DbError::Sqlx(e);
                if fehler.ist_eindeutigkeit() {
                    DbError::Eindeutigkeit(format!("App-Name '{name}' bereits vergeben"))
                } else {
                    fehler
                }
            })?;

        Ok(AppId(ergebnis.last_insert_rowid()))
    }
}

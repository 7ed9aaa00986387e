//! SQLite-Implementierung des UserRepository

use async_trait::async_trait;
use sqlx::Row as _;
use sso_core::UserId;

use crate::error::DbError;
use crate::models::BenutzerRecord;
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl UserRepository for SqliteDb {
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> DbResult<UserId> {
        let ergebnis = sqlx::query("INSERT INTO users (email, pass_hash) VALUES (?, ?)")
            .bind(email)
            .bind(pass_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let fehler = DbError::Sqlx(e);
                if fehler.ist_eindeutigkeit() {
                    DbError::Eindeutigkeit(format!("E-Mail '{email}' bereits registriert"))
                } else {
                    fehler
                }
            })?;

        Ok(UserId(ergebnis.last_insert_rowid()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<BenutzerRecord> {
        let row = sqlx::query("SELECT id, email, pass_hash, is_admin FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::nicht_gefunden(format!("User '{email}'")))?;

        row_to_benutzer(&row)
    }

    async fn is_admin(&self, id: UserId) -> DbResult<bool> {
        let row = sqlx::query("SELECT is_admin FROM users WHERE id = ?")
            .bind(id.inner())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::nicht_gefunden(format!("User {id}")))?;

        let is_admin: i64 = row.try_get("is_admin")?;
        Ok(is_admin != 0)
    }

    async fn set_admin(&self, id: UserId, admin: bool) -> DbResult<()> {
        let affected = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(admin as i64)
            .bind(id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("User {id}")));
        }
        Ok(())
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let pass_hash: Vec<u8> = row.try_get("pass_hash")?;
    if pass_hash.is_empty() {
        return Err(DbError::intern("Leerer Passwort-Hash in users"));
    }

    let is_admin: i64 = row.try_get("is_admin")?;

    Ok(BenutzerRecord {
        id: UserId(row.try_get("id")?),
        email: row.try_get("email")?,
        pass_hash,
        is_admin: is_admin != 0,
    })
}

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::error::{DaylogError, DaylogResult};

const MAX_USERNAME_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// UUID v7 primary key.
    pub id: String,
    pub username: String,
    pub created_at: String,
}

/// Look up `username`, creating the user on first use.
pub fn get_or_create_user(conn: &Connection, username: &str) -> DaylogResult<User> {
    let username = username.trim();
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(DaylogError::validation(
            "username",
            format!("must be 1-{MAX_USERNAME_LEN} characters"),
        ));
    }

    if let Some(user) = find_user_by_name(conn, username)? {
        return Ok(user);
    }

    let user = User {
        id: uuid::Uuid::now_v7().to_string(),
        username: username.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
        params![user.id, user.username, user.created_at],
    )?;
    tracing::info!(user_id = %user.id, username = %user.username, "user created");
    Ok(user)
}

pub fn find_user_by_id(conn: &Connection, id: &str) -> DaylogResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, created_at FROM users WHERE id = ?1",
            params![id],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

pub fn find_user_by_name(conn: &Connection, username: &str) -> DaylogResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, created_at FROM users WHERE username = ?1",
            params![username],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        created_at: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn test_get_or_create_is_stable() {
        let conn = db::open_memory_database().unwrap();
        let first = get_or_create_user(&conn, "sam").unwrap();
        let second = get_or_create_user(&conn, "  sam ").unwrap();
        assert_eq!(first, second);

        let other = get_or_create_user(&conn, "alex").unwrap();
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn test_find_by_id_and_name() {
        let conn = db::open_memory_database().unwrap();
        let user = get_or_create_user(&conn, "sam").unwrap();

        assert_eq!(find_user_by_id(&conn, &user.id).unwrap(), Some(user.clone()));
        assert_eq!(find_user_by_name(&conn, "sam").unwrap(), Some(user));
        assert_eq!(find_user_by_id(&conn, "nope").unwrap(), None);
    }

    #[test]
    fn test_blank_username_rejected() {
        let conn = db::open_memory_database().unwrap();
        assert!(matches!(
            get_or_create_user(&conn, "   "),
            Err(DaylogError::Validation { field: "username", .. })
        ));
    }
}

use anyhow::{Context, Result};
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const USER_COLUMNS: &str =
    "id, username, email, is_active, is_admin, created_at, updated_at, last_login_at";

fn row_to_user(row: &QueryResult) -> Result<User> {
    Ok(User {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        is_admin: row.try_get::<i32>("", "is_admin")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

/// Create user with password hash
pub async fn create_with_password(user: &User, password_hash: &str) -> Result<()> {
    let conn = get_connection()?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_users (id, username, email, password_hash, is_active, is_admin, created_at, updated_at, last_login_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            user.id.clone().into(),
            user.username.clone().into(),
            user.email.clone().into(),
            password_hash.to_string().into(),
            (if user.is_active { 1 } else { 0 }).into(),
            (if user.is_admin { 1 } else { 0 }).into(),
            user.created_at.clone().into(),
            user.updated_at.clone().into(),
            user.last_login_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert user")?;

    Ok(())
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    let conn = get_connection()?;

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            [id.into()],
        ))
        .await?;

    result.as_ref().map(row_to_user).transpose()
}

/// Get user by email (stored lowercased)
pub async fn get_by_email(email: &str) -> Result<Option<User>> {
    let conn = get_connection()?;

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users WHERE email = ?", USER_COLUMNS),
            [email.to_lowercase().into()],
        ))
        .await?;

    result.as_ref().map(row_to_user).transpose()
}

/// Get user by username
pub async fn get_by_username(username: &str) -> Result<Option<User>> {
    let conn = get_connection()?;

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users WHERE username = ?", USER_COLUMNS),
            [username.into()],
        ))
        .await?;

    result.as_ref().map(row_to_user).transpose()
}

/// Get password hash for user
pub async fn get_password_hash(user_id: &str) -> Result<Option<String>> {
    let conn = get_connection()?;

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

/// List all users
pub async fn list_all() -> Result<Vec<User>> {
    let conn = get_connection()?;

    let rows = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users ORDER BY created_at DESC", USER_COLUMNS),
        ))
        .await?;

    rows.iter().map(row_to_user).collect()
}

/// Update user
pub async fn update(user: &User) -> Result<()> {
    let conn = get_connection()?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users
         SET email = ?, is_active = ?, is_admin = ?, updated_at = ?
         WHERE id = ?",
        [
            user.email.clone().into(),
            (if user.is_active { 1 } else { 0 }).into(),
            (if user.is_admin { 1 } else { 0 }).into(),
            user.updated_at.clone().into(),
            user.id.clone().into(),
        ],
    ))
    .await
    .context("Failed to update user")?;

    Ok(())
}

/// Delete user (hard delete)
pub async fn delete(id: &str) -> Result<bool> {
    let conn = get_connection()?;

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete user")?;

    Ok(result.rows_affected() > 0)
}

/// Update last login timestamp
pub async fn update_last_login(id: &str) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let conn = get_connection()?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
        [now.into(), id.to_string().into()],
    ))
    .await
    .context("Failed to update last login")?;

    Ok(())
}

/// Update user password
pub async fn update_password(id: &str, password_hash: &str) -> Result<()> {
    let conn = get_connection()?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET password_hash = ?, updated_at = ? WHERE id = ?",
        [
            password_hash.to_string().into(),
            chrono::Utc::now().to_rfc3339().into(),
            id.to_string().into(),
        ],
    ))
    .await
    .context("Failed to update password")?;

    Ok(())
}

/// Store a hashed password-reset token with its expiry
pub async fn set_reset_token(id: &str, token_hash: &str, expires_at: &str) -> Result<()> {
    let conn = get_connection()?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET reset_token_hash = ?, reset_token_expires_at = ? WHERE id = ?",
        [
            token_hash.to_string().into(),
            expires_at.to_string().into(),
            id.to_string().into(),
        ],
    ))
    .await
    .context("Failed to set reset token")?;

    Ok(())
}

/// Clear the password-reset token
pub async fn clear_reset_token(id: &str) -> Result<()> {
    let conn = get_connection()?;

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET reset_token_hash = NULL, reset_token_expires_at = NULL WHERE id = ?",
        [id.to_string().into()],
    ))
    .await
    .context("Failed to clear reset token")?;

    Ok(())
}

/// Find a user by unexpired reset token hash
pub async fn find_by_reset_token(token_hash: &str, now: &str) -> Result<Option<User>> {
    let conn = get_connection()?;

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT {} FROM sys_users
                 WHERE reset_token_hash = ? AND reset_token_expires_at > ?",
                USER_COLUMNS
            ),
            [token_hash.into(), now.into()],
        ))
        .await?;

    result.as_ref().map(row_to_user).transpose()
}

use contracts::system::settings::AppSettings;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::data::db::get_connection;

const SETTINGS_KEY: &str = "app_settings";

pub async fn get_setting(key: &str) -> anyhow::Result<Option<String>> {
    let conn = get_connection()?;
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?;",
            [key.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

pub async fn set_setting(key: &str, value: &str) -> anyhow::Result<()> {
    let conn = get_connection()?;
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        r#"
        INSERT INTO sys_settings (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value;
        "#,
        [key.into(), value.into()],
    ))
    .await?;
    Ok(())
}

pub async fn load_app_settings() -> anyhow::Result<AppSettings> {
    match get_setting(SETTINGS_KEY).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(AppSettings::default()),
    }
}

pub async fn save_app_settings(settings: &AppSettings) -> anyhow::Result<()> {
    let raw = serde_json::to_string(settings)?;
    set_setting(SETTINGS_KEY, &raw).await
}

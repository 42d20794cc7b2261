use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::db::get_connection;

/// Atomically claim the next order sequence number for the given year.
/// Single upsert statement, so concurrent callers never observe the
/// same value.
pub async fn next_order_sequence(year: i32) -> anyhow::Result<i64> {
    let conn = get_connection()?;
    let key = format!("order-{}", year);
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            r#"
            INSERT INTO sys_sequences (key, value) VALUES (?, 1)
            ON CONFLICT(key) DO UPDATE SET value = value + 1
            RETURNING value;
            "#,
            [key.into()],
        ))
        .await?
        .ok_or_else(|| anyhow::anyhow!("sequence upsert returned no row"))?;
    let value: i64 = result.try_get("", "value")?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;
    use contracts::domain::a008_order::aggregate::format_order_number;

    #[tokio::test]
    async fn order_numbers_increment_within_a_year() {
        let path = std::env::temp_dir().join(format!("orders-{}.db", uuid::Uuid::new_v4()));
        initialize_database(path.to_str()).await.unwrap();

        let first = format_order_number(2025, next_order_sequence(2025).await.unwrap());
        let second = format_order_number(2025, next_order_sequence(2025).await.unwrap());
        assert_eq!(first, "ORD-2025-001");
        assert_eq!(second, "ORD-2025-002");

        // Each year tracks its own counter
        assert_eq!(next_order_sequence(2026).await.unwrap(), 1);
        assert_eq!(next_order_sequence(2025).await.unwrap(), 3);

        let _ = std::fs::remove_file(path);
    }
}

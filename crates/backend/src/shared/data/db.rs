use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

async fn execute(conn: &DatabaseConnection, sql: &str) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

/// Minimal schema bootstrap. Aggregates store their embedded collections
/// as JSON text columns next to the scalar fields used for filtering.
async fn create_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a001_category (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            color TEXT,
            icon TEXT,
            fields_json TEXT NOT NULL DEFAULT '[]',
            required INTEGER NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a002_component (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            brand TEXT NOT NULL DEFAULT '',
            model TEXT NOT NULL DEFAULT '',
            description TEXT,
            category_id TEXT,
            price_amount REAL NOT NULL DEFAULT 0,
            price_currency TEXT NOT NULL DEFAULT 'AED',
            pricing_json TEXT NOT NULL DEFAULT '{}',
            technical_specs_json TEXT NOT NULL DEFAULT '{}',
            in_stock INTEGER NOT NULL DEFAULT 1,
            stock_count INTEGER NOT NULL DEFAULT 0,
            rating_average REAL NOT NULL DEFAULT 0,
            rating_count INTEGER NOT NULL DEFAULT 0,
            incompatible_json TEXT NOT NULL DEFAULT '[]',
            tags_json TEXT NOT NULL DEFAULT '[]',
            slug TEXT,
            is_featured INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a003_prebuild_pc (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            category TEXT NOT NULL DEFAULT 'general',
            components_json TEXT NOT NULL DEFAULT '{}',
            components_cost REAL NOT NULL DEFAULT 0,
            assembly_fee REAL NOT NULL DEFAULT 0,
            total_cost REAL NOT NULL DEFAULT 0,
            selling_price REAL NOT NULL DEFAULT 0,
            currency TEXT NOT NULL DEFAULT 'AED',
            in_stock INTEGER NOT NULL DEFAULT 1,
            stock_count INTEGER NOT NULL DEFAULT 0,
            estimated_build_time TEXT NOT NULL DEFAULT '3-5 business days',
            tags_json TEXT NOT NULL DEFAULT '[]',
            slug TEXT,
            is_featured INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a004_user_build (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            user_id TEXT,
            build_type TEXT NOT NULL DEFAULT 'custom',
            components_json TEXT NOT NULL DEFAULT '[]',
            total_price REAL NOT NULL DEFAULT 0,
            is_public INTEGER NOT NULL DEFAULT 0,
            tags_json TEXT NOT NULL DEFAULT '[]',
            notes TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a005_compatibility_rule (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            source_category_id TEXT NOT NULL,
            target_category_id TEXT NOT NULL,
            rules_json TEXT NOT NULL DEFAULT '[]',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a006_supplier (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            contact TEXT NOT NULL DEFAULT '',
            email TEXT,
            phone TEXT NOT NULL DEFAULT '',
            website TEXT,
            location TEXT,
            address TEXT NOT NULL DEFAULT '',
            products_json TEXT NOT NULL DEFAULT '[]',
            comments_json TEXT NOT NULL DEFAULT '[]',
            ratings_json TEXT NOT NULL DEFAULT '[]',
            average_rating REAL NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a007_product (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            base_price REAL NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a008_order (
            id TEXT PRIMARY KEY NOT NULL,
            order_number TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            product_id TEXT NOT NULL,
            product_name TEXT NOT NULL DEFAULT '',
            quantity INTEGER NOT NULL DEFAULT 1,
            unit_price REAL NOT NULL DEFAULT 0,
            listed_price REAL NOT NULL DEFAULT 0,
            total_amount REAL NOT NULL DEFAULT 0,
            supplier_id TEXT,
            supplier_name TEXT,
            suppliers_json TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL DEFAULT 'Pending',
            order_date TEXT,
            expected_delivery_date TEXT,
            notes TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            reset_token_hash TEXT,
            reset_token_expires_at TEXT,
            last_login_at TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );
        "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS sys_sequences (
            key TEXT PRIMARY KEY NOT NULL,
            value INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .await?;

    Ok(())
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

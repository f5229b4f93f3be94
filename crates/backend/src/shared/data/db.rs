use contracts::domain::a001_stage::metadata::{DEPT_CODE_LENGTH, MAX_TEXT_LENGTH};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

pub const STAGE_TABLE: &str = "a001_stage";

/// Подключается к БД по URL и создаёт недостающие таблицы
pub async fn initialize_database(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    if let Some(path) = sqlite_file_path(database_url) {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    // Every pooled connection to an in-memory database sees its own empty database
    if is_in_memory(database_url) {
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;

    tracing::info!("Database initialized");
    Ok(conn)
}

/// Minimal schema bootstrap
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_stage_table = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{STAGE_TABLE}';"
    );
    let stage_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_stage_table,
        ))
        .await?;

    if stage_table_exists.is_empty() {
        tracing::info!("Creating {} table", STAGE_TABLE);
        let create_stage_table_sql = format!(
            r#"
            CREATE TABLE {STAGE_TABLE} (
                id TEXT PRIMARY KEY NOT NULL,
                date TEXT NOT NULL,
                place TEXT NOT NULL
                    CHECK (length(place) BETWEEN 1 AND {MAX_TEXT_LENGTH}),
                stage_name TEXT NOT NULL
                    CHECK (length(stage_name) BETWEEN 1 AND {MAX_TEXT_LENGTH}),
                cost REAL NOT NULL CHECK (cost >= 0),
                dept TEXT NOT NULL
                    CHECK (length(dept) = {DEPT_CODE_LENGTH} AND dept = upper(dept))
            );
            "#
        );
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_stage_table_sql,
        ))
        .await?;
    }

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!("CREATE INDEX IF NOT EXISTS idx_{STAGE_TABLE}_date ON {STAGE_TABLE} (date DESC);"),
    ))
    .await?;

    Ok(())
}

/// Путь к файлу БД для URL вида `sqlite://path/to/app.db?mode=rwc`
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite://target/db/stages.db?mode=rwc"),
            Some("target/db/stages.db")
        );
        assert_eq!(
            sqlite_file_path("sqlite:///var/lib/stages.db"),
            Some("/var/lib/stages.db")
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/stages"), None);
    }

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:stages?mode=memory"));
        assert!(!is_in_memory("sqlite://target/db/stages.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let conn = initialize_database("sqlite::memory:").await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("SELECT name FROM sqlite_master WHERE type='table' AND name='{STAGE_TABLE}';"),
            ))
            .await
            .unwrap();
        assert_eq!(tables.len(), 1);
    }
}

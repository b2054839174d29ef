use crate::storage::{StorageError, StorageResult};
use rust_embed::RustEmbed;
use sqlx::{Pool, Postgres, Sqlite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Sqlite,
    Postgres,
}

impl DatabaseType {
    /// Get the prefix for embedded files
    pub fn prefix(&self) -> &'static str {
        match self {
            DatabaseType::Sqlite => "sqlite/",
            DatabaseType::Postgres => "pgsql/",
        }
    }
}

#[derive(RustEmbed)]
#[folder = "migrations/sqlite"]
#[prefix = "sqlite/"]
pub struct SqliteMigrations;

#[derive(RustEmbed)]
#[folder = "migrations/pgsql"]
#[prefix = "pgsql/"]
pub struct PostgresMigrations;

/// Get migration SQL for a specific database type
pub fn get_migration_sql(
    database_type: DatabaseType,
    migration_name: &str,
) -> StorageResult<String> {
    let path = format!("{}{}", database_type.prefix(), migration_name);
    let sql = match database_type {
        DatabaseType::Sqlite => SqliteMigrations::get(&path),
        DatabaseType::Postgres => PostgresMigrations::get(&path),
    }
    .ok_or_else(|| {
        StorageError::InvalidData(format!("Migration '{}' not found", migration_name))
    })?;

    String::from_utf8(sql.data.to_vec())
        .map_err(|e| StorageError::InvalidData(format!("Invalid UTF-8 in migration file: {}", e)))
}

/// Get all available migrations for a database type, sorted by name
pub fn get_available_migrations(database_type: DatabaseType) -> Vec<String> {
    let mut migrations = Vec::new();

    let files: Vec<_> = match database_type {
        DatabaseType::Sqlite => SqliteMigrations::iter().collect(),
        DatabaseType::Postgres => PostgresMigrations::iter().collect(),
    };
    for file in files {
        if let Some(filename) = file.strip_prefix(database_type.prefix()) {
            migrations.push(filename.to_string());
        }
    }

    migrations.sort();
    migrations
}

/// Parse SQL script into individual statements
pub fn parse_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();

    for statement in sql.split(';') {
        // Strip comment lines, then drop whatever is left over if empty
        let cleaned = statement
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join(" ");
        let cleaned = cleaned.trim();

        if !cleaned.is_empty() {
            statements.push(format!("{};", cleaned));
        }
    }

    statements
}

/// Run every embedded SQLite migration in filename order.
///
/// The statements are idempotent (CREATE ... IF NOT EXISTS), so this is
/// safe to run on every startup.
pub async fn run_sqlite_migrations(pool: &Pool<Sqlite>) -> StorageResult<()> {
    for migration in get_available_migrations(DatabaseType::Sqlite) {
        let sql = get_migration_sql(DatabaseType::Sqlite, &migration)?;
        for statement in parse_sql_statements(&sql) {
            sqlx::query(&statement).execute(pool).await.map_err(|e| {
                StorageError::Database(format!("Migration '{}' failed: {}", migration, e))
            })?;
        }
    }
    Ok(())
}

/// Run every embedded PostgreSQL migration in filename order.
pub async fn run_postgres_migrations(pool: &Pool<Postgres>) -> StorageResult<()> {
    for migration in get_available_migrations(DatabaseType::Postgres) {
        let sql = get_migration_sql(DatabaseType::Postgres, &migration)?;
        for statement in parse_sql_statements(&sql) {
            sqlx::query(&statement).execute(pool).await.map_err(|e| {
                StorageError::Database(format!("Migration '{}' failed: {}", migration, e))
            })?;
        }
    }
    Ok(())
}

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info};
use migration::Migrator;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::services::connection_db;

pub async fn run_migrations_safe(
    db: &DatabaseConnection,
    db_file: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    info!("Checking for pending migrations...");
    let start = Instant::now();

    db.ping().await.map(|_| info!("Database connection OK"))?;

    let pending = Migrator::get_pending_migrations(db).await.map_err(|e| {
        error!("Failed to check migrations: {}", e);
        e
    })?;

    if pending.is_empty() {
        info!("Database schema is up to date.");
        return Ok(());
    }

    info!("{} pending migration(s):", pending.len());
    for m in &pending {
        info!("  - {}", m.name());
    }

    if let Some(db_file) = db_file {
        backup_database(db_file).map_err(|e| {
            error!("Failed to back up database before migrating: {}", e);
            e
        })?;
    }

    Migrator::up(db, None)
        .await
        .map(|_| info!("Migrations applied in {:?}", start.elapsed()))
        .map_err(|e| {
            error!("Failed to apply migrations: {}", e);
            e
        })?;

    Ok(())
}

/// Connects to `database_url` and brings the schema up to date.
pub async fn prepare_database(
    database_url: &str,
) -> Result<&'static DatabaseConnection, Box<dyn Error>> {
    let db_file = sqlite_file_path(database_url);
    let is_fresh = db_file.as_deref().map_or(true, |path| !path.exists());

    let db = connection_db::init(database_url).await?;

    db.ping().await.map_err(|e| {
        error!("Failed to ping database: {}", e);
        e
    })?;

    if is_fresh {
        info!("New database detected. Applying all migrations...");
        Migrator::up(db, None).await.map_err(|e| {
            error!("Failed to migrate new database: {}", e);
            e
        })?;
        info!("Database ready.");
    } else {
        info!("Existing database. Checking pending migrations...");
        run_migrations_safe(db, db_file.as_deref()).await?;
    }

    Ok(db)
}

/// Copies the database file next to itself with a timestamp suffix.
pub fn backup_database(db_path: &Path) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if !db_path.exists() {
        info!("Database file not found at {:?}", db_path);
        return Ok(None);
    }

    let stem = db_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "database".to_string());
    let backup_name = format!(
        "{}_backup_{}.db",
        stem,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let backup_path = db_path.with_file_name(backup_name);

    fs::copy(db_path, &backup_path)?;
    info!("Backup created: {}", backup_path.display());

    Ok(Some(backup_path))
}

/// File behind a `sqlite:` url, or `None` for in-memory and non-SQLite urls.
pub fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }

    Some(PathBuf::from(path))
}

use log::LevelFilter;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

static DB: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn get_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(options).await
}

/// Opens the process-wide connection. Later calls return the first one.
pub async fn init(database_url: &str) -> Result<&'static DatabaseConnection, DbErr> {
    if let Some(db) = DB.get() {
        return Ok(db);
    }

    let connection = get_connection(database_url).await?;
    Ok(DB.get_or_init(|| connection))
}

pub fn db_ref() -> Result<&'static DatabaseConnection, DbErr> {
    DB.get()
        .ok_or_else(|| DbErr::Custom("Database connection not initialised".to_string()))
}

use dioxus_logger::tracing::Level;
use sea_orm::DatabaseConnection;

use crate::server::{config::Config, error::Error};

/// Initialize the global logger at the configured level
///
/// Unknown levels fall back to `info`.
pub fn init_logger(config: &Config) {
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);

    if let Err(e) = dioxus_logger::init(level) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

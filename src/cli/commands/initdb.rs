use anyhow::Result;
use schema::{ensure_schema, SchemaStatus};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, error, info, trace};

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    match ensure_schema(&db).await {
        Ok(SchemaStatus::Created) => info!("Forecast table created and seeded"),
        Ok(SchemaStatus::AlreadyPresent) => {
            info!("Forecast table already present, nothing to do");
            debug!("Existing rows were left untouched");
        }
        Err(e) => {
            error!("Failed to create forecast table: {}", e);
            return Err(e.into());
        }
    }

    info!("Database initialization completed successfully!");
    Ok(())
}

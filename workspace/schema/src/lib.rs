//! Schema bootstrap for the forecast store.
//!
//! There are no versioned migrations. On start-up the forecast table is
//! created from the entity definition if it is missing and seeded with two
//! sample rows; an existing table is left untouched.

use chrono::{Days, Local, NaiveDate};
use model::ForecastFields;
use model::entities::forecast;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityName, EntityTrait,
    IntoActiveModel, Schema, TransactionTrait,
};
use sea_orm_migration::SchemaManager;
use tracing::{debug, info, warn};

/// Outcome of [`ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The table was missing and has been created and seeded.
    Created,
    /// The table existed already; nothing was changed.
    AlreadyPresent,
}

/// Makes sure the forecast table exists, seeding relative to the local date.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<SchemaStatus, DbErr> {
    ensure_schema_at(db, Local::now().date_naive()).await
}

/// Like [`ensure_schema`] with an explicit reference date for the seed rows.
pub async fn ensure_schema_at(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<SchemaStatus, DbErr> {
    let seeds: Vec<forecast::ActiveModel> = seed_rows(today)
        .into_iter()
        .map(IntoActiveModel::into_active_model)
        .collect();
    bootstrap(db, seeds).await
}

/// Creates and seeds the table inside one transaction, so a failed seed
/// leaves no empty table behind. MySQL commits DDL implicitly and is the
/// exception.
async fn bootstrap(
    db: &DatabaseConnection,
    seeds: Vec<forecast::ActiveModel>,
) -> Result<SchemaStatus, DbErr> {
    let entity = forecast::Entity;
    let table = entity.table_name();
    let txn = db.begin().await?;

    if SchemaManager::new(&txn).has_table(table).await? {
        debug!("Table {} already present, skipping bootstrap", table);
        txn.rollback().await?;
        return Ok(SchemaStatus::AlreadyPresent);
    }

    match create_and_seed(&txn, seeds).await {
        Ok(count) => {
            txn.commit().await?;
            info!("Seeded {} with {} forecasts", table, count);
            Ok(SchemaStatus::Created)
        }
        Err(err) => {
            warn!("Bootstrap of {} failed, rolling back: {}", table, err);
            txn.rollback().await?;
            Err(err)
        }
    }
}

async fn create_and_seed(
    txn: &DatabaseTransaction,
    seeds: Vec<forecast::ActiveModel>,
) -> Result<usize, DbErr> {
    let entity = forecast::Entity;
    info!("Creating table {}", entity.table_name());

    let backend = txn.get_database_backend();
    SchemaManager::new(txn)
        .create_table(Schema::new(backend).create_table_from_entity(entity))
        .await?;

    let count = seeds.len();
    forecast::Entity::insert_many(seeds).exec(txn).await?;
    Ok(count)
}

/// Sample rows written into a freshly created table.
pub fn seed_rows(today: NaiveDate) -> Vec<ForecastFields> {
    vec![
        ForecastFields {
            date: today + Days::new(1),
            temperature_c: 20,
            summary: Some("Mild".to_string()),
        },
        ForecastFields {
            date: today + Days::new(2),
            temperature_c: 25,
            summary: Some("Warm".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::store;
    use sea_orm::{ActiveValue::Set, Database};

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_database_is_created_and_seeded() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        let status = ensure_schema_at(&db, reference_date()).await?;
        assert_eq!(status, SchemaStatus::Created);

        let rows = store::list_by_date(&db).await?;
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(rows[0].temperature_c, 20);
        assert_eq!(rows[0].summary.as_deref(), Some("Mild"));
        assert_eq!(rows[0].temperature_f(), 68);

        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(rows[1].temperature_c, 25);
        assert_eq!(rows[1].summary.as_deref(), Some("Warm"));
        assert_eq!(rows[1].temperature_f(), 77);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_bootstrap_adds_nothing() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        ensure_schema_at(&db, reference_date()).await?;
        let status = ensure_schema_at(&db, reference_date()).await?;

        assert_eq!(status, SchemaStatus::AlreadyPresent);
        assert_eq!(store::list_by_date(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_existing_rows_are_left_alone() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        ensure_schema_at(&db, reference_date()).await?;

        let first = store::list_by_date(&db).await?[0].id;
        assert!(store::delete_forecast(&db, first).await?);

        assert_eq!(ensure_schema(&db).await?, SchemaStatus::AlreadyPresent);
        assert_eq!(store::list_by_date(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_no_table_behind() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let clashing = |summary: &str| forecast::ActiveModel {
            id: Set(1),
            date: Set(reference_date()),
            temperature_c: Set(0),
            summary: Set(Some(summary.to_string())),
        };

        let result = bootstrap(&db, vec![clashing("first"), clashing("second")]).await;
        assert!(result.is_err());
        assert!(!SchemaManager::new(&db).has_table("WeatherForecasts").await?);

        let status = ensure_schema_at(&db, reference_date()).await?;
        assert_eq!(status, SchemaStatus::Created);
        assert_eq!(store::list_by_date(&db).await?.len(), 2);

        Ok(())
    }

    #[test]
    fn test_seed_rows_follow_reference_date() {
        let seeds = seed_rows(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        assert_eq!(seeds[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(seeds[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}

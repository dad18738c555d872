//! Store operations over the forecast table.
//!
//! Every function takes any [`ConnectionTrait`] so callers can pass the pooled
//! `DatabaseConnection` or a transaction.

use chrono::NaiveDate;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder,
};
use tracing::debug;

use crate::entities::forecast;

/// Validated forecast values without an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastFields {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl IntoActiveModel<forecast::ActiveModel> for ForecastFields {
    fn into_active_model(self) -> forecast::ActiveModel {
        forecast::ActiveModel {
            id: NotSet,
            date: Set(self.date),
            temperature_c: Set(self.temperature_c),
            summary: Set(self.summary),
        }
    }
}

/// All forecasts, earliest date first. Rows sharing a date keep insertion order.
pub async fn list_by_date<C: ConnectionTrait>(db: &C) -> Result<Vec<forecast::Model>, DbErr> {
    let rows = forecast::Entity::find()
        .order_by_asc(forecast::Column::Date)
        .order_by_asc(forecast::Column::Id)
        .all(db)
        .await?;
    debug!("Loaded {} forecasts", rows.len());
    Ok(rows)
}

pub async fn find_forecast<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<forecast::Model>, DbErr> {
    forecast::Entity::find_by_id(id).one(db).await
}

pub async fn forecast_exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let count = forecast::Entity::find_by_id(id).count(db).await?;
    Ok(count > 0)
}

/// Inserts a new row and returns it with the store-assigned id.
pub async fn insert_forecast<C: ConnectionTrait>(
    db: &C,
    fields: ForecastFields,
) -> Result<forecast::Model, DbErr> {
    let created = fields.into_active_model().insert(db).await?;
    debug!("Inserted forecast {} for {}", created.id, created.date);
    Ok(created)
}

/// Overwrites every column of row `id`.
///
/// Fails with [`DbErr::RecordNotUpdated`] when no row was changed, which
/// includes the case where `id` does not exist.
pub async fn replace_forecast<C: ConnectionTrait>(
    db: &C,
    id: i32,
    fields: ForecastFields,
) -> Result<forecast::Model, DbErr> {
    let mut active = fields.into_active_model();
    active.id = Unchanged(id);

    let updated = active.update(db).await?;
    debug!("Replaced forecast {}", updated.id);
    Ok(updated)
}

/// Deletes row `id` in one statement. Returns `false` when nothing matched.
pub async fn delete_forecast<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let result = forecast::Entity::delete_by_id(id).exec(db).await?;
    debug!("Delete of forecast {} affected {} rows", id, result.rows_affected);
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::SqliteQueryBuilder;
    use sea_orm::{Database, DatabaseConnection, DbBackend, Schema, Statement};

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let stmt = Schema::new(DbBackend::Sqlite)
            .create_table_from_entity(forecast::Entity)
            .to_string(SqliteQueryBuilder);
        db.execute(Statement::from_string(DbBackend::Sqlite, stmt))
            .await?;
        Ok(db)
    }

    fn fields(day: u32, temperature_c: i32, summary: Option<&str>) -> ForecastFields {
        ForecastFields {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            temperature_c,
            summary: summary.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_id() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let late = insert_forecast(&db, fields(20, 5, Some("Late"))).await?;
        let early = insert_forecast(&db, fields(1, 10, Some("Early"))).await?;
        let middle_a = insert_forecast(&db, fields(10, 0, None)).await?;
        let middle_b = insert_forecast(&db, fields(10, 1, None)).await?;

        let ids: Vec<i32> = list_by_date(&db).await?.into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![early.id, middle_a.id, middle_b.id, late.id]);

        Ok(())
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let first = insert_forecast(&db, fields(1, 20, Some("Mild"))).await?;
        let second = insert_forecast(&db, fields(2, 25, Some("Warm"))).await?;

        assert_eq!(first.id, 1);
        assert_ne!(first.id, second.id);
        assert_eq!(find_forecast(&db, first.id).await?, Some(first));

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_overwrites_all_columns() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let created = insert_forecast(&db, fields(1, 20, Some("Mild"))).await?;

        let replaced = replace_forecast(&db, created.id, fields(4, -3, None)).await?;

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.temperature_c, -3);
        assert_eq!(replaced.summary, None);
        assert_eq!(find_forecast(&db, created.id).await?, Some(replaced));

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_missing_row_reports_not_updated() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let result = replace_forecast(&db, 42, fields(1, 20, None)).await;

        assert!(matches!(result, Err(DbErr::RecordNotUpdated)));
        assert!(!forecast_exists(&db, 42).await?);
        assert!(list_by_date(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reports_whether_a_row_matched() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let created = insert_forecast(&db, fields(1, 20, None)).await?;

        assert!(!delete_forecast(&db, created.id + 1).await?);
        assert!(forecast_exists(&db, created.id).await?);

        assert!(delete_forecast(&db, created.id).await?);
        assert!(!forecast_exists(&db, created.id).await?);
        assert_eq!(find_forecast(&db, created.id).await?, None);

        Ok(())
    }
}

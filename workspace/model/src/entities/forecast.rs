use chrono::NaiveDate;
use common::celsius_to_fahrenheit;
use sea_orm::entity::prelude::*;

/// A weather forecast for a single calendar day.
///
/// Only the Celsius reading is stored; Fahrenheit is derived on read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "WeatherForecasts")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "Id")]
    pub id: i32,
    #[sea_orm(column_name = "Date")]
    pub date: NaiveDate,
    #[sea_orm(column_name = "TemperatureC")]
    pub temperature_c: i32,
    /// Short free-text description, at most 100 characters.
    #[sea_orm(column_name = "Summary", column_type = "String(StringLen::N(100))", nullable)]
    pub summary: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn temperature_f(&self) -> i64 {
        celsius_to_fahrenheit(self.temperature_c)
    }
}

impl From<Model> for common::Forecast {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            temperature_c: model.temperature_c,
            summary: model.summary,
        }
    }
}

pub mod entities;
pub mod store;

pub use store::ForecastFields;

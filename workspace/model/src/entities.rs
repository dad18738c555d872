//! This file serves as the root for all SeaORM entity modules.
//! The application persists a single entity, the weather forecast.

pub mod forecast;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::forecast::Entity as Forecast;
}

pub mod form;
pub mod table;
pub mod view;

pub use view::ForecastsView;

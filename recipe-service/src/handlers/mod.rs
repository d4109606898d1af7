//! HTTP handlers for the recipe service.

pub mod app;
pub mod generate;

pub use app::health_check;
pub use generate::generate_recipe;

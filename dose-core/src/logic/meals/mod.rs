//! Meals Module - catalog and calorie accumulation

pub mod calories;
pub mod catalog;

pub use calories::calculate_total_calories;
pub use catalog::{MealCatalog, MealCategory, MealItems};

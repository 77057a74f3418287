//! Insulin Dose Predictor - Core Logic
//!
//! Everything that does not know about HTTP: the user store, the meal
//! catalog and calorie accumulation, feature assembly and model invocation.

pub mod constants;
pub mod logic;

pub use logic::features::{ClinicalInput, FeatureSchema, FeatureVector, NamedFeatures};
pub use logic::meals::{calculate_total_calories, MealCatalog, MealCategory};
pub use logic::model::{Prediction, Predictor};
pub use logic::users::{LoginError, SignupError, UserStore};

//! Features Module - Feature Assembly
//!
//! Turns the prediction form plus the session's calorie total into the
//! vector layout a trained model declares.

pub mod input;
pub mod layout;
pub mod vector;


// Re-export common types
pub use input::{to_float, ClinicalInput};
pub use layout::{FeatureSchema, INPUT_FEATURES};
pub use vector::{FeatureVector, NamedFeatures};

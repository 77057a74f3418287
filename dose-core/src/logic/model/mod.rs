//! Model Module - loading and invoking the dose regressor
//!
//! Backends sit behind the `Regressor` trait; the bundle manifest picks one.

pub mod bundle;
pub mod inference;
pub mod predictor;

// Re-export common types
pub use bundle::{BundleManifest, ModelBundle, ModelLoadError, ModelMetadata, ModelSpec};
pub use inference::{InferenceError, LinearRegressor, Regressor};
pub use predictor::{round_dose, EngineStatus, Prediction, Predictor};

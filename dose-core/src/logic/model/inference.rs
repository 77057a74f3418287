//! Inference Engines - linear and ONNX regressors
//!
//! Both take one feature row and return one scalar dose.
//! Swapping backends only touches the bundle manifest.

use ndarray::Array1;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// INFERENCE ENGINE TRAIT
// ============================================================================

/// Trait for regression backends (linear, ONNX, ...)
pub trait Regressor: Send + Sync {
    /// Backend label for status reporting
    fn backend(&self) -> &'static str;

    /// Predict one dose from one feature row
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

// ============================================================================
// LINEAR IMPLEMENTATION
// ============================================================================

/// `intercept + coefficients · features`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients: Array1::from(coefficients),
            intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn backend(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError(format!(
                "X has {} features, but the model is expecting {} features as input",
                features.len(),
                self.coefficients.len()
            )));
        }

        let x = Array1::from(features.to_vec());
        let y = self.coefficients.dot(&x) + self.intercept;

        if !y.is_finite() {
            return Err(InferenceError(format!("Non-finite prediction: {}", y)));
        }
        Ok(y)
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

#[cfg(feature = "onnx")]
pub use onnx::OnnxRegressor;

#[cfg(feature = "onnx")]
mod onnx {
    use std::path::Path;

    use ndarray::Array2;
    use ort::session::{builder::GraphOptimizationLevel, Session};
    use ort::value::Value;
    use parking_lot::Mutex;

    use super::{InferenceError, Regressor};

    /// ONNX Runtime session over a `[1, n_features]` float input
    pub struct OnnxRegressor {
        session: Mutex<Session>,
        output_name: String,
    }

    impl OnnxRegressor {
        /// Load ONNX model from file
        pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
            log::info!("Loading ONNX model from: {}", model_path.display());

            if !model_path.exists() {
                return Err(InferenceError(format!("Model not found: {}", model_path.display())));
            }

            let session = Session::builder()
                .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
                .commit_from_file(model_path)
                .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

            let output_name = session.outputs.first()
                .map(|o| o.name.clone())
                .ok_or_else(|| InferenceError("No output defined".to_string()))?;

            Ok(Self {
                session: Mutex::new(session),
                output_name,
            })
        }
    }

    impl Regressor for OnnxRegressor {
        fn backend(&self) -> &'static str {
            "onnx"
        }

        fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
            let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
            let input_array = Array2::<f32>::from_shape_vec((1, row.len()), row)
                .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

            let input_tensor = Value::from_array(input_array)
                .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

            let mut session = self.session.lock();
            let outputs = session.run(ort::inputs![input_tensor])
                .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

            let output = outputs.get(&self.output_name)
                .ok_or_else(|| InferenceError("No output".to_string()))?;

            let (_, data) = output.try_extract_tensor::<f32>()
                .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

            data.first()
                .map(|&v| v as f64)
                .ok_or_else(|| InferenceError("Empty output tensor".to_string()))
        }
    }
}

//! Predictor - the one place a dose is computed
//!
//! Loaded once at startup. A missing or broken bundle leaves the predictor
//! in the "unavailable" state instead of failing the process.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::bundle::ModelBundle;
use crate::constants::{DOSE_DECIMALS, MODEL_NOT_LOADED};
use crate::logic::features::{FeatureVector, NamedFeatures};

// ============================================================================
// RESULT
// ============================================================================

/// Outcome of one prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Prediction {
    /// Dose rounded to two decimals
    Dose(f64),
    Unavailable,
    Failed(String),
}

impl Prediction {
    pub fn dose(&self) -> Option<f64> {
        match self {
            Self::Dose(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dose(v) => write!(f, "{}", v),
            Self::Unavailable => f.write_str(MODEL_NOT_LOADED),
            Self::Failed(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Round half away from zero to `DOSE_DECIMALS` places; `-0.0` becomes `0.0`
pub fn round_dose(value: f64) -> f64 {
    let scale = 10f64.powi(DOSE_DECIMALS);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

// ============================================================================
// STATUS
// ============================================================================

/// Engine status for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub backend: String,
    pub feature_count: usize,
    pub schema_hash: Option<u32>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// PREDICTOR
// ============================================================================

#[derive(Debug, Default)]
pub struct Predictor {
    bundle: Option<ModelBundle>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl Predictor {
    pub fn new(bundle: Option<ModelBundle>) -> Self {
        Self {
            bundle,
            ..Default::default()
        }
    }

    /// Predictor with no model; every request yields `Model not loaded`
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Load the bundle at `path`, degrading to unavailable on any error
    pub fn load(path: &Path) -> Self {
        match ModelBundle::load(path) {
            Ok(bundle) => {
                log::info!(
                    "Model '{}' loaded ({} backend, {} features, schema {:08x})",
                    bundle.metadata.model_name,
                    bundle.metadata.backend,
                    bundle.metadata.feature_count,
                    bundle.metadata.schema_hash
                );
                let unknown = bundle.schema.unknown_fields();
                if !unknown.is_empty() {
                    log::warn!("Model expects features the form never supplies, using 0.0: {:?}", unknown);
                }
                Self::new(Some(bundle))
            }
            Err(e) => {
                log::error!("Error loading model: {}", e);
                Self::unavailable()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    /// Order `named` per the model schema and run inference
    pub fn predict_named(&self, named: &NamedFeatures) -> Prediction {
        match &self.bundle {
            Some(bundle) => self.predict(&bundle.schema.assemble(named)),
            None => Prediction::Unavailable,
        }
    }

    /// Run inference on an already assembled vector
    pub fn predict(&self, vector: &FeatureVector) -> Prediction {
        let Some(bundle) = &self.bundle else {
            return Prediction::Unavailable;
        };

        if !vector.matches(&bundle.schema) {
            return Prediction::Failed(format!(
                "feature vector built for schema {:08x}, model expects {:08x}",
                vector.schema_hash,
                bundle.schema.hash()
            ));
        }

        log::debug!("Predicting on {}", vector.to_log_entry(&bundle.schema));

        let start_time = Instant::now();
        let result = bundle.regressor.predict(vector.as_slice());

        self.latency_sum_us.fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        match result {
            Ok(value) => Prediction::Dose(round_dose(value)),
            Err(e) => {
                log::warn!("Inference failed: {}", e);
                Prediction::Failed(e.to_string())
            }
        }
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        match &self.bundle {
            Some(bundle) => EngineStatus {
                model_loaded: true,
                model_name: bundle.metadata.model_name.clone(),
                backend: bundle.metadata.backend.clone(),
                feature_count: bundle.metadata.feature_count,
                schema_hash: Some(bundle.metadata.schema_hash),
                inference_count: count,
                avg_latency_ms: avg,
            },
            None => EngineStatus {
                model_loaded: false,
                model_name: "None".to_string(),
                backend: "none".to_string(),
                feature_count: 0,
                schema_hash: None,
                inference_count: count,
                avg_latency_ms: avg,
            },
        }
    }
}

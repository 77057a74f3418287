//! Model Bundle - manifest describing a trained model
//!
//! ```json
//! {
//!   "name": "insulin_predictor_final",
//!   "features": ["glucose_level", "adj_carbs_g", "..."],
//!   "model": { "type": "linear", "intercept": 0.4, "coefficients": [0.01, "..."] }
//! }
//! ```
//!
//! `"model": { "type": "onnx", "path": "insulin_predictor.onnx" }` is accepted
//! when the crate is built with the `onnx` feature. Relative paths resolve
//! against the manifest's directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::inference::{LinearRegressor, Regressor};
use crate::logic::features::FeatureSchema;

// ============================================================================
// MANIFEST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    #[serde(default)]
    pub name: Option<String>,
    pub features: FeatureSchema,
    pub model: ModelSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelSpec {
    Linear {
        coefficients: Vec<f64>,
        #[serde(default)]
        intercept: f64,
    },
    Onnx {
        path: PathBuf,
    },
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_name: String,
    pub manifest_path: String,
    pub backend: String,
    pub feature_count: usize,
    pub schema_hash: u32,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ModelLoadError {
    Io(String),
    Parse(String),
    /// Coefficient count differs from the declared feature count
    SchemaMismatch { features: usize, coefficients: usize },
    Unsupported(String),
    Backend(String),
}

impl std::fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "Cannot read model bundle: {}", msg),
            Self::Parse(msg) => write!(f, "Invalid model bundle: {}", msg),
            Self::SchemaMismatch { features, coefficients } => write!(
                f,
                "Model declares {} features but has {} coefficients",
                features, coefficients
            ),
            Self::Unsupported(msg) => write!(f, "Unsupported model: {}", msg),
            Self::Backend(msg) => write!(f, "Model backend error: {}", msg),
        }
    }
}

impl std::error::Error for ModelLoadError {}

// ============================================================================
// LOADED BUNDLE
// ============================================================================

/// A ready-to-run model plus the schema it was trained on
pub struct ModelBundle {
    pub regressor: Box<dyn Regressor>,
    pub schema: FeatureSchema,
    pub metadata: ModelMetadata,
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("backend", &self.regressor.backend())
            .field("schema", &self.schema)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl ModelBundle {
    /// Read and build the bundle described by the manifest at `path`
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ModelLoadError::Io(format!("{}: {}", path.display(), e)))?;
        let manifest: BundleManifest = serde_json::from_str(&content)
            .map_err(|e| ModelLoadError::Parse(e.to_string()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let regressor = build_regressor(&manifest, base_dir)?;

        let schema = manifest.features;
        let metadata = ModelMetadata {
            model_name: manifest.name.unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "model".to_string())
            }),
            manifest_path: path.display().to_string(),
            backend: regressor.backend().to_string(),
            feature_count: schema.len(),
            schema_hash: schema.hash(),
            loaded_at: Utc::now(),
        };

        Ok(Self { regressor, schema, metadata })
    }
}

fn build_regressor(manifest: &BundleManifest, base_dir: &Path) -> Result<Box<dyn Regressor>, ModelLoadError> {
    match &manifest.model {
        ModelSpec::Linear { coefficients, intercept } => {
            if coefficients.len() != manifest.features.len() {
                return Err(ModelLoadError::SchemaMismatch {
                    features: manifest.features.len(),
                    coefficients: coefficients.len(),
                });
            }
            Ok(Box::new(LinearRegressor::new(coefficients.clone(), *intercept)))
        }
        ModelSpec::Onnx { path } => build_onnx(&base_dir.join(path)),
    }
}

#[cfg(feature = "onnx")]
fn build_onnx(path: &Path) -> Result<Box<dyn Regressor>, ModelLoadError> {
    super::inference::OnnxRegressor::load(path)
        .map(|r| Box::new(r) as Box<dyn Regressor>)
        .map_err(|e| ModelLoadError::Backend(e.to_string()))
}

#[cfg(not(feature = "onnx"))]
fn build_onnx(path: &Path) -> Result<Box<dyn Regressor>, ModelLoadError> {
    Err(ModelLoadError::Unsupported(format!(
        "{} needs the `onnx` feature",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("bundle.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_linear_bundle() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{
            "name": "tiny",
            "features": ["glucose_level", "adj_carbs_g"],
            "model": {"type": "linear", "coefficients": [0.1, 0.01], "intercept": 1.0}
        }"#);

        let bundle = ModelBundle::load(&path).unwrap();
        assert_eq!(bundle.metadata.model_name, "tiny");
        assert_eq!(bundle.metadata.backend, "linear");
        assert_eq!(bundle.schema.len(), 2);
        assert_eq!(bundle.metadata.schema_hash, bundle.schema.hash());
    }

    #[test]
    fn test_name_defaults_to_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{
            "features": ["a"],
            "model": {"type": "linear", "coefficients": [1.0]}
        }"#);

        assert_eq!(ModelBundle::load(&path).unwrap().metadata.model_name, "bundle");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ModelBundle::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::Io(_)));
    }

    #[test]
    fn test_garbage_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "{ not json");
        assert!(matches!(ModelBundle::load(&path).unwrap_err(), ModelLoadError::Parse(_)));
    }

    #[test]
    fn test_coefficient_count_must_match_schema() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{
            "features": ["a", "b", "c"],
            "model": {"type": "linear", "coefficients": [1.0]}
        }"#);

        let err = ModelBundle::load(&path).unwrap_err();
        assert!(matches!(err, ModelLoadError::SchemaMismatch { features: 3, coefficients: 1 }));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_requires_feature() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{
            "features": ["a"],
            "model": {"type": "onnx", "path": "model.onnx"}
        }"#);

        assert!(matches!(ModelBundle::load(&path).unwrap_err(), ModelLoadError::Unsupported(_)));
    }
}

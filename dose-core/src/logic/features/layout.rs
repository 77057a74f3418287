//! Feature Layout - names the assembler produces and the model schema
//!
//! **The model decides the order.** The assembler emits a *named* mapping;
//! `FeatureSchema` reorders it into the list the trained bundle declares.
//!
//! ## Rules
//! 1. Schema field missing from the input → 0.0
//! 2. Input field missing from the schema → dropped
//! 3. Output length always equals the schema length

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// INPUT FEATURE NAMES
// ============================================================================

pub const GLUCOSE_LEVEL: &str = "glucose_level";
pub const ADJ_CARBS_G: &str = "adj_carbs_g";
pub const CARB_RATE_G_PER_HR: &str = "carb_rate_g_per_hr";
pub const S_IOB: &str = "sIOB";
pub const D_IOB: &str = "dIOB";
pub const WEIGHT_KG: &str = "weight_kg";
pub const MEDIAN_ICR: &str = "median_ICR";
pub const MEDIAN_ISF: &str = "median_ISF";
pub const MEAL_BREAKFAST: &str = "meal_breakfast";
pub const MEAL_LUNCH: &str = "meal_lunch";
pub const MEAL_DINNER: &str = "meal_dinner";
pub const MEAL_SNACK: &str = "meal_snack";

/// Every name the assembler can emit, in the order the training data used
pub const INPUT_FEATURES: &[&str] = &[
    GLUCOSE_LEVEL,       // 0: Blood glucose (mg/dL)
    ADJ_CARBS_G,         // 1: Accumulated calorie total from the meal step
    CARB_RATE_G_PER_HR,  // 2: Carbohydrate absorption rate
    S_IOB,               // 3: Short-acting insulin on board
    D_IOB,               // 4: Long-acting insulin on board
    WEIGHT_KG,           // 5: Body weight
    MEDIAN_ICR,          // 6: Insulin-to-carb ratio
    MEDIAN_ISF,          // 7: Insulin sensitivity factor
    MEAL_BREAKFAST,      // 8-11: one-hot meal category
    MEAL_LUNCH,
    MEAL_DINNER,
    MEAL_SNACK,
];

// ============================================================================
// MODEL SCHEMA
// ============================================================================

/// Ordered feature names declared by the model bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Schema matching `INPUT_FEATURES` one to one
    pub fn canonical() -> Self {
        Self::new(INPUT_FEATURES.iter().copied())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// CRC32 of the ordered names, used to spot schema drift in logs
    pub fn hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for name in &self.names {
            hasher.update(name.as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }

    /// Schema names the assembler never produces; these will always be 0.0
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| !INPUT_FEATURES.contains(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_feature_count() {
        assert_eq!(INPUT_FEATURES.len(), 12);
    }

    #[test]
    fn test_hash_depends_on_order() {
        let a = FeatureSchema::new(["glucose_level", "sIOB"]);
        let b = FeatureSchema::new(["sIOB", "glucose_level"]);
        assert_eq!(a.hash(), a.clone().hash());
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_index_of() {
        let schema = FeatureSchema::canonical();
        assert_eq!(schema.index_of(GLUCOSE_LEVEL), Some(0));
        assert_eq!(schema.index_of(MEAL_SNACK), Some(11));
        assert_eq!(schema.index_of("nonexistent"), None);
    }

    #[test]
    fn test_unknown_fields() {
        let schema = FeatureSchema::new(["glucose_level", "hba1c"]);
        assert_eq!(schema.unknown_fields(), vec!["hba1c"]);
        assert!(FeatureSchema::canonical().unknown_fields().is_empty());
    }

    #[test]
    fn test_schema_deserializes_from_list() {
        let schema: FeatureSchema = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(schema.names(), &["a".to_string(), "b".to_string()]);
    }
}

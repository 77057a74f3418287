//! Feature Vector - model-ordered input
//!
//! `NamedFeatures` is what the assembler knows; `FeatureVector` is what the
//! model receives. The only way from one to the other is
//! `FeatureSchema::assemble`, which enforces the layout rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::FeatureSchema;

// ============================================================================
// NAMED FEATURES
// ============================================================================

/// Feature name → value, before schema ordering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedFeatures {
    values: BTreeMap<String, f64>,
}

impl NamedFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Values in exactly the order of the schema they were assembled for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 of the schema used to build this vector
    pub schema_hash: u32,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check this vector was built for `schema`
    pub fn matches(&self, schema: &FeatureSchema) -> bool {
        self.schema_hash == schema.hash() && self.values.len() == schema.len()
    }

    /// Convert to JSON for debug logging
    pub fn to_log_entry(&self, schema: &FeatureSchema) -> serde_json::Value {
        serde_json::json!({
            "schema_hash": self.schema_hash,
            "named_values": schema.names().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.clone(), *value))
                .collect::<BTreeMap<_, _>>(),
        })
    }
}

impl FeatureSchema {
    /// Reorder `named` into this schema: absent fields → 0.0, extras dropped
    pub fn assemble(&self, named: &NamedFeatures) -> FeatureVector {
        FeatureVector {
            schema_hash: self.hash(),
            values: self
                .names()
                .iter()
                .map(|name| named.get(name).unwrap_or(0.0))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, f64)]) -> NamedFeatures {
        let mut named = NamedFeatures::new();
        for (name, value) in pairs {
            named.insert(name, *value);
        }
        named
    }

    #[test]
    fn test_assemble_follows_schema_order() {
        let schema = FeatureSchema::new(["b", "a"]);
        let vector = schema.assemble(&named(&[("a", 1.0), ("b", 2.0)]));
        assert_eq!(vector.values, vec![2.0, 1.0]);
        assert!(vector.matches(&schema));
    }

    #[test]
    fn test_assemble_fills_missing_with_zero() {
        let schema = FeatureSchema::new(["a", "missing", "b"]);
        let vector = schema.assemble(&named(&[("a", 1.0), ("b", 2.0)]));
        assert_eq!(vector.values, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_assemble_drops_extra_fields() {
        let schema = FeatureSchema::new(["a"]);
        let vector = schema.assemble(&named(&[("a", 1.0), ("extra", 9.0)]));
        assert_eq!(vector.values, vec![1.0]);
    }

    #[test]
    fn test_empty_schema_gives_empty_vector() {
        let vector = FeatureSchema::default().assemble(&named(&[("a", 1.0)]));
        assert!(vector.is_empty());
    }

    #[test]
    fn test_matches_rejects_other_schema() {
        let vector = FeatureSchema::new(["a", "b"]).assemble(&NamedFeatures::new());
        assert!(!vector.matches(&FeatureSchema::new(["b", "a"])));
    }

    #[test]
    fn test_to_log_entry() {
        let schema = FeatureSchema::new(["a"]);
        let vector = schema.assemble(&named(&[("a", 4.0)]));

        let log = vector.to_log_entry(&schema);
        assert_eq!(log["named_values"]["a"], 4.0);
        assert!(log["schema_hash"].as_u64().is_some());
    }
}

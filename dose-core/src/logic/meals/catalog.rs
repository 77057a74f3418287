//! Meal Catalog - category → item → calories
//!
//! Built once at startup and shared read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Item name → calories per serving
pub type MealItems = BTreeMap<String, u32>;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealCategory {
    /// Display order used by the meal selection page
    pub const ALL: [MealCategory; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];

    /// Name used in URLs and on pages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Snack => "Snack",
            Self::Dinner => "Dinner",
        }
    }

    /// Lowercase key used by the model's one-hot meal indicators
    pub fn key(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }

    /// Exact match on the display name (`"Breakfast"`), as used in URLs
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }

    /// Exact match on the lowercase key (`"breakfast"`), as sent by the predict form
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl std::fmt::Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CATALOG
// ============================================================================

const BREAKFAST: &[(&str, u32)] = &[
    ("Oatmeal", 150),
    ("Boiled Eggs", 78),
    ("Paratha", 250),
    ("Idli", 70),
    ("Dosa", 120),
    ("Poha", 200),
    ("Upma", 180),
    ("Bread Toast", 80),
    ("Paneer Bhurji", 220),
    ("Vegetable Sandwich", 160),
];

const LUNCH: &[(&str, u32)] = &[
    ("Chapati + Dal", 300),
    ("Rice + Rajma", 350),
    ("Rice + Chole", 360),
    ("Dal Khichdi", 250),
    ("Vegetable Pulao", 300),
    ("Chicken Curry", 400),
    ("Paneer Curry", 350),
];

const SNACK: &[(&str, u32)] = &[
    ("Samosa", 150),
    ("Kachori", 180),
    ("Sandwich", 200),
    ("Burger (small)", 250),
];

const DINNER: &[(&str, u32)] = &[
    ("Chapati + Dal", 300),
    ("Rice + Rajma", 350),
    ("Vegetable Curry + Roti", 320),
    ("Paneer Curry", 350),
    ("Chicken Curry", 400),
];

#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    categories: BTreeMap<MealCategory, MealItems>,
}

impl MealCatalog {
    /// The built-in catalog
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        for (category, items) in [
            (MealCategory::Breakfast, BREAKFAST),
            (MealCategory::Lunch, LUNCH),
            (MealCategory::Snack, SNACK),
            (MealCategory::Dinner, DINNER),
        ] {
            catalog.categories.insert(
                category,
                items.iter().map(|(name, kcal)| (name.to_string(), *kcal)).collect(),
            );
        }
        catalog
    }

    /// Items of a category by name; unknown category → empty mapping
    pub fn items_for(&self, category: &str) -> MealItems {
        MealCategory::from_name(category)
            .map(|c| self.items(c).clone())
            .unwrap_or_default()
    }

    /// Items of a known category
    pub fn items(&self, category: MealCategory) -> &MealItems {
        static EMPTY: MealItems = BTreeMap::new();
        self.categories.get(&category).unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_sizes() {
        let catalog = MealCatalog::standard();
        assert_eq!(catalog.items(MealCategory::Breakfast).len(), 10);
        assert_eq!(catalog.items(MealCategory::Lunch).len(), 7);
        assert_eq!(catalog.items(MealCategory::Snack).len(), 4);
        assert_eq!(catalog.items(MealCategory::Dinner).len(), 5);
    }

    #[test]
    fn test_items_for_known_category() {
        let items = MealCatalog::standard().items_for("Breakfast");
        assert_eq!(items.get("Oatmeal"), Some(&150));
        assert_eq!(items.get("Boiled Eggs"), Some(&78));
    }

    #[test]
    fn test_items_for_unknown_category_is_empty() {
        assert!(MealCatalog::standard().items_for("Brunch").is_empty());
        assert!(MealCatalog::standard().items_for("").is_empty());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(MealCategory::from_name("Dinner"), Some(MealCategory::Dinner));
        assert_eq!(MealCategory::from_name("snack"), None);
        assert_eq!(MealCategory::from_name("supper"), None);
        assert_eq!(MealCategory::from_key("lunch"), Some(MealCategory::Lunch));
        assert_eq!(MealCategory::from_key("Lunch"), None);
        assert_eq!(MealCategory::Lunch.key(), "lunch");
    }

    #[test]
    fn test_items_for_is_case_sensitive() {
        let catalog = MealCatalog::standard();
        assert!(catalog.items_for("breakfast").is_empty());
        assert!(catalog.items_for(" Lunch ").is_empty());
        assert!(catalog.items_for("LUNCH").is_empty());
        assert_eq!(catalog.items_for("Lunch").len(), 7);
    }

    #[test]
    fn test_missing_item_is_absent() {
        let catalog = MealCatalog::standard();
        assert_eq!(catalog.items(MealCategory::Snack).get("Samosa"), Some(&150));
        assert_eq!(catalog.items(MealCategory::Snack).get("Oatmeal"), None);
    }
}

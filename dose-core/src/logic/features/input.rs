//! Clinical Input - raw prediction form fields
//!
//! Every field arrives as free text. Coercion never fails: malformed,
//! absent or non-finite numbers read as 0.0.

use serde::Deserialize;

use super::layout::*;
use super::vector::NamedFeatures;
use crate::constants::DEFAULT_MEAL;
use crate::logic::meals::MealCategory;

/// Prediction form, field names as posted by the page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClinicalInput {
    pub glucose: Option<String>,
    pub carb_rate: Option<String>,
    #[serde(rename = "sIOB")]
    pub s_iob: Option<String>,
    #[serde(rename = "dIOB")]
    pub d_iob: Option<String>,
    pub weight: Option<String>,
    #[serde(rename = "ICR")]
    pub icr: Option<String>,
    #[serde(rename = "ISF")]
    pub isf: Option<String>,
    pub meal: Option<String>,
}

/// Lenient float parse
pub fn to_float(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl ClinicalInput {
    /// Meal category for the one-hot indicators; `None` when unrecognised
    pub fn meal_category(&self) -> Option<MealCategory> {
        MealCategory::from_key(self.meal.as_deref().unwrap_or(DEFAULT_MEAL))
    }

    /// Named feature mapping, `calories` being the session's running total
    pub fn named_features(&self, calories: f64) -> NamedFeatures {
        let mut named = NamedFeatures::new();

        named.insert(GLUCOSE_LEVEL, to_float(self.glucose.as_deref()));
        named.insert(ADJ_CARBS_G, if calories.is_finite() { calories } else { 0.0 });
        named.insert(CARB_RATE_G_PER_HR, to_float(self.carb_rate.as_deref()));
        named.insert(S_IOB, to_float(self.s_iob.as_deref()));
        named.insert(D_IOB, to_float(self.d_iob.as_deref()));
        named.insert(WEIGHT_KG, to_float(self.weight.as_deref()));
        named.insert(MEDIAN_ICR, to_float(self.icr.as_deref()));
        named.insert(MEDIAN_ISF, to_float(self.isf.as_deref()));

        let meal = self.meal_category();
        for (name, category) in [
            (MEAL_BREAKFAST, MealCategory::Breakfast),
            (MEAL_LUNCH, MealCategory::Lunch),
            (MEAL_DINNER, MealCategory::Dinner),
            (MEAL_SNACK, MealCategory::Snack),
        ] {
            named.insert(name, if meal == Some(category) { 1.0 } else { 0.0 });
        }

        named
    }
}

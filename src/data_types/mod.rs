pub mod campus_data_types;
pub mod openmensa_data_types;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MenuSource {
    Live,
    Cached,
    Canned,
}

impl MenuSource {
    pub fn label(&self) -> &'static str {
        match self {
            MenuSource::Live => "OpenMensa",
            MenuSource::Cached => "local cache",
            MenuSource::Canned => "built-in menu",
        }
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FitnessGoals {
    pub daily_calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub budget_goal_cents: Option<i64>,
    pub dietary_restrictions: Option<String>,
    pub preferred_cuisines: Option<String>,
}

#[derive(Serialize, Debug, Copy, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionLog {
    pub calories_consumed: i32,
    pub protein_consumed: i32,
    pub cents_spent: i64,
}

// remaining daily budget, may go negative when the user is over
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionBudget {
    pub calories_remaining: i32,
    pub protein_remaining: i32,
    pub budget_remaining_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct NutritionBreakdown {
    pub calories: u32,
    pub protein: u32,
    pub price: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortionRecommendation {
    pub meal_id: i64,
    pub meal_name: String,
    pub recommended_portion: f64,
    pub portion_in_grams: u32,
    pub reasoning: String,
    pub nutrition_breakdown: NutritionBreakdown,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortionReport {
    pub recommendations: Vec<PortionRecommendation>,
    pub ai_summary: String,
    pub daily_progress: NutritionBudget,
}

#[derive(Debug, Clone, Default)]
pub struct MealFilters {
    pub max_price_cents: Option<u32>,
    pub max_calories: Option<u32>,
    pub min_protein: Option<u32>,
    pub avoid_allergens: Vec<String>,
    pub required_labels: Vec<String>,
}

impl MealFilters {
    pub fn is_empty(&self) -> bool {
        self.max_price_cents.is_none()
            && self.max_calories.is_none()
            && self.min_protein.is_none()
            && self.avoid_allergens.is_empty()
            && self.required_labels.is_empty()
    }
}

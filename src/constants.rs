use std::sync::OnceLock;

pub static OPENMENSA_API_URL: OnceLock<String> = OnceLock::new();

pub const OPENMENSA_V2: &str = "https://openmensa.org/api/v2";
/// Mensa am Bildungscampus Heilbronn
pub const HEILBRONN_CANTEEN: u32 = 277;
pub const MENU_DB: &str = "menu-cache.sqlite";

pub static OLLAMA_HOST: OnceLock<Option<String>> = OnceLock::new();
pub static OLLAMA_MODEL: OnceLock<Option<String>> = OnceLock::new();

// daily goal defaults when the user never set one
pub const DEFAULT_CALORIE_GOAL: i32 = 2000;
pub const DEFAULT_PROTEIN_GOAL: i32 = 80;
pub const DEFAULT_BUDGET_CENTS: i64 = 1000;

// per-dish substitutes when upstream data is missing
pub const DEFAULT_MEAL_CALORIES: u32 = 500;
pub const DEFAULT_MEAL_PROTEIN: u32 = 20;
pub const DEFAULT_MEAL_PRICE_CENTS: u32 = 500;

pub const PORTION_MULTIPLIER_MIN: f64 = 0.5;
pub const PORTION_MULTIPLIER_MAX: f64 = 1.5;
// standard portion weight per kcal of the baseline estimate
pub const GRAMS_PER_KCAL: f64 = 0.6;

pub const LLM_TIMEOUT_SECS: u64 = 60;

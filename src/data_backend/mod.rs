use crate::data_types::openmensa_data_types::Dish;
use crate::data_types::{MealFilters, MenuSource};
use crate::db_operations;

use chrono::NaiveDate;
use tokio::time::Instant;

pub mod canned_parser;
pub mod openmensa_parser;

const VEGGIE_NOTES: [&str; 3] = ["vegetarisch", "vegetarian", "veggie"];
const LABEL_NOTES: [&str; 5] = ["vegetarisch", "vegetarian", "veggie", "vegan", "bio"];

/// Live menu if possible, else the cached day, else the built-in menu.
pub async fn fetch_menu(
    db: &str,
    date: NaiveDate,
    canteen_id: u32,
    offline: bool,
) -> (Vec<Dish>, MenuSource) {
    if offline {
        return (canned_parser::canned_menu(), MenuSource::Canned);
    }

    let now = Instant::now();
    match openmensa_parser::fetch_day_meals(date, canteen_id).await {
        Ok(dishes) => {
            log::debug!(target: "campus_companion_rs::Menu", "API data: {:.2?}", now.elapsed());
            if let Err(e) = db_operations::cache_menu(db, canteen_id, date, &dishes) {
                log::warn!(target: "campus_companion_rs::Menu", "Could not cache menu: {}", e);
            }
            (dishes, MenuSource::Live)
        }
        Err(e) => {
            log::warn!(target: "campus_companion_rs::Menu", "OpenMensa unavailable: {}", e);
            match db_operations::get_cached_menu(db, canteen_id, date) {
                Ok(Some(dishes)) => (dishes, MenuSource::Cached),
                _ => (canned_parser::canned_menu(), MenuSource::Canned),
            }
        }
    }
}

// rough kcal estimate from name + category, tuned for german mensa menus
pub(crate) fn estimate_calories(name: &str, category: &str) -> u32 {
    let name = name.to_lowercase();
    let category = category.to_lowercase();

    if category.contains("hauptgericht") || category.contains("main") {
        if name.contains("salat") || name.contains("salad") {
            return 350;
        }
        if name.contains("suppe") || name.contains("soup") {
            return 250;
        }
        if name.contains("pasta") || name.contains("nudel") {
            return 550;
        }
        if name.contains("pizza") {
            return 650;
        }
        if name.contains("burger") {
            return 700;
        }
        if name.contains("schnitzel") {
            return 600;
        }
        if name.contains("curry") {
            return 500;
        }
        if name.contains("reis") || name.contains("rice") {
            return 450;
        }
        return 500;
    }
    if category.contains("beilage") || category.contains("side") {
        return 200;
    }
    if category.contains("dessert") || category.contains("nachtisch") {
        return 250;
    }
    400
}

pub(crate) fn estimate_protein(name: &str) -> u32 {
    let name = name.to_lowercase();

    if name.contains("hähnchen") || name.contains("chicken") || name.contains("huhn") {
        return 35;
    }
    if name.contains("rind") || name.contains("beef") {
        return 30;
    }
    if name.contains("schwein") || name.contains("pork") {
        return 28;
    }
    if name.contains("fisch") || name.contains("fish") || name.contains("lachs") {
        return 32;
    }
    if name.contains("tofu") {
        return 20;
    }
    if name.contains("linsen") || name.contains("lentil") {
        return 18;
    }
    if name.contains("bohnen") || name.contains("bean") {
        return 15;
    }
    if name.contains("ei") || name.contains("egg") {
        return 13;
    }
    if name.contains("käse") || name.contains("cheese") {
        return 12;
    }
    if name.contains("pasta") || name.contains("nudel") {
        return 10;
    }
    if name.contains("salat") || name.contains("salad") {
        return 5;
    }
    if name.contains("gemüse") || name.contains("vegetable") {
        return 4;
    }
    8
}

pub(crate) fn has_vegetarian_note(notes: &[String]) -> bool {
    notes.iter().any(|note| {
        let note = note.to_lowercase();
        VEGGIE_NOTES.iter().any(|token| note.contains(token))
    })
}

pub(crate) fn has_vegan_note(notes: &[String]) -> bool {
    notes
        .iter()
        .any(|note| note.to_lowercase().contains("vegan"))
}

// openmensa lumps diet labels and allergen hints into one notes array
pub(crate) fn split_notes(notes: &[String]) -> (Vec<String>, Vec<String>) {
    let mut labels = Vec::new();
    let mut allergens = Vec::new();

    for note in notes {
        let lower = note.to_lowercase();
        if LABEL_NOTES.iter().any(|token| lower.contains(token)) {
            labels.push(note.clone());
        } else {
            allergens.push(note.clone());
        }
    }
    (labels, allergens)
}

pub fn filter_meals(dishes: Vec<Dish>, filters: &MealFilters) -> Vec<Dish> {
    dishes
        .into_iter()
        .filter(|dish| {
            if let Some(max_price) = filters.max_price_cents {
                if dish.price_cents > max_price {
                    return false;
                }
            }
            // estimate-based filters only apply when an estimate exists
            if let (Some(max), Some(calories)) = (filters.max_calories, dish.estimated_calories) {
                if calories > max {
                    return false;
                }
            }
            if let (Some(min), Some(protein)) = (filters.min_protein, dish.estimated_protein) {
                if protein < min {
                    return false;
                }
            }
            if !filters.avoid_allergens.is_empty() {
                let has_avoided = dish.allergens.iter().any(|allergen| {
                    filters
                        .avoid_allergens
                        .iter()
                        .any(|avoid| allergen.to_lowercase().contains(&avoid.to_lowercase()))
                });
                if has_avoided {
                    return false;
                }
            }
            if !filters.required_labels.is_empty() {
                let has_all = filters.required_labels.iter().all(|required| {
                    dish.labels
                        .iter()
                        .any(|label| label.to_lowercase().contains(&required.to_lowercase()))
                });
                if !has_all {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// 0..100 fit of a dish against daily goals, one meal counted as a third
/// of the day.
pub fn nutritional_score(dish: &Dish, calorie_goal: Option<i32>, protein_goal: Option<i32>) -> f64 {
    let mut score = 100.0;

    if let (Some(goal), Some(calories)) = (calorie_goal, dish.estimated_calories) {
        score -= (calories as f64 - goal as f64 / 3.0).abs() / 10.0;
    }
    if let (Some(goal), Some(protein)) = (protein_goal, dish.estimated_protein) {
        score -= (protein as f64 - goal as f64 / 3.0).abs() / 2.0;
    }

    score.clamp(0.0, 100.0)
}

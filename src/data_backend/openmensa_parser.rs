use crate::constants::OPENMENSA_API_URL;
use crate::data_backend::{
    estimate_calories, estimate_protein, has_vegan_note, has_vegetarian_note, split_notes,
};
use crate::data_types::openmensa_data_types::{Dish, OpenMensaMeal};

use anyhow::Result;
use chrono::NaiveDate;

pub async fn fetch_day_meals(date: NaiveDate, canteen_id: u32) -> Result<Vec<Dish>> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!(
            "{}/canteens/{}/days/{}/meals",
            OPENMENSA_API_URL.get().unwrap(),
            canteen_id,
            date.format("%Y-%m-%d")
        ))
        .send()
        .await?;

    // 404 means the canteen serves nothing that day
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        log::info!("OpenMensa has no menu for {}", date);
        return Ok(Vec::new());
    }

    let meals = res.error_for_status()?.json::<Vec<OpenMensaMeal>>().await?;
    Ok(meals.into_iter().map(enrich_meal).collect())
}

// attach nutrition estimates and split the notes array into labels/allergens
fn enrich_meal(meal: OpenMensaMeal) -> Dish {
    let price_cents = meal
        .prices
        .first_available()
        .map(|eur| (eur * 100.0).round() as u32)
        .unwrap_or(0);
    let (labels, allergens) = split_notes(&meal.notes);

    Dish {
        id: meal.id,
        price_cents,
        estimated_calories: Some(estimate_calories(&meal.name, &meal.category)),
        estimated_protein: Some(estimate_protein(&meal.name)),
        // vegan dishes count as vegetarian too
        is_vegetarian: has_vegetarian_note(&meal.notes) || has_vegan_note(&meal.notes),
        is_vegan: has_vegan_note(&meal.notes),
        labels,
        allergens,
        name: meal.name,
        category: meal.category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::openmensa_data_types::OpenMensaPrices;

    #[test]
    fn test_enrich_meal_converts_prices_to_cents() {
        let meal = OpenMensaMeal {
            id: 8150421,
            name: "Pasta Arrabiata".to_string(),
            category: "Hauptgericht".to_string(),
            prices: OpenMensaPrices {
                students: Some(2.95),
                employees: Some(4.25),
                pupils: None,
                others: None,
            },
            notes: vec!["vegan".to_string(), "Weizen".to_string()],
        };

        let dish = enrich_meal(meal);
        assert_eq!(dish.price_cents, 295);
        assert_eq!(dish.estimated_calories, Some(550));
        assert_eq!(dish.estimated_protein, Some(10));
        assert!(dish.is_vegan);
        assert!(dish.is_vegetarian);
        assert_eq!(dish.labels, vec!["vegan"]);
        assert_eq!(dish.allergens, vec!["Weizen"]);
    }

    #[test]
    fn test_enrich_meal_falls_through_price_roles() {
        let meal = OpenMensaMeal {
            id: 1,
            name: "Tagesgericht".to_string(),
            category: "Hauptgericht".to_string(),
            prices: OpenMensaPrices {
                students: None,
                employees: None,
                pupils: None,
                others: Some(5.5),
            },
            notes: Vec::new(),
        };
        assert_eq!(enrich_meal(meal).price_cents, 550);

        let free = OpenMensaMeal {
            id: 2,
            name: "Wasser".to_string(),
            category: "Getränk".to_string(),
            prices: OpenMensaPrices::default(),
            notes: Vec::new(),
        };
        assert_eq!(enrich_meal(free).price_cents, 0);
    }
}

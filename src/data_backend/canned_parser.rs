use crate::data_backend::{has_vegan_note, has_vegetarian_note};
use crate::data_types::openmensa_data_types::Dish;

fn dish(
    id: i64,
    name: &str,
    category: &str,
    price_cents: u32,
    calories: u32,
    protein: u32,
    allergens: &[&str],
    labels: &[&str],
) -> Dish {
    let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
    Dish {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price_cents,
        estimated_calories: Some(calories),
        estimated_protein: Some(protein),
        is_vegetarian: has_vegetarian_note(&labels) || has_vegan_note(&labels),
        is_vegan: has_vegan_note(&labels),
        allergens: allergens.iter().map(|s| s.to_string()).collect(),
        labels,
    }
}

/// Fixed menu served when neither OpenMensa nor the cache can deliver.
/// Deliberately deterministic so offline runs stay reproducible.
pub fn canned_menu() -> Vec<Dish> {
    vec![
        dish(
            1,
            "Hähnchenbrust mit Reis und Gemüse",
            "Hauptgericht",
            395,
            520,
            42,
            &["Gluten"],
            &[],
        ),
        dish(
            2,
            "Vegetarische Lasagne",
            "Hauptgericht",
            350,
            480,
            18,
            &["Gluten", "Milch", "Ei"],
            &["Vegetarisch"],
        ),
        dish(
            3,
            "Vegane Buddha Bowl mit Quinoa",
            "Hauptgericht",
            420,
            450,
            15,
            &["Sesam"],
            &["Vegan", "Bio"],
        ),
        dish(
            4,
            "Schweinebraten mit Kartoffeln und Soße",
            "Hauptgericht",
            410,
            680,
            38,
            &["Gluten"],
            &[],
        ),
        dish(
            5,
            "Pasta Arrabiata",
            "Hauptgericht",
            290,
            420,
            12,
            &["Gluten"],
            &["Vegan"],
        ),
        dish(6, "Tomatensuppe", "Suppe", 150, 120, 3, &[], &["Vegan"]),
        dish(
            7,
            "Kürbissuppe",
            "Suppe",
            150,
            140,
            4,
            &["Milch"],
            &["Vegetarisch"],
        ),
        dish(
            8,
            "Großer gemischter Salat",
            "Salat",
            320,
            180,
            8,
            &[],
            &["Vegan", "Bio"],
        ),
        dish(
            9,
            "Caesar Salad",
            "Salat",
            380,
            320,
            22,
            &["Gluten", "Milch", "Ei", "Fisch"],
            &[],
        ),
        dish(
            10,
            "Apfelstrudel",
            "Dessert",
            180,
            280,
            4,
            &["Gluten", "Milch", "Ei"],
            &["Vegetarisch"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_menu_is_complete() {
        let menu = canned_menu();
        assert_eq!(menu.len(), 10);

        // ids unique, every dish priced and estimated
        let mut ids: Vec<i64> = menu.iter().map(|d| d.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
        assert!(menu.iter().all(|d| d.price_cents > 0));
        assert!(menu.iter().all(|d| d.estimated_calories.is_some()));
        assert!(menu.iter().all(|d| d.estimated_protein.is_some()));
    }

    #[test]
    fn test_canned_menu_diet_flags() {
        let menu = canned_menu();
        let bowl = menu.iter().find(|d| d.name.contains("Buddha")).unwrap();
        assert!(bowl.is_vegan);
        assert!(bowl.is_vegetarian);
        let lasagne = menu.iter().find(|d| d.name.contains("Lasagne")).unwrap();
        assert!(lasagne.is_vegetarian);
        assert!(!lasagne.is_vegan);
        let braten = menu.iter().find(|d| d.name.contains("Schweine")).unwrap();
        assert!(!braten.is_vegetarian);
    }

    #[test]
    fn test_canned_menu_is_deterministic() {
        assert_eq!(canned_menu(), canned_menu());
    }
}

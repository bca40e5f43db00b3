use serde::{Deserialize, Serialize};

// wire shape of /canteens/{id}/days/{date}/meals
#[derive(Serialize, Deserialize, Debug)]
pub struct OpenMensaMeal {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub prices: OpenMensaPrices,
    pub notes: Vec<String>,
}

// per-role prices in EUR, any of them may be null
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct OpenMensaPrices {
    pub students: Option<f64>,
    pub employees: Option<f64>,
    pub pupils: Option<f64>,
    pub others: Option<f64>,
}

impl OpenMensaPrices {
    pub fn first_available(&self) -> Option<f64> {
        self.students
            .or(self.employees)
            .or(self.pupils)
            .or(self.others)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// price in cents, 0 when upstream sent none
    pub price_cents: u32,
    pub estimated_calories: Option<u32>,
    pub estimated_protein: Option<u32>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub labels: Vec<String>,
    pub allergens: Vec<String>,
}

use crate::constants::{
    DEFAULT_BUDGET_CENTS, DEFAULT_CALORIE_GOAL, DEFAULT_MEAL_CALORIES, DEFAULT_MEAL_PRICE_CENTS,
    DEFAULT_MEAL_PROTEIN, DEFAULT_PROTEIN_GOAL, GRAMS_PER_KCAL, LLM_TIMEOUT_SECS, OLLAMA_HOST,
    OLLAMA_MODEL, PORTION_MULTIPLIER_MAX, PORTION_MULTIPLIER_MIN,
};
use crate::data_types::openmensa_data_types::Dish;
use crate::data_types::{
    ConsumptionLog, FitnessGoals, NutritionBreakdown, NutritionBudget, PortionRecommendation,
    PortionReport,
};
use crate::errors::RecommendError;

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

// the model replies with the report minus the budget snapshot
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LlmReportReply {
    recommendations: Vec<PortionRecommendation>,
    ai_summary: String,
}

/// What is left of the daily goals after today's consumption. Unset goals
/// fall back to the stock 2000 kcal / 80 g / 10 € plan; values go negative
/// once the user is over.
pub fn remaining_budget(goals: &FitnessGoals, history: &ConsumptionLog) -> NutritionBudget {
    NutritionBudget {
        calories_remaining: goals.daily_calorie_goal.unwrap_or(DEFAULT_CALORIE_GOAL)
            - history.calories_consumed,
        protein_remaining: goals.protein_goal.unwrap_or(DEFAULT_PROTEIN_GOAL)
            - history.protein_consumed,
        budget_remaining_cents: goals.budget_goal_cents.unwrap_or(DEFAULT_BUDGET_CENTS)
            - history.cents_spent,
    }
}

/// Deterministic portion sizing: scale the dish towards the remaining
/// calorie budget, clamped to half..one-and-a-half portions.
pub fn fallback_recommendation(dish: &Dish, calories_remaining: i32) -> PortionRecommendation {
    // a zero estimate would divide the budget by zero
    let baseline_kcal = match dish.estimated_calories {
        Some(kcal) if kcal > 0 => kcal,
        _ => DEFAULT_MEAL_CALORIES,
    };
    let baseline_protein = match dish.estimated_protein {
        Some(protein) if protein > 0 => protein,
        _ => DEFAULT_MEAL_PROTEIN,
    };
    let baseline_price = if dish.price_cents > 0 {
        dish.price_cents
    } else {
        DEFAULT_MEAL_PRICE_CENTS
    };

    let multiplier = (calories_remaining as f64 / baseline_kcal as f64)
        .clamp(PORTION_MULTIPLIER_MIN, PORTION_MULTIPLIER_MAX);

    PortionRecommendation {
        meal_id: dish.id,
        meal_name: dish.name.clone(),
        recommended_portion: multiplier,
        // grams describe the standard portion, not the scaled one
        portion_in_grams: (baseline_kcal as f64 * GRAMS_PER_KCAL).round() as u32,
        reasoning: format!(
            "Based on your remaining {} kcal budget for today.",
            calories_remaining
        ),
        nutrition_breakdown: NutritionBreakdown {
            calories: (baseline_kcal as f64 * multiplier).round() as u32,
            protein: (baseline_protein as f64 * multiplier).round() as u32,
            price: (baseline_price as f64 * multiplier).round() as u32,
        },
    }
}

pub fn fallback_report(dishes: &[Dish], budget: NutritionBudget) -> PortionReport {
    PortionReport {
        recommendations: dishes
            .iter()
            .map(|dish| fallback_recommendation(dish, budget.calories_remaining))
            .collect(),
        ai_summary: "Portion recommendations based on your remaining daily calorie budget."
            .to_string(),
        daily_progress: budget,
    }
}

fn build_prompt(dishes: &[Dish], goals: &FitnessGoals, budget: &NutritionBudget) -> String {
    let menu_json = serde_json::to_string_pretty(dishes).unwrap_or_else(|_| "[]".to_string());

    let mut constraints = String::new();
    if let Some(restrictions) = &goals.dietary_restrictions {
        constraints += &format!("Dietary restrictions: {}.\n", restrictions);
    }
    if let Some(cuisines) = &goals.preferred_cuisines {
        constraints += &format!("Preferred cuisines: {}.\n", cuisines);
    }

    format!(
        "You are a nutrition assistant for a student canteen.\n\
        Remaining budget today: {} kcal, {} g protein, {} cents.\n\
        {}Today's menu as JSON:\n{}\n\n\
        Recommend a portion multiplier between 0.5 and 1.5 for EVERY dish \
        (1.0 is a standard portion) so the user stays inside the budget.\n\
        Reply ONLY with JSON matching this schema. NO explanation:\n\
        {{\"recommendations\":[{{\"mealId\":1,\"mealName\":\"...\",\
        \"recommendedPortion\":1.0,\"portionInGrams\":300,\"reasoning\":\"...\",\
        \"nutritionBreakdown\":{{\"calories\":500,\"protein\":20,\"price\":400}}}}],\
        \"aiSummary\":\"...\"}}",
        budget.calories_remaining,
        budget.protein_remaining,
        budget.budget_remaining_cents,
        constraints,
        menu_json
    )
}

// models love to wrap JSON in prose or markdown fences
fn extract_reply_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn parse_reply(
    raw: &str,
    menu_len: usize,
    budget: NutritionBudget,
) -> Result<PortionReport, RecommendError> {
    let json_str = extract_reply_json(raw)
        .ok_or_else(|| RecommendError::MalformedReply("no JSON object in reply".to_string()))?;

    let reply: LlmReportReply = serde_json::from_str(json_str)
        .map_err(|e| RecommendError::MalformedReply(e.to_string()))?;

    if menu_len > 0 && reply.recommendations.is_empty() {
        return Err(RecommendError::MalformedReply(
            "empty recommendation list".to_string(),
        ));
    }
    for rec in &reply.recommendations {
        if !(PORTION_MULTIPLIER_MIN..=PORTION_MULTIPLIER_MAX).contains(&rec.recommended_portion) {
            return Err(RecommendError::MalformedReply(format!(
                "portion multiplier {} out of range",
                rec.recommended_portion
            )));
        }
    }

    Ok(PortionReport {
        recommendations: reply.recommendations,
        ai_summary: reply.ai_summary,
        daily_progress: budget,
    })
}

async fn ai_portion_report(
    dishes: &[Dish],
    goals: &FitnessGoals,
    budget: NutritionBudget,
) -> Result<PortionReport, RecommendError> {
    let host = OLLAMA_HOST.get().and_then(|host| host.as_deref());
    let model = OLLAMA_MODEL.get().and_then(|model| model.as_deref());
    let (host, model) = match (host, model) {
        (Some(host), Some(model)) => (host, model),
        _ => {
            log::warn!(target: "campus_companion_rs::Recommend", "Ollama API is unconfigured, cannot ask for portions");
            return Err(RecommendError::LlmUnconfigured);
        }
    };

    let params = json!(
        {
            "model": model,
            "prompt": build_prompt(dishes, goals, &budget),
            "stream": false,
            "keep_alive": -1
        }
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(LLM_TIMEOUT_SECS))
        .build()?;

    let now = Instant::now();
    let res = client
        .post(format!("{}/generate", host))
        .body(params.to_string())
        .send()
        .await?;
    let raw = res.text().await?;
    log::debug!(target: "campus_companion_rs::Recommend", "Ollama call: {:.2?}", now.elapsed());

    #[derive(Deserialize, Debug)]
    struct LlamaResponse {
        response: String,
    }

    let llama: LlamaResponse = serde_json::from_str(&raw)
        .map_err(|e| RecommendError::MalformedReply(format!("not an Ollama reply: {}", e)))?;

    log::debug!(target: "campus_companion_rs::Recommend", "AI response: '{}'", llama.response);

    parse_reply(&llama.response, dishes.len(), budget)
}

/// Total: any failure of the AI path degrades to the deterministic
/// heuristic, never to an error.
pub async fn generate_portion_recommendations(
    dishes: &[Dish],
    goals: &FitnessGoals,
    history: &ConsumptionLog,
) -> PortionReport {
    let budget = remaining_budget(goals, history);

    match ai_portion_report(dishes, goals, budget).await {
        Ok(report) => report,
        Err(e) => {
            log::warn!(target: "campus_companion_rs::Recommend", "AI portions unavailable, using heuristic: {}", e);
            fallback_report(dishes, budget)
        }
    }
}

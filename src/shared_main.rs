use chrono::{Local, NaiveDate};

use crate::campus_locations;
use crate::data_types::campus_data_types::ParsedCourse;
use crate::data_types::openmensa_data_types::Dish;
use crate::data_types::{MenuSource, PortionReport};

pub fn logger_init(module_path: &str) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module_path,
            if std::env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}

/// German price format, signed so negative budgets render too.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}{},{:02} €", sign, cents / 100, cents % 100)
}

pub fn render_courses(courses: &[ParsedCourse], date: NaiveDate) -> String {
    let mut msg = format!("Timetable {}\n", date.format("%A, %d.%m.%Y"));

    let mut todays: Vec<&ParsedCourse> = courses
        .iter()
        .filter(|course| course.start_time.with_timezone(&Local).date_naive() == date)
        .collect();
    todays.sort_by_key(|course| course.start_time);

    if todays.is_empty() {
        msg += "  No classes on this day.\n";
        return msg;
    }

    for course in todays {
        let start = course.start_time.with_timezone(&Local);
        let end = course.end_time.with_timezone(&Local);
        msg += &format!(
            " • {}-{} {}\n",
            start.format("%H:%M"),
            end.format("%H:%M"),
            course.course_name
        );

        if let Some(place) = course.room_number.as_ref().or(course.location.as_ref()) {
            msg += &format!("   {}", place);
            if let Some(building) = &course.building_name {
                msg += &format!(" ({})", building);
            }
            msg += "\n";
        }
        let address = course
            .location
            .as_deref()
            .and_then(campus_locations::resolve_full_address)
            .or_else(|| {
                // facility-code-only locations carry no leading room code
                course
                    .location
                    .as_deref()
                    .and_then(campus_locations::resolve_facility_code)
                    .map(|building| building.full_address)
            });
        if let Some(address) = address {
            msg += &format!("   {}\n", address);
        }
    }
    msg
}

pub fn render_menu(dishes: &[Dish], source: MenuSource, date: NaiveDate) -> String {
    let mut msg = format!(
        "Menu {} ({})\n",
        date.format("%A, %d.%m.%Y"),
        source.label()
    );

    if dishes.is_empty() {
        msg += "  The canteen serves nothing on this day.\n";
        return msg;
    }

    for dish in dishes {
        msg += &format!(" • {} [{}]", dish.name, dish.category);
        if dish.is_vegan {
            msg += " (vegan)";
        } else if dish.is_vegetarian {
            msg += " (vegetarian)";
        }
        msg += "\n";

        msg += &format!("   {}", format_price(dish.price_cents as i64));
        if let (Some(kcal), Some(protein)) = (dish.estimated_calories, dish.estimated_protein) {
            msg += &format!(", ~{} kcal, ~{} g protein", kcal, protein);
        }
        msg += "\n";

        if !dish.allergens.is_empty() {
            msg += &format!("   Allergens: {}\n", dish.allergens.join(", "));
        }
    }
    msg
}

pub fn render_recommendations(report: &PortionReport) -> String {
    let mut msg = String::from("Portion recommendations\n");

    let budget = &report.daily_progress;
    msg += &format!(
        "  Remaining today: {} kcal, {} g protein, {}\n",
        budget.calories_remaining,
        budget.protein_remaining,
        format_price(budget.budget_remaining_cents)
    );

    for rec in &report.recommendations {
        msg += &format!(
            " • {}: {:.1}x portion (~{} g)\n",
            rec.meal_name, rec.recommended_portion, rec.portion_in_grams
        );
        msg += &format!(
            "   {} kcal, {} g protein, {}\n",
            rec.nutrition_breakdown.calories,
            rec.nutrition_breakdown.protein,
            format_price(rec.nutrition_breakdown.price as i64)
        );
        msg += &format!("   {}\n", rec.reasoning);
    }

    msg += &format!("\n{}\n", report.ai_summary);
    msg
}

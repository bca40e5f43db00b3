use campus_companion_rs::campus_locations::validate_building_table;
use campus_companion_rs::constants::{
    HEILBRONN_CANTEEN, MENU_DB, OLLAMA_HOST, OLLAMA_MODEL, OPENMENSA_API_URL, OPENMENSA_V2,
};
use campus_companion_rs::course_import::parse_course_calendar;
use campus_companion_rs::data_backend::{fetch_menu, filter_meals, nutritional_score};
use campus_companion_rs::data_types::{ConsumptionLog, FitnessGoals, MealFilters};
use campus_companion_rs::db_operations::check_or_create_db_tables;
use campus_companion_rs::recommendation::generate_portion_recommendations;
use campus_companion_rs::shared_main::{
    logger_init, render_courses, render_menu, render_recommendations,
};

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::log_enabled;
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

/// Daily campus briefing for the Bildungscampus: timetable with resolved
/// buildings, the mensa menu and portion recommendations sized to the
/// remaining calorie budget.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a timetable export (.ics) to fold into the briefing
    #[arg(short, long, env = "CAMPUS_ICS")]
    ics: Option<PathBuf>,

    /// Day to brief for (YYYY-MM-DD){n}[default: today]
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// OpenMensa canteen id{n}277 is the Mensa am Bildungscampus
    #[arg(short, long, env = "CANTEEN_ID", default_value_t = HEILBRONN_CANTEEN)]
    canteen: u32,

    /// Daily calorie goal in kcal{n}[unset: 2000]
    #[arg(long, env = "CALORIE_GOAL")]
    calorie_goal: Option<i32>,

    /// Daily protein goal in grams{n}[unset: 80]
    #[arg(long, env = "PROTEIN_GOAL")]
    protein_goal: Option<i32>,

    /// Daily food budget in cents{n}[unset: 1000]
    #[arg(long, env = "BUDGET_CENTS")]
    budget_cents: Option<i64>,

    /// Calories already eaten today
    #[arg(long, env = "CALORIES_CONSUMED", default_value_t = 0)]
    calories_consumed: i32,

    /// Protein already eaten today, in grams
    #[arg(long, env = "PROTEIN_CONSUMED", default_value_t = 0)]
    protein_consumed: i32,

    /// Cents already spent today
    #[arg(long, env = "CENTS_SPENT", default_value_t = 0)]
    cents_spent: i64,

    /// Hide dishes above this price (cents)
    #[arg(long)]
    max_price: Option<u32>,

    /// Only show vegetarian dishes (vegan counts as vegetarian)
    #[arg(long)]
    vegetarian: bool,

    /// Only show vegan dishes
    #[arg(long)]
    vegan: bool,

    /// Skip OpenMensa and serve the built-in menu
    #[arg(long)]
    offline: bool,

    /// Enable verbose logging (mostly performance metrics){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,

    /// Ollama API host for AI portion sizing{n}Example: <http://127.0.0.1:11434/api>
    #[arg(long, env = "OLLAMA_HOST")]
    ollama_host: Option<String>,

    /// Ollama model for inference{n}Example: 'llama3:latest'
    #[arg(long, env = "OLLAMA_MODEL")]
    ollama_model: Option<String>,

    /// Menu cache database file
    #[arg(long, env = "DB_FILENAME", default_value = MENU_DB)]
    db: String,
}

#[tokio::main]
async fn main() {
    OPENMENSA_API_URL.set(OPENMENSA_V2.to_string()).unwrap();

    //// Args setup
    let args = Args::parse();
    OLLAMA_HOST.set(args.ollama_host.clone()).unwrap();
    OLLAMA_MODEL.set(args.ollama_model.clone()).unwrap();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());
    log::info!("Starting campus companion...");

    if !(log_enabled!(log::Level::Debug) || log_enabled!(log::Level::Trace)) {
        log::info!("Enable verbose logging for performance metrics");
    }

    if let Err(e) = validate_building_table() {
        log::error!("Campus building table is broken: {}", e);
        exit(1);
    }

    //// DB setup
    if let Err(e) = check_or_create_db_tables(&args.db) {
        log::error!("Could not open menu cache '{}': {}", args.db, e);
        exit(1);
    }

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut briefing = String::new();

    //// timetable
    if let Some(ics_path) = &args.ics {
        match std::fs::read_to_string(ics_path) {
            Ok(ics_text) => match parse_course_calendar(&ics_text) {
                Ok(courses) => {
                    log::info!(target: "campus_companion_rs::Import", "{} courses in '{}'", courses.len(), ics_path.display());
                    briefing += &render_courses(&courses, date);
                    briefing += "\n";
                }
                Err(e) => {
                    log::error!(target: "campus_companion_rs::Import", "Unreadable calendar '{}': {}", ics_path.display(), e);
                }
            },
            Err(e) => {
                log::error!(target: "campus_companion_rs::Import", "Could not read '{}': {}", ics_path.display(), e);
            }
        }
    }

    //// menu
    let (dishes, source) = fetch_menu(&args.db, date, args.canteen, args.offline).await;
    log::info!(target: "campus_companion_rs::Menu", "{} dishes ({})", dishes.len(), source.label());

    let filters = MealFilters {
        max_price_cents: args.max_price,
        ..Default::default()
    };
    let mut dishes = if filters.is_empty() {
        dishes
    } else {
        let before = dishes.len();
        let kept = filter_meals(dishes, &filters);
        log::debug!(target: "campus_companion_rs::Menu", "Filters kept {}/{} dishes", kept.len(), before);
        kept
    };
    if args.vegan {
        dishes.retain(|dish| dish.is_vegan);
    } else if args.vegetarian {
        dishes.retain(|dish| dish.is_vegetarian);
    }

    briefing += &render_menu(&dishes, source, date);

    //// recommendations
    let goals = FitnessGoals {
        daily_calorie_goal: args.calorie_goal,
        protein_goal: args.protein_goal,
        budget_goal_cents: args.budget_cents,
        dietary_restrictions: if args.vegan {
            Some("vegan".to_string())
        } else if args.vegetarian {
            Some("vegetarian".to_string())
        } else {
            None
        },
        preferred_cuisines: None,
    };
    let history = ConsumptionLog {
        calories_consumed: args.calories_consumed,
        protein_consumed: args.protein_consumed,
        cents_spent: args.cents_spent,
    };

    if !dishes.is_empty() {
        if goals.daily_calorie_goal.is_some() || goals.protein_goal.is_some() {
            if let Some(best) = dishes.iter().max_by(|a, b| {
                nutritional_score(a, goals.daily_calorie_goal, goals.protein_goal)
                    .total_cmp(&nutritional_score(b, goals.daily_calorie_goal, goals.protein_goal))
            }) {
                log::info!(target: "campus_companion_rs::Menu", "Best goal fit: {}", best.name);
            }
        }

        let now = Instant::now();
        let report = generate_portion_recommendations(&dishes, &goals, &history).await;
        log::debug!(target: "campus_companion_rs::Recommend", "Report built: {:.2?}", now.elapsed());

        briefing += "\n";
        briefing += &render_recommendations(&report);
    }

    print!("{}", briefing);
}

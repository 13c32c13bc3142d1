use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use grocery_planner_rs::catalog::{MealSources, build_ingredient_catalog, load_meals};
use grocery_planner_rs::cli::Cli;
use grocery_planner_rs::error::Result;
use grocery_planner_rs::interface::display_plan;
use grocery_planner_rs::logging;
use grocery_planner_rs::planner::plan_groceries;
use grocery_planner_rs::state::{load_records, save_report, write_grocery_csv};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbosity(), cli.log_file.as_deref())?;

    let config = cli.plan_config()?;

    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let catalog = build_ingredient_catalog(&load_records(&cli.ingredients)?)?;
    let sources = MealSources {
        meals: &cli.meals,
        pre_workout: cli.pre_workout.as_deref(),
        post_workout: cli.post_workout.as_deref(),
    };
    let meals = load_meals(sources, &catalog, &mut rng)?;

    info!(
        "Planning {} day(s) at {:.0} kcal/day, diet: {}, workouts: {}",
        cli.days, cli.kcal, config.diet, config.workout_count
    );

    let report = plan_groceries(meals, &config, &mut rng)?;

    display_plan(&report);
    save_report(&cli.output, &report)?;
    if let Some(path) = &cli.csv {
        write_grocery_csv(path, &report.grocery_list)?;
    }

    Ok(())
}

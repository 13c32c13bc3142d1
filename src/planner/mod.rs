pub mod calculations;
pub mod constants;
pub mod diet;
pub mod grocery;
pub mod selection;

pub use calculations::{
    FatFormula, calculate_macros, is_gram_amount, resolve_macros, usage_contribution,
};
pub use constants::*;
pub use diet::{DietMode, DietThresholds, carb_ratio, filter_meals, passes_diet};
pub use grocery::{aggregate_groceries, aggregate_watch_list, build_report};
pub use selection::{
    MealPools, NoRefinement, PlanRefiner, TrimOvershoot, partition_meals, select_plan,
};

use rand::Rng;
use tracing::info;

use crate::config::PlanConfig;
use crate::error::{PlannerError, Result};
use crate::models::{Meal, Plan, PlanReport};

/// Run the planning pipeline on resolved meals.
///
/// Computes macros, applies the diet filter, selects meals toward
/// `config.target_kcal` and returns the plan.
pub fn generate_plan<R: Rng + ?Sized>(
    mut meals: Vec<Meal>,
    config: &PlanConfig,
    rng: &mut R,
) -> Result<Plan> {
    if meals.is_empty() {
        return Err(PlannerError::NoMeals);
    }

    for meal in &mut meals {
        resolve_macros(meal, config.fat_formula);
    }

    let meals = filter_meals(meals, config.diet, &config.thresholds);

    info!(
        "Planning {:.0} kcal (+/- {:.0}) from {} meals",
        config.target_kcal,
        KCAL_TOLERANCE,
        meals.len()
    );

    let refiner: &dyn PlanRefiner = if config.trim_overshoot {
        &TrimOvershoot
    } else {
        &NoRefinement
    };
    select_plan(meals, config.workout_count, config.target_kcal, refiner, rng)
}

/// [`generate_plan`] followed by grocery aggregation.
pub fn plan_groceries<R: Rng + ?Sized>(
    meals: Vec<Meal>,
    config: &PlanConfig,
    rng: &mut R,
) -> Result<PlanReport> {
    let plan = generate_plan(meals, config, rng)?;
    Ok(build_report(&plan, config.target_kcal))
}

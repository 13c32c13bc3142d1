use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{Meal, Plan, WorkoutTag};
use crate::planner::constants::KCAL_TOLERANCE;

/// Meals split by workout tag.
#[derive(Debug, Clone, Default)]
pub struct MealPools {
    pub regular: Vec<Meal>,
    pub pre: Vec<Meal>,
    pub post: Vec<Meal>,
}

/// Partition meals into regular, pre- and post-workout pools.
pub fn partition_meals(meals: Vec<Meal>) -> MealPools {
    let mut pools = MealPools::default();
    for meal in meals {
        match meal.workout {
            WorkoutTag::None => pools.regular.push(meal),
            WorkoutTag::Pre => pools.pre.push(meal),
            WorkoutTag::Post => pools.post.push(meal),
        }
    }
    debug!(
        "Pools: {} regular, {} pre-workout, {} post-workout",
        pools.regular.len(),
        pools.pre.len(),
        pools.post.len()
    );
    pools
}

/// Post-processing hook for plans that overshoot the tolerance band.
pub trait PlanRefiner {
    fn refine(&self, plan: Plan, target_kcal: f64, tolerance: f64) -> Plan;
}

/// Leaves the plan untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefinement;

impl PlanRefiner for NoRefinement {
    fn refine(&self, plan: Plan, _target_kcal: f64, _tolerance: f64) -> Plan {
        plan
    }
}

/// Drops regular meals, latest first, while the plan is above the band
/// and the drop keeps it at or above the lower bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimOvershoot;

impl PlanRefiner for TrimOvershoot {
    fn refine(&self, mut plan: Plan, target_kcal: f64, tolerance: f64) -> Plan {
        let lower = target_kcal - tolerance;
        let upper = target_kcal + tolerance;

        while plan.total_kcal > upper {
            let candidate = plan.meals.iter().rposition(|m| {
                m.workout == WorkoutTag::None
                    && m.kcal() > 0.0
                    && plan.total_kcal - m.kcal() >= lower
            });
            let Some(index) = candidate else {
                break;
            };
            let removed = plan.remove(index);
            debug!(
                "Trimmed '{}' ({:.0} kcal), plan now {:.0} kcal",
                removed.name,
                removed.kcal(),
                plan.total_kcal
            );
        }
        plan
    }
}

/// Draw `count` meals with replacement from a workout pool.
fn draw_workout_meals<R: Rng + ?Sized>(
    plan: &mut Plan,
    pool: &[Meal],
    count: usize,
    rng: &mut R,
) {
    for _ in 0..count {
        if let Some(meal) = pool.choose(rng) {
            debug!("Workout slot: '{}'", meal.name);
            plan.push(meal.clone());
        }
    }
}

/// Greedily sample meals until the plan reaches the target's lower bound.
///
/// `workout_count` post-workout meals are drawn first and count toward the
/// target; the same number of pre-workout meals are appended last and do
/// not. Regular meals are drawn without replacement, and the pool is
/// refilled (with a warning) whenever it runs dry.
pub fn select_plan<R: Rng + ?Sized>(
    meals: Vec<Meal>,
    workout_count: usize,
    target_kcal: f64,
    refiner: &dyn PlanRefiner,
    rng: &mut R,
) -> Result<Plan> {
    let pools = partition_meals(meals);

    if workout_count > 0 {
        if pools.post.is_empty() {
            return Err(PlannerError::EmptyWorkoutPool(WorkoutTag::Post));
        }
        if pools.pre.is_empty() {
            return Err(PlannerError::EmptyWorkoutPool(WorkoutTag::Pre));
        }
    }

    let mut plan = Plan::new();
    draw_workout_meals(&mut plan, &pools.post, workout_count, rng);

    let lower = target_kcal - KCAL_TOLERANCE;
    let upper = target_kcal + KCAL_TOLERANCE;

    if plan.total_kcal < lower && !pools.regular.iter().any(|m| m.kcal() > 0.0) {
        return Err(PlannerError::NoProgress {
            target: target_kcal,
        });
    }

    let mut remaining: Vec<&Meal> = pools.regular.iter().collect();
    while plan.total_kcal < lower {
        if remaining.is_empty() {
            warn!(
                "All {} regular meals used at {:.0} of {:.0} kcal, repeating meals",
                pools.regular.len(),
                plan.total_kcal,
                target_kcal
            );
            remaining = pools.regular.iter().collect();
        }
        let index = rng.gen_range(0..remaining.len());
        let meal = remaining.swap_remove(index);
        debug!("Picked '{}' ({:.0} kcal)", meal.name, meal.kcal());
        plan.push(meal.clone());
    }

    if plan.total_kcal > upper {
        info!(
            "Plan overshoots the target: {:.0} kcal > {:.0} kcal",
            plan.total_kcal, upper
        );
        plan = refiner.refine(plan, target_kcal, KCAL_TOLERANCE);
    }

    draw_workout_meals(&mut plan, &pools.pre, workout_count, rng);

    info!(
        "Selected {} meals, {:.0} kcal",
        plan.len(),
        plan.total_kcal
    );
    Ok(plan)
}

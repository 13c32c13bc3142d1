use std::fmt;

use tracing::{debug, info};

use crate::models::Meal;
use crate::planner::constants::{KETO_MIN_RATIO, LOWCARB_MIN_RATIO};

/// Carbohydrate restriction applied before selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietMode {
    #[default]
    None,
    LowCarb,
    Keto,
}

impl fmt::Display for DietMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietMode::None => write!(f, "none"),
            DietMode::LowCarb => write!(f, "lowcarb"),
            DietMode::Keto => write!(f, "keto"),
        }
    }
}

/// Minimum kcal/carb ratio per diet mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DietThresholds {
    pub lowcarb: f64,
    pub keto: f64,
}

impl Default for DietThresholds {
    fn default() -> Self {
        Self {
            lowcarb: LOWCARB_MIN_RATIO,
            keto: KETO_MIN_RATIO,
        }
    }
}

impl DietThresholds {
    /// Ratio a meal must exceed under `mode`, or `None` when unrestricted.
    pub fn min_ratio(&self, mode: DietMode) -> Option<f64> {
        match mode {
            DietMode::None => None,
            DietMode::LowCarb => Some(self.lowcarb),
            DietMode::Keto => Some(self.keto),
        }
    }
}

/// kcal per gram of carb. A carb-free meal has an infinite ratio.
pub fn carb_ratio(meal: &Meal) -> f64 {
    if meal.macros.carb == 0.0 {
        f64::INFINITY
    } else {
        meal.macros.kcal / meal.macros.carb
    }
}

/// Whether a meal passes the diet's carb-ratio bound.
pub fn passes_diet(meal: &Meal, mode: DietMode, thresholds: &DietThresholds) -> bool {
    match thresholds.min_ratio(mode) {
        None => true,
        Some(min) => carb_ratio(meal) > min,
    }
}

/// Keep the meals that pass the diet's carb-ratio bound.
pub fn filter_meals(meals: Vec<Meal>, mode: DietMode, thresholds: &DietThresholds) -> Vec<Meal> {
    if mode == DietMode::None {
        return meals;
    }

    let before = meals.len();
    let kept: Vec<Meal> = meals
        .into_iter()
        .filter(|meal| {
            let pass = passes_diet(meal, mode, thresholds);
            if !pass {
                debug!(
                    "Meal '{}' fails {} (kcal/carb {:.2})",
                    meal.name,
                    mode,
                    carb_ratio(meal)
                );
            }
            pass
        })
        .collect();

    info!("{} diet keeps {} of {} meals", mode, kept.len(), before);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::models::WorkoutTag;

    fn meal(name: &str, kcal: f64, carb: f64) -> Meal {
        let mut meal = Meal::new(name.to_string(), Vec::new(), BTreeSet::new(), WorkoutTag::None);
        meal.macros.kcal = kcal;
        meal.macros.carb = carb;
        meal
    }

    #[test]
    fn test_ratio_ten_passes_both_modes() {
        let thresholds = DietThresholds::default();
        let m = meal("Steak", 1000.0, 100.0);
        assert!(passes_diet(&m, DietMode::LowCarb, &thresholds));
        assert!(passes_diet(&m, DietMode::Keto, &thresholds));
    }

    #[test]
    fn test_ratio_between_thresholds() {
        let thresholds = DietThresholds::default();
        let m = meal("Rice Bowl", 500.0, 100.0);
        assert!(!passes_diet(&m, DietMode::LowCarb, &thresholds));
        assert!(passes_diet(&m, DietMode::Keto, &thresholds));
    }

    #[test]
    fn test_ratio_must_exceed_threshold() {
        let thresholds = DietThresholds::default();
        let m = meal("Edge", 800.0, 100.0);
        assert!(!passes_diet(&m, DietMode::LowCarb, &thresholds));
    }

    #[test]
    fn test_zero_carb_always_passes() {
        let thresholds = DietThresholds::default();
        let m = meal("Eggs", 300.0, 0.0);
        assert_eq!(carb_ratio(&m), f64::INFINITY);
        for mode in [DietMode::None, DietMode::LowCarb, DietMode::Keto] {
            assert!(passes_diet(&m, mode, &thresholds));
        }
    }

    #[test]
    fn test_filter_meals() {
        let meals = vec![
            meal("Pasta", 600.0, 120.0),
            meal("Steak", 1000.0, 100.0),
            meal("Eggs", 300.0, 0.0),
        ];
        let thresholds = DietThresholds::default();

        let all = filter_meals(meals.clone(), DietMode::None, &thresholds);
        assert_eq!(all.len(), 3);

        let lowcarb = filter_meals(meals, DietMode::LowCarb, &thresholds);
        let names: Vec<&str> = lowcarb.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Steak", "Eggs"]);
    }
}

//! Run parameters handed to the planning core.

use crate::error::{PlannerError, Result};
use crate::planner::constants::DEFAULT_KCAL_PER_DAY;
use crate::planner::{DietMode, DietThresholds, FatFormula};

/// Everything the core needs besides the meals and the random source.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Total energy target for the whole period.
    pub target_kcal: f64,
    pub diet: DietMode,
    pub thresholds: DietThresholds,
    /// Pre- and post-workout slots to fill (each).
    pub workout_count: usize,
    pub fat_formula: FatFormula,
    /// Use [`TrimOvershoot`](crate::planner::TrimOvershoot) instead of a pass-through.
    pub trim_overshoot: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            target_kcal: DEFAULT_KCAL_PER_DAY,
            diet: DietMode::default(),
            thresholds: DietThresholds::default(),
            workout_count: 0,
            fat_formula: FatFormula::default(),
            trim_overshoot: false,
        }
    }
}

impl PlanConfig {
    /// Config targeting `days * kcal_per_day`.
    pub fn for_days(days: u32, kcal_per_day: f64) -> Result<Self> {
        if days == 0 {
            return Err(PlannerError::InvalidInput(
                "Number of days must be at least 1".to_string(),
            ));
        }
        if !kcal_per_day.is_finite() || kcal_per_day <= 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "Daily kcal must be positive, got {}",
                kcal_per_day
            )));
        }
        Ok(Self {
            target_kcal: days as f64 * kcal_per_day,
            ..Default::default()
        })
    }
}

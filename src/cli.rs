use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::config::PlanConfig;
use crate::error::Result;
use crate::logging::Verbosity;
use crate::planner::{DietMode, FatFormula};
use crate::planner::constants::DEFAULT_KCAL_PER_DAY;

/// Grocery planner — picks meals to hit a calorie target and lists what to buy.
#[derive(Parser, Debug)]
#[command(name = "grocery_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of days the groceries should last.
    #[arg(short, long)]
    pub days: u32,

    /// Energy target per day in kcal.
    #[arg(short, long, default_value_t = DEFAULT_KCAL_PER_DAY)]
    pub kcal: f64,

    /// Only keep low-carb meals.
    #[arg(short, long)]
    pub lowcarb: bool,

    /// Only keep keto meals (overrides --lowcarb).
    #[arg(short = 'K', long)]
    pub keto: bool,

    /// Number of workouts in the period; adds as many pre- and post-workout meals.
    #[arg(short, long, default_value_t = 0)]
    pub workout: usize,

    /// Ingredient definitions (YAML).
    #[arg(long, default_value = "ingredientList.yaml")]
    pub ingredients: PathBuf,

    /// Meal definitions (YAML).
    #[arg(long, default_value = "mealList.yaml")]
    pub meals: PathBuf,

    /// Extra meal definitions, all treated as pre-workout meals.
    #[arg(long)]
    pub pre_workout: Option<PathBuf>,

    /// Extra meal definitions, all treated as post-workout meals.
    #[arg(long)]
    pub post_workout: Option<PathBuf>,

    /// Where to write the result (.json for JSON, YAML otherwise).
    #[arg(short, long, default_value = "groceryList.yaml")]
    pub output: PathBuf,

    /// Also write the grocery list as CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Seed for reproducible plans.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the old fat * fat formula for fat totals.
    #[arg(long)]
    pub legacy_fat: bool,

    /// Drop meals from plans that overshoot the calorie band.
    #[arg(long)]
    pub trim_overshoot: bool,

    /// Show debug information.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write the full debug log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Diet mode from the flags; keto wins when both are set.
    pub fn diet(&self) -> DietMode {
        if self.keto {
            DietMode::Keto
        } else if self.lowcarb {
            DietMode::LowCarb
        } else {
            DietMode::None
        }
    }

    /// Run configuration from the flags.
    pub fn plan_config(&self) -> Result<PlanConfig> {
        if self.lowcarb && self.keto {
            warn!("Lowcarb option has no effect when keto option is set");
        }

        let mut config = PlanConfig::for_days(self.days, self.kcal)?;
        config.diet = self.diet();
        config.workout_count = self.workout;
        config.trim_overshoot = self.trim_overshoot;
        if self.legacy_fat {
            config.fat_formula = FatFormula::Legacy;
        }
        Ok(config)
    }

    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

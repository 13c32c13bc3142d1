use std::path::PathBuf;

use thiserror::Error;

use crate::models::WorkoutTag;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No valid ingredients left after validation")]
    EmptyIngredientCatalog,

    #[error("No valid meals left after resolution")]
    NoMeals,

    #[error("Meal '{meal}' has malformed options: {reason}")]
    MalformedOptions { meal: String, reason: String },

    #[error("Meal '{meal}' option references unknown ingredient '{ingredient}'")]
    UnresolvedOption { meal: String, ingredient: String },

    #[error("No {0} meals available for the requested workout slots")]
    EmptyWorkoutPool(WorkoutTag),

    #[error("Regular meals cannot reach {target:.0} kcal: no meal has positive kcal")]
    NoProgress { target: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

mod ingredient;
mod meal;
mod plan;

pub use ingredient::{Ingredient, Metric};
pub use meal::{IngredientUsage, MacroTotals, Meal, WorkoutTag};
pub use plan::{GroceryList, Plan, PlanReport, WatchList};

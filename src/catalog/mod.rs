//! Binding raw configuration records into validated ingredients and meals.

mod ingredients;
mod meals;

pub use ingredients::{IngredientCatalog, build_ingredient_catalog, parse_ingredient};
pub use meals::{MealSources, load_meals, resolve_meal, resolve_meals};

use serde_yaml_ng::Value;

/// Read a numeric value, accepting numeric strings such as `"12.5"`.
///
/// Returns `None` for anything that is not a finite number.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Render a mapping key as a name. Non-string scalars (e.g. `42:`) are stringified.
pub(crate) fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

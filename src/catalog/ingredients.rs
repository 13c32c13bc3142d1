use std::collections::HashMap;
use std::sync::Arc;

use serde_yaml_ng::{Mapping, Value};
use strsim::jaro_winkler;
use tracing::{debug, info, warn};

use crate::catalog::{key_name, parse_number};
use crate::error::{PlannerError, Result};
use crate::models::{Ingredient, Metric};

/// Minimum similarity for a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Validated ingredients, looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    /// Ingredients keyed by lowercase name.
    ingredients: HashMap<String, Arc<Ingredient>>,
}

impl IngredientCatalog {
    /// Create a catalog from a list of ingredients.
    ///
    /// Names colliding case-insensitively keep the last occurrence.
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let mut map = HashMap::new();
        for ingredient in ingredients {
            if let Some(prev) = map.insert(ingredient.key(), Arc::new(ingredient)) {
                warn!("Ingredient '{}' is defined more than once, keeping the last", prev.name);
            }
        }
        Self { ingredients: map }
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Arc<Ingredient>> {
        self.ingredients.get(&name.to_lowercase())
    }

    /// Closest known ingredient name, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.ingredients
            .iter()
            .map(|(key, ingredient)| (ingredient, jaro_winkler(key, &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(ingredient, _)| ingredient.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Look up a field by any of its accepted names, ignoring case.
fn field<'a>(fields: &'a Mapping, names: &[&str]) -> Option<&'a Value> {
    fields.iter().find_map(|(key, value)| {
        let key = key.as_str()?.to_lowercase();
        names.contains(&key.as_str()).then_some(value)
    })
}

/// Read one non-negative nutrition value, warning when it is unusable.
fn nutrition_value(name: &str, fields: &Mapping, label: &str, aliases: &[&str]) -> Option<f64> {
    let Some(raw) = field(fields, aliases) else {
        warn!("Ingredient '{}' has no {} value", name, label);
        return None;
    };
    match parse_number(raw) {
        Some(v) if v >= 0.0 => Some(v),
        Some(v) => {
            warn!("Ingredient '{}' has negative {} ({})", name, label, v);
            None
        }
        None => {
            warn!("Ingredient '{}' has non-numeric {}: {:?}", name, label, raw);
            None
        }
    }
}

/// Validate a single raw ingredient record.
///
/// Every problem is logged; `None` means the entry is excluded.
pub fn parse_ingredient(name: &str, raw: &Value) -> Option<Ingredient> {
    let Some(fields) = raw.as_mapping() else {
        warn!("Ingredient '{}' is not a field mapping, skipping", name);
        return None;
    };

    // Evaluate every field so all problems get reported at once.
    let kcal = nutrition_value(name, fields, "kcal", &["kcal"]);
    let carb = nutrition_value(name, fields, "carb", &["carb", "carbs"]);
    let protein = nutrition_value(name, fields, "protein", &["protein"]);
    let fat = nutrition_value(name, fields, "fat", &["fat"]);

    let metric = match field(fields, &["metric"]) {
        None => Some(Metric::default()),
        Some(value) => match value.as_str().map(str::parse::<Metric>) {
            Some(Ok(metric)) => Some(metric),
            Some(Err(e)) => {
                warn!("Ingredient '{}': {}", name, e);
                None
            }
            None => {
                warn!("Ingredient '{}' has a non-text metric: {:?}", name, value);
                None
            }
        },
    };

    let (kcal, carb, protein, fat, metric) = (kcal?, carb?, protein?, fat?, metric?);
    if kcal == 0.0 {
        warn!("Ingredient '{}' has 0 kcal, skipping", name);
        return None;
    }

    Some(Ingredient {
        name: name.to_string(),
        kcal,
        carb,
        protein,
        fat,
        metric,
    })
}

/// Build the ingredient catalog from raw `name -> fields` records.
///
/// Invalid entries are skipped with a warning. An empty result is an error,
/// since no meal could resolve against it.
pub fn build_ingredient_catalog(raw: &Mapping) -> Result<IngredientCatalog> {
    let mut ingredients = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for (key, fields) in raw {
        let Some(name) = key_name(key) else {
            warn!("Skipping ingredient with unusable name {:?}", key);
            skipped += 1;
            continue;
        };
        match parse_ingredient(&name, fields) {
            Some(ingredient) => {
                debug!("{}", ingredient);
                ingredients.push(ingredient);
            }
            None => skipped += 1,
        }
    }

    let catalog = IngredientCatalog::new(ingredients);
    if catalog.is_empty() {
        return Err(PlannerError::EmptyIngredientCatalog);
    }

    info!(
        "Loaded {} ingredients ({} skipped)",
        catalog.len(),
        skipped
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(yaml: &str) -> Mapping {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_ingredient_defaults_to_per_gram() {
        let raw = records("Tomate: {kcal: 18, carb: 3.9, protein: 0.9, fat: 0.2}");
        let catalog = build_ingredient_catalog(&raw).unwrap();
        let tomato = catalog.get("tomate").unwrap();
        assert_eq!(tomato.name, "Tomate");
        assert_eq!(tomato.kcal, 18.0);
        assert_eq!(tomato.metric, Metric::PerGram);
    }

    #[test]
    fn test_numeric_strings_and_aliases() {
        let raw = records("Egg: {Kcal: '155', Carbs: '1.1', Protein: 13, Fat: 11, metric: unit}");
        let catalog = build_ingredient_catalog(&raw).unwrap();
        let egg = catalog.get("EGG").unwrap();
        assert_eq!(egg.kcal, 155.0);
        assert_eq!(egg.carb, 1.1);
        assert_eq!(egg.metric, Metric::PerItem);
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let raw = records(
            r#"
Good: {kcal: 100, carb: 10, protein: 5, fat: 2}
ZeroKcal: {kcal: 0, carb: 10, protein: 5, fat: 2}
NoFat: {kcal: 100, carb: 10, protein: 5}
Text: {kcal: lots, carb: 10, protein: 5, fat: 2}
Negative: {kcal: 100, carb: -1, protein: 5, fat: 2}
BadMetric: {kcal: 100, carb: 1, protein: 5, fat: 2, metric: litre}
NotAMap: 12
"#,
        );
        let catalog = build_ingredient_catalog(&raw).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("good").is_some());
        assert!(catalog.get("zerokcal").is_none());
    }

    #[test]
    fn test_empty_catalog_is_error() {
        let raw = records("Water: {kcal: 0, carb: 0, protein: 0, fat: 0}");
        let result = build_ingredient_catalog(&raw);
        assert!(matches!(result, Err(PlannerError::EmptyIngredientCatalog)));
    }

    #[test]
    fn test_suggest_close_name() {
        let raw = records("Mozzarella: {kcal: 250, carb: 1, protein: 18, fat: 20}");
        let catalog = build_ingredient_catalog(&raw).unwrap();
        assert_eq!(catalog.suggest("Mozarella"), Some("Mozzarella"));
        assert_eq!(catalog.suggest("Broccoli"), None);
    }
}

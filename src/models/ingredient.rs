use std::fmt;
use std::str::FromStr;

/// Unit basis of an ingredient's nutrition values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    PerGram,
    PerItem,
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gram" | "g" | "per_gram" => Ok(Metric::PerGram),
            "unit" | "item" | "piece" | "per_item" => Ok(Metric::PerItem),
            other => Err(format!("unknown metric '{}'", other)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::PerGram => write!(f, "gram"),
            Metric::PerItem => write!(f, "item"),
        }
    }
}

/// An ingredient with its nutrition values per metric.
///
/// Immutable once built; per-meal quantities live in
/// [`IngredientUsage`](crate::models::IngredientUsage).
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub kcal: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
    pub metric: Metric,
}

impl Ingredient {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: K:{} C:{} P:{} F:{} per {}",
            self.name, self.kcal, self.carb, self.protein, self.fat, self.metric
        )
    }
}

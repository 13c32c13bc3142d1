use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{MacroTotals, Meal, WorkoutTag};

/// Summed quantity per ingredient name.
pub type GroceryList = BTreeMap<String, f64>;

/// Distinct watch items across a plan.
pub type WatchList = BTreeSet<String>;

/// Ordered selection of meals with its running kcal total.
///
/// May contain the same meal more than once.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub meals: Vec<Meal>,
    pub total_kcal: f64,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `meal` and add its kcal to the total.
    pub fn push(&mut self, meal: Meal) {
        self.total_kcal += meal.kcal();
        self.meals.push(meal);
    }

    /// Remove the meal at `index`, keeping the total in sync.
    pub fn remove(&mut self, index: usize) -> Meal {
        let meal = self.meals.remove(index);
        self.total_kcal -= meal.kcal();
        meal
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Number of meals carrying the given workout tag.
    pub fn count_tagged(&self, tag: WorkoutTag) -> usize {
        self.meals.iter().filter(|m| m.workout == tag).count()
    }

    /// Macro totals summed over every meal in the plan.
    pub fn totals(&self) -> MacroTotals {
        let mut totals = MacroTotals::default();
        for meal in &self.meals {
            totals += meal.macros;
        }
        totals
    }

    pub fn meal_names(&self) -> Vec<String> {
        self.meals.iter().map(|m| m.name.clone()).collect()
    }
}

/// The result record handed back to the caller and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub target_kcal: f64,
    pub meals: Vec<String>,
    pub grocery_list: GroceryList,
    pub watch_list: Vec<String>,
    pub totals: MacroTotals,
}

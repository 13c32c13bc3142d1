use std::collections::BTreeSet;
use std::fmt;
use std::ops::AddAssign;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::Ingredient;

/// Marks a meal as reserved for a workout slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutTag {
    #[default]
    None,
    Pre,
    Post,
}

impl fmt::Display for WorkoutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutTag::None => write!(f, "regular"),
            WorkoutTag::Pre => write!(f, "pre-workout"),
            WorkoutTag::Post => write!(f, "post-workout"),
        }
    }
}

/// Aggregate nutrition of a meal or plan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroTotals {
    pub kcal: f64,
    pub carb: f64,
    pub protein: f64,
    pub fat: f64,
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.kcal += rhs.kcal;
        self.carb += rhs.carb;
        self.protein += rhs.protein;
        self.fat += rhs.fat;
    }
}

/// One ingredient used by a meal, with the meal-specific quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientUsage {
    pub ingredient: Arc<Ingredient>,
    pub amount: f64,
}

impl IngredientUsage {
    pub fn new(ingredient: Arc<Ingredient>, amount: f64) -> Self {
        Self { ingredient, amount }
    }
}

/// A resolved meal recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub name: String,
    pub ingredients: Vec<IngredientUsage>,
    pub watch_list: BTreeSet<String>,
    pub workout: WorkoutTag,
    /// Zero until [`resolve_macros`](crate::planner::resolve_macros) runs.
    pub macros: MacroTotals,
}

impl Meal {
    pub fn new(
        name: String,
        ingredients: Vec<IngredientUsage>,
        watch_list: BTreeSet<String>,
        workout: WorkoutTag,
    ) -> Self {
        Self {
            name,
            ingredients,
            watch_list,
            workout,
            macros: MacroTotals::default(),
        }
    }

    #[inline]
    pub fn kcal(&self) -> f64 {
        self.macros.kcal
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .ingredients
            .iter()
            .map(|u| u.ingredient.name.as_str())
            .collect();
        write!(
            f,
            "{} ({}): [{}] K:{:.1} C:{:.1} P:{:.1} F:{:.1}",
            self.name,
            self.workout,
            names.join(", "),
            self.macros.kcal,
            self.macros.carb,
            self.macros.protein,
            self.macros.fat
        )?;
        if !self.watch_list.is_empty() {
            let watch: Vec<&str> = self.watch_list.iter().map(String::as_str).collect();
            write!(f, " watch: {}", watch.join(", "))?;
        }
        Ok(())
    }
}

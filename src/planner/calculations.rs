use tracing::debug;

use crate::models::{Ingredient, IngredientUsage, MacroTotals, Meal};
use crate::planner::constants::{GRAM_AMOUNT_THRESHOLD, GRAMS_PER_UNIT};

/// How the fat contribution of an ingredient is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FatFormula {
    /// `fat * amount`, like every other macro.
    #[default]
    Scaled,
    /// `fat * fat`, reproducing plans generated by the old tool.
    Legacy,
}

/// Whether a usage amount is read as grams.
///
/// Amounts above the threshold are grams against per-100g values;
/// smaller amounts are item counts.
#[inline]
pub fn is_gram_amount(amount: f64) -> bool {
    amount > GRAM_AMOUNT_THRESHOLD
}

/// Macro contribution of `amount` of one ingredient.
pub fn usage_contribution(ingredient: &Ingredient, amount: f64, formula: FatFormula) -> MacroTotals {
    let scale = |value: f64| {
        if is_gram_amount(amount) {
            value / GRAMS_PER_UNIT
        } else {
            value
        }
    };
    let fat = match formula {
        FatFormula::Scaled => ingredient.fat * amount,
        FatFormula::Legacy => ingredient.fat * ingredient.fat,
    };
    MacroTotals {
        kcal: scale(ingredient.kcal * amount),
        carb: scale(ingredient.carb * amount),
        protein: scale(ingredient.protein * amount),
        fat: scale(fat),
    }
}

/// Sum the contributions of every usage.
pub fn calculate_macros(usages: &[IngredientUsage], formula: FatFormula) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for usage in usages {
        totals += usage_contribution(&usage.ingredient, usage.amount, formula);
    }
    totals
}

/// Compute and store a meal's macro totals.
///
/// Totals are recomputed from scratch, so calling this twice is harmless.
pub fn resolve_macros(meal: &mut Meal, formula: FatFormula) {
    meal.macros = calculate_macros(&meal.ingredients, formula);
    debug!("{}", meal);
}

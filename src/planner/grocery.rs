use crate::models::{GroceryList, Meal, Plan, PlanReport, WatchList};

/// Sum ingredient amounts across meals, keyed by ingredient name.
pub fn aggregate_groceries(meals: &[Meal]) -> GroceryList {
    let mut groceries = GroceryList::new();
    for usage in meals.iter().flat_map(|m| &m.ingredients) {
        *groceries
            .entry(usage.ingredient.name.clone())
            .or_insert(0.0) += usage.amount;
    }
    groceries
}

/// Union of every meal's watch items.
pub fn aggregate_watch_list(meals: &[Meal]) -> WatchList {
    meals
        .iter()
        .flat_map(|m| m.watch_list.iter().cloned())
        .collect()
}

/// Turn a finished plan into the result record.
pub fn build_report(plan: &Plan, target_kcal: f64) -> PlanReport {
    PlanReport {
        target_kcal,
        meals: plan.meal_names(),
        grocery_list: aggregate_groceries(&plan.meals),
        watch_list: aggregate_watch_list(&plan.meals).into_iter().collect(),
        totals: plan.totals(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use crate::models::{Ingredient, IngredientUsage, Metric, WorkoutTag};

    fn ingredient(name: &str) -> Arc<Ingredient> {
        Arc::new(Ingredient {
            name: name.to_string(),
            kcal: 100.0,
            carb: 1.0,
            protein: 1.0,
            fat: 1.0,
            metric: Metric::PerGram,
        })
    }

    fn meal(name: &str, usages: &[(&str, f64)], watch: &[&str]) -> Meal {
        Meal::new(
            name.to_string(),
            usages
                .iter()
                .map(|(n, amount)| IngredientUsage::new(ingredient(n), *amount))
                .collect(),
            watch.iter().map(|w| w.to_string()).collect::<BTreeSet<_>>(),
            WorkoutTag::None,
        )
    }

    #[test]
    fn test_groceries_sum_repeated_names() {
        let meals = vec![
            meal("A", &[("Reis", 200.0), ("Ei", 2.0)], &[]),
            meal("B", &[("Reis", 150.0)], &[]),
            meal("A", &[("Reis", 200.0), ("Ei", 2.0)], &[]),
        ];
        let groceries = aggregate_groceries(&meals);
        assert_eq!(groceries.len(), 2);
        assert_eq!(groceries["Reis"], 550.0);
        assert_eq!(groceries["Ei"], 4.0);
    }

    #[test]
    fn test_groceries_order_independent() {
        let a = meal("A", &[("Reis", 200.0), ("Ei", 2.0)], &[]);
        let b = meal("B", &[("Ei", 3.0), ("Lauch", 80.0)], &[]);
        let ab = aggregate_groceries(&[a.clone(), b.clone()]);
        let ba = aggregate_groceries(&[b, a]);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_watch_list_deduplicates() {
        let meals = vec![
            meal("A", &[("Reis", 200.0)], &["Salz", "Pfeffer"]),
            meal("B", &[("Reis", 100.0)], &["Salz"]),
        ];
        let watch = aggregate_watch_list(&meals);
        assert_eq!(watch.len(), 2);
        assert!(watch.contains("Pfeffer"));
    }

    #[test]
    fn test_build_report() {
        let mut plan = Plan::new();
        let mut a = meal("A", &[("Reis", 200.0)], &["Salz"]);
        a.macros.kcal = 500.0;
        plan.push(a.clone());
        plan.push(a);

        let report = build_report(&plan, 1000.0);
        assert_eq!(report.meals, vec!["A".to_string(), "A".to_string()]);
        assert_eq!(report.grocery_list["Reis"], 400.0);
        assert_eq!(report.watch_list, vec!["Salz".to_string()]);
        assert_eq!(report.totals.kcal, 1000.0);
        assert_eq!(report.target_kcal, 1000.0);
    }
}

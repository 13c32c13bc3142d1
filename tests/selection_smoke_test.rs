use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_yaml_ng::Mapping;

use grocery_planner_rs::catalog::{build_ingredient_catalog, resolve_meals};
use grocery_planner_rs::config::PlanConfig;
use grocery_planner_rs::models::{Meal, WorkoutTag};
use grocery_planner_rs::planner::{DietMode, generate_plan, plan_groceries};
use grocery_planner_rs::PlannerError;

const INGREDIENTS: &str = r#"
Hafer: {kcal: 100, carb: 60, protein: 13, fat: 7}
Milch: {kcal: 50, carb: 5, protein: 3.4, fat: 1.5}
Wasser: {kcal: 0, carb: 0, protein: 0, fat: 0}
"#;

const MEALS: &str = r#"
Porridge:
  Hafer: 200
  Milch: 300
  watchList: [Zimt]
Oat Bowl:
  Hafer: 300
  watchList: [Zimt, Honig]
Milk Glass:
  Milch: 500
Water Glass:
  Wasser: 300
"#;

fn parse(yaml: &str) -> Mapping {
    serde_yaml_ng::from_str(yaml).unwrap()
}

fn sample_meals(rng: &mut StdRng) -> Vec<Meal> {
    let catalog = build_ingredient_catalog(&parse(INGREDIENTS)).unwrap();
    resolve_meals(&parse(MEALS), &catalog, None, rng).unwrap()
}

fn config(target_kcal: f64) -> PlanConfig {
    PlanConfig {
        target_kcal,
        ..Default::default()
    }
}

#[test]
fn test_zero_kcal_ingredient_drops_meal() {
    let mut rng = StdRng::seed_from_u64(1);
    let meals = sample_meals(&mut rng);
    let names: Vec<&str> = meals.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Porridge", "Oat Bowl", "Milk Glass"]);
}

#[test]
fn test_plan_lands_in_tolerance_band() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let meals = sample_meals(&mut rng);
        let report = plan_groceries(meals, &config(1000.0), &mut rng).unwrap();

        assert!(
            (800.0..=1200.0).contains(&report.totals.kcal),
            "seed {} gave {} kcal",
            seed,
            report.totals.kcal
        );
    }
}

#[test]
fn test_groceries_match_selected_meals() {
    let per_meal: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::from([
        ("Porridge", vec![("Hafer", 200.0), ("Milch", 300.0)]),
        ("Oat Bowl", vec![("Hafer", 300.0)]),
        ("Milk Glass", vec![("Milch", 500.0)]),
    ]);

    let mut rng = StdRng::seed_from_u64(42);
    let meals = sample_meals(&mut rng);
    let report = plan_groceries(meals, &config(3000.0), &mut rng).unwrap();

    let mut expected: BTreeMap<String, f64> = BTreeMap::new();
    for name in &report.meals {
        for (item, amount) in &per_meal[name.as_str()] {
            *expected.entry(item.to_string()).or_insert(0.0) += amount;
        }
    }
    assert_eq!(report.grocery_list, expected);

    let has_oats = report.meals.iter().any(|m| m != "Milk Glass");
    assert_eq!(report.watch_list.contains(&"Zimt".to_string()), has_oats);
}

#[test]
fn test_long_plan_repeats_meals() {
    let mut rng = StdRng::seed_from_u64(5);
    let meals = sample_meals(&mut rng);
    // One pass over the pool is 900 kcal.
    let plan = generate_plan(meals, &config(7000.0), &mut rng).unwrap();

    assert!(plan.total_kcal >= 6800.0);
    assert!(plan.len() > 3);
}

#[test]
fn test_same_seed_same_plan() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let meals = sample_meals(&mut rng);
        plan_groceries(meals, &config(5000.0), &mut rng).unwrap()
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn test_lowcarb_keeps_only_qualifying_meals() {
    let mut rng = StdRng::seed_from_u64(1);
    let meals = sample_meals(&mut rng);
    let config = PlanConfig {
        target_kcal: 1000.0,
        diet: DietMode::LowCarb,
        ..Default::default()
    };
    // Only Milk Glass (250 kcal / 25 g carb) beats a ratio of 8.
    let report = plan_groceries(meals, &config, &mut rng).unwrap();
    assert!(report.meals.iter().all(|m| m == "Milk Glass"));
    assert!(report.totals.kcal >= 800.0);
    assert!(report.watch_list.is_empty());
}

#[test]
fn test_diet_leaving_no_regular_meals_fails() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut meals = sample_meals(&mut rng);
    meals.retain(|m| m.name != "Milk Glass");
    let config = PlanConfig {
        target_kcal: 1000.0,
        diet: DietMode::LowCarb,
        ..Default::default()
    };
    let result = plan_groceries(meals, &config, &mut rng);
    assert!(matches!(result, Err(PlannerError::NoProgress { .. })));
}

#[test]
fn test_workout_slots_from_tagged_meals() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut meals = sample_meals(&mut rng);
    meals[1].workout = WorkoutTag::Post;
    meals[2].workout = WorkoutTag::Pre;

    let config = PlanConfig {
        target_kcal: 1500.0,
        workout_count: 2,
        ..Default::default()
    };
    let plan = generate_plan(meals, &config, &mut rng).unwrap();

    assert_eq!(plan.count_tagged(WorkoutTag::Post), 2);
    assert_eq!(plan.count_tagged(WorkoutTag::Pre), 2);
    assert_eq!(plan.meals[0].name, "Oat Bowl");
    assert_eq!(plan.meals[plan.len() - 1].name, "Milk Glass");
}

#[test]
fn test_empty_meal_list_is_error() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = generate_plan(Vec::new(), &config(1000.0), &mut rng);
    assert!(matches!(result, Err(PlannerError::NoMeals)));
}

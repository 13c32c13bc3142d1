use crate::models::PlanReport;
use crate::planner::constants::KCAL_TOLERANCE;

/// Display a plan report as a formatted summary.
pub fn display_plan(report: &PlanReport) {
    if report.meals.is_empty() {
        println!("No meals selected.");
        return;
    }

    println!();
    println!("=== Meal Plan ===");
    println!();

    for (i, meal) in report.meals.iter().enumerate() {
        println!("{:>3}. {}", i + 1, meal);
    }

    println!();
    println!("=== Grocery List ===");
    println!();

    let width = report
        .grocery_list
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(10);

    for (item, amount) in &report.grocery_list {
        println!("  {:<width$}  {:>8.1}", item, amount, width = width);
    }

    if !report.watch_list.is_empty() {
        println!();
        println!("=== Watch List ===");
        println!();
        for item in &report.watch_list {
            println!("  {}", item);
        }
    }

    let totals = &report.totals;
    let deviation = totals.kcal - report.target_kcal;
    let sign = if deviation >= 0.0 { "+" } else { "" };

    println!();
    println!("--- Summary ---");
    println!("Total meals: {}", report.meals.len());
    println!(
        "Total kcal: {:.0} (target {:.0}, {}{:.0}, tolerance {:.0})",
        totals.kcal, report.target_kcal, sign, deviation, KCAL_TOLERANCE
    );
    println!(
        "Carbs: {:.1} g | Protein: {:.1} g | Fat: {:.1} g",
        totals.carb, totals.protein, totals.fat
    );
    println!();
}

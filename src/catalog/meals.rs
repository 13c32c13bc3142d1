use std::collections::BTreeSet;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde_yaml_ng::{Mapping, Value};
use tracing::{debug, info, warn};

use crate::catalog::{IngredientCatalog, key_name, parse_number};
use crate::error::{PlannerError, Result};
use crate::models::{IngredientUsage, Meal, WorkoutTag};
use crate::planner::constants::OPTIONAL_INCLUDE_PROBABILITY;
use crate::state::load_records;

const OPTIONS_KEY: &str = "options";
const WATCH_LIST_KEY: &str = "watchList";
const OPTIONAL_KEY: &str = "optional";
const POST_WORKOUT_KEY: &str = "postWorkout";
const PRE_WORKOUT_KEY: &str = "preWorkout";

fn malformed(meal: &str, reason: impl Into<String>) -> PlannerError {
    PlannerError::MalformedOptions {
        meal: meal.to_string(),
        reason: reason.into(),
    }
}

/// Read a usage quantity: a non-negative number or numeric string.
fn parse_amount(value: &Value) -> Option<f64> {
    parse_number(value).filter(|amount| *amount >= 0.0)
}

/// Pick one option group and resolve it.
///
/// Any defect here is fatal: a broken option set means the meal file
/// itself is wrong, not just one record.
fn resolve_options<R: Rng + ?Sized>(
    meal: &str,
    options: &Value,
    catalog: &IngredientCatalog,
    rng: &mut R,
) -> Result<Vec<IngredientUsage>> {
    let groups = options
        .as_sequence()
        .ok_or_else(|| malformed(meal, "expected a list of ingredient groups"))?;

    let groups: Vec<&Mapping> = groups
        .iter()
        .map(|group| {
            group
                .as_mapping()
                .ok_or_else(|| malformed(meal, "every group must map ingredient names to amounts"))
        })
        .collect::<Result<_>>()?;

    let chosen = match groups.as_slice() {
        [] => return Err(malformed(meal, "no ingredient groups given")),
        [only] => {
            info!("Meal '{}' has a single option group, no real choice", meal);
            *only
        }
        _ => *groups
            .choose(rng)
            .ok_or_else(|| malformed(meal, "no ingredient groups given"))?,
    };

    let mut usages = Vec::with_capacity(chosen.len());
    for (key, amount) in chosen {
        let name = key_name(key).ok_or_else(|| malformed(meal, "unusable ingredient name"))?;
        let ingredient = catalog
            .get(&name)
            .ok_or_else(|| PlannerError::UnresolvedOption {
                meal: meal.to_string(),
                ingredient: name.clone(),
            })?;
        let amount = parse_amount(amount)
            .ok_or_else(|| malformed(meal, format!("invalid amount for '{}'", name)))?;
        usages.push(IngredientUsage::new(ingredient.clone(), amount));
    }
    debug!(
        "Meal '{}' picked option [{}]",
        meal,
        usages
            .iter()
            .map(|u| u.ingredient.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(usages)
}

/// Watch items may be a list or a single name.
fn parse_watch_list(meal: &str, value: &Value) -> BTreeSet<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(|item| {
                let name = key_name(item);
                if name.is_none() {
                    warn!("Meal '{}' has an unusable watch item {:?}", meal, item);
                }
                name
            })
            .collect(),
        Value::Null => BTreeSet::new(),
        other => match key_name(other) {
            Some(name) => BTreeSet::from([name]),
            None => {
                warn!("Meal '{}' has an unusable watchList {:?}", meal, other);
                BTreeSet::new()
            }
        },
    }
}

/// A workout key counts unless it is explicitly `false`.
fn workout_flag(value: Option<Value>) -> bool {
    !matches!(value, None | Some(Value::Bool(false)))
}

/// Resolve one raw meal record against the ingredient catalog.
///
/// Returns `Ok(None)` when the meal is dropped (unknown ingredients, bad
/// amounts, nothing to eat); a warning is logged in that case. Malformed
/// option groups are returned as errors.
pub fn resolve_meal<R: Rng + ?Sized>(
    name: &str,
    raw: &Value,
    catalog: &IngredientCatalog,
    rng: &mut R,
) -> Result<Option<Meal>> {
    let Some(fields) = raw.as_mapping() else {
        warn!("Meal '{}' is not a field mapping, dropping it", name);
        return Ok(None);
    };
    let mut fields = fields.clone();

    let option_usages = match fields.shift_remove(OPTIONS_KEY) {
        Some(options) => resolve_options(name, &options, catalog, rng)?,
        None => Vec::new(),
    };

    let watch_list = fields
        .shift_remove(WATCH_LIST_KEY)
        .map(|value| parse_watch_list(name, &value))
        .unwrap_or_default();

    if let Some(optional) = fields.shift_remove(OPTIONAL_KEY) {
        if rng.gen_bool(OPTIONAL_INCLUDE_PROBABILITY) {
            match optional {
                Value::Mapping(extra) => {
                    debug!("Meal '{}' includes its optional ingredients", name);
                    for (key, amount) in extra {
                        fields.insert(key, amount);
                    }
                }
                Value::Null => {}
                other => warn!("Meal '{}' has unusable optional entries {:?}", name, other),
            }
        } else {
            debug!("Meal '{}' skips its optional ingredients", name);
        }
    }

    let post = workout_flag(fields.shift_remove(POST_WORKOUT_KEY));
    let pre = workout_flag(fields.shift_remove(PRE_WORKOUT_KEY));
    let workout = match (post, pre) {
        (true, true) => {
            warn!("Meal '{}' is tagged pre- and post-workout, using post", name);
            WorkoutTag::Post
        }
        (true, false) => WorkoutTag::Post,
        (false, true) => WorkoutTag::Pre,
        (false, false) => WorkoutTag::None,
    };

    let mut usages = Vec::with_capacity(fields.len() + option_usages.len());
    let mut unresolved = Vec::new();
    for (key, amount) in &fields {
        let Some(ingredient_name) = key_name(key) else {
            unresolved.push(format!("{:?}", key));
            continue;
        };
        let Some(ingredient) = catalog.get(&ingredient_name) else {
            match catalog.suggest(&ingredient_name) {
                Some(hint) => warn!(
                    "Meal '{}': unknown ingredient '{}' (did you mean '{}'?)",
                    name, ingredient_name, hint
                ),
                None => warn!("Meal '{}': unknown ingredient '{}'", name, ingredient_name),
            }
            unresolved.push(ingredient_name);
            continue;
        };
        let Some(amount) = parse_amount(amount) else {
            warn!(
                "Meal '{}': invalid amount {:?} for '{}'",
                name, amount, ingredient_name
            );
            unresolved.push(ingredient_name);
            continue;
        };
        usages.push(IngredientUsage::new(ingredient.clone(), amount));
    }

    if !unresolved.is_empty() {
        warn!(
            "Dropping meal '{}': unresolved ingredients {}",
            name,
            unresolved.join(", ")
        );
        return Ok(None);
    }

    usages.extend(option_usages);
    if usages.is_empty() {
        warn!("Dropping meal '{}': no ingredients", name);
        return Ok(None);
    }

    Ok(Some(Meal::new(name.to_string(), usages, watch_list, workout)))
}

/// Resolve every meal in a raw `name -> fields` mapping.
///
/// `forced` overrides the workout tag of every resolved meal, for meal
/// files dedicated to pre- or post-workout meals. Macro totals are not
/// computed here.
pub fn resolve_meals<R: Rng + ?Sized>(
    raw: &Mapping,
    catalog: &IngredientCatalog,
    forced: Option<WorkoutTag>,
    rng: &mut R,
) -> Result<Vec<Meal>> {
    let mut meals = Vec::with_capacity(raw.len());

    for (key, fields) in raw {
        let Some(name) = key_name(key) else {
            warn!("Skipping meal with unusable name {:?}", key);
            continue;
        };
        if let Some(mut meal) = resolve_meal(&name, fields, catalog, rng)? {
            if let Some(tag) = forced {
                meal.workout = tag;
            }
            meals.push(meal);
        }
    }

    info!("Resolved {} of {} meals", meals.len(), raw.len());
    Ok(meals)
}

/// Meal files to load: the main list plus optional workout-only lists.
#[derive(Debug, Clone, Copy)]
pub struct MealSources<'a> {
    pub meals: &'a Path,
    pub pre_workout: Option<&'a Path>,
    pub post_workout: Option<&'a Path>,
}

/// Load and resolve every meal file.
///
/// Meals from the workout lists get that list's tag. Only the main list has
/// to yield a usable meal; an empty workout list is just a warning.
pub fn load_meals<R: Rng + ?Sized>(
    sources: MealSources<'_>,
    catalog: &IngredientCatalog,
    rng: &mut R,
) -> Result<Vec<Meal>> {
    let mut meals = resolve_meals(&load_records(sources.meals)?, catalog, None, rng)?;
    if meals.is_empty() {
        return Err(PlannerError::NoMeals);
    }

    let workout_files = [
        (sources.pre_workout, WorkoutTag::Pre),
        (sources.post_workout, WorkoutTag::Post),
    ];
    for (path, tag) in workout_files {
        let Some(path) = path else { continue };
        let extra = resolve_meals(&load_records(path)?, catalog, Some(tag), rng)?;
        if extra.is_empty() {
            warn!("No usable {} meals in {}", tag, path.display());
        }
        meals.extend(extra);
    }
    Ok(meals)
}

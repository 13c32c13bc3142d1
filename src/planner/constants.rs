/// Acceptable deviation (kcal) around the plan target.
pub const KCAL_TOLERANCE: f64 = 200.0;

/// Usage amounts above this are grams (scaled per 100); at or below, item counts.
pub const GRAM_AMOUNT_THRESHOLD: f64 = 10.0;

/// Divisor for per-gram nutrition values.
pub const GRAMS_PER_UNIT: f64 = 100.0;

/// Minimum kcal/carb ratio for the lowcarb diet.
pub const LOWCARB_MIN_RATIO: f64 = 8.0;

/// Minimum kcal/carb ratio for the keto diet.
pub const KETO_MIN_RATIO: f64 = 3.0;

/// Chance that a meal's optional ingredients are included.
pub const OPTIONAL_INCLUDE_PROBABILITY: f64 = 0.5;

/// Default daily energy target.
pub const DEFAULT_KCAL_PER_DAY: f64 = 2000.0;

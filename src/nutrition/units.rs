//! Gram conversion tables and the conversion heuristic.

use tracing::debug;

/// General fallback weights in grams per unit.
const UNIT_TO_GRAM: &[(&str, f64)] = &[
    ("g", 1.0),
    ("kg", 1000.0),
    ("oz", 28.35),
    ("lb", 453.6),
    ("ml", 1.0),
    ("l", 1000.0),
    ("cup", 240.0),
    ("tbsp", 15.0),
    ("tsp", 5.0),
    ("large", 50.0),
    ("medium", 118.0),
    ("small", 114.0),
    ("slice", 30.0),
    ("clove", 3.0),
    ("bunch", 340.0),
    ("can", 411.0),
    ("pinch", 0.36),
    ("dash", 0.6),
    ("sprig", 2.0),
    ("handful", 30.0),
];

/// Ingredient-specific weights, matched by substring on the food name in order.
const INGREDIENT_CONVERSIONS: &[(&str, &[(&str, f64)])] = &[
    ("flour", &[("cup", 125.0), ("tbsp", 8.0)]),
    ("all-purpose flour", &[("cup", 125.0), ("tbsp", 8.0)]),
    ("wheat flour", &[("cup", 125.0), ("tbsp", 8.0)]),
    ("milk", &[("cup", 240.0), ("tbsp", 15.0)]),
    ("butter", &[("tbsp", 14.0), ("cup", 227.0), ("stick", 113.0)]),
    ("cheese", &[("cup", 113.0)]),
    ("cheddar cheese", &[("cup", 113.0)]),
    ("shredded cheese", &[("cup", 113.0)]),
    ("onion", &[("cup", 160.0)]),
    ("chopped onion", &[("cup", 160.0)]),
    ("diced onion", &[("cup", 160.0)]),
    ("garlic", &[("clove", 3.0), ("tbsp", 15.0)]),
    ("minced garlic", &[("tbsp", 15.0)]),
    ("spinach", &[("bunch", 340.0)]),
    ("rice", &[("cup", 185.0)]),
    ("cooked rice", &[("cup", 185.0)]),
    ("white rice", &[("cup", 185.0)]),
    ("olive oil", &[("tbsp", 14.0), ("tsp", 5.0)]),
    ("oil", &[("tbsp", 14.0), ("tsp", 5.0)]),
    ("vegetable oil", &[("tbsp", 14.0), ("tsp", 5.0)]),
    ("canola oil", &[("tbsp", 14.0), ("tsp", 5.0)]),
    ("coconut oil", &[("tbsp", 13.0), ("tsp", 4.5)]),
    ("banana", &[("medium", 118.0)]),
    ("apple", &[("medium", 182.0)]),
    ("avocado", &[("small", 114.0), ("medium", 136.0)]),
    ("egg", &[("large", 50.0), ("medium", 44.0)]),
    (
        "chicken breast",
        &[("oz", 28.35), ("piece", 174.0), ("breast", 174.0)],
    ),
    ("diced tomatoes", &[("can", 411.0)]),
    ("tomatoes", &[("can", 411.0)]),
    ("bread", &[("slice", 30.0)]),
    ("granulated sugar", &[("cup", 200.0), ("tbsp", 12.5)]),
    ("brown sugar", &[("cup", 220.0), ("tbsp", 13.75)]),
    ("powdered sugar", &[("cup", 120.0), ("tbsp", 7.5)]),
    ("confectioners sugar", &[("cup", 120.0), ("tbsp", 7.5)]),
    ("icing sugar", &[("cup", 120.0), ("tbsp", 7.5)]),
    ("soy sauce", &[("tbsp", 18.0), ("tsp", 6.0)]),
    ("honey", &[("tbsp", 21.0), ("tsp", 7.0)]),
    ("vinegar", &[("tbsp", 15.0), ("tsp", 5.0)]),
];

/// Liquid densities in g/ml.
const DENSITY_BY_KEY: &[(&str, f64)] = &[
    ("water", 1.0),
    ("milk", 1.03),
    ("soy sauce", 1.16),
    ("oil", 0.91),
    ("olive oil", 0.91),
    ("vegetable oil", 0.91),
    ("canola oil", 0.92),
    ("honey", 1.42),
    ("vinegar", 1.01),
    ("broth", 1.02),
    ("stock", 1.02),
    ("yogurt", 1.03),
];

fn lookup(table: &[(&str, f64)], unit: &str) -> Option<f64> {
    table.iter().find(|(u, _)| *u == unit).map(|(_, g)| *g)
}

/// Converts a parsed quantity to grams for the matched food `food_name`.
///
/// Resolution order:
/// 1. ingredient-specific weight for the unit
/// 2. density table for `ml`/`l` (default 1 g/ml)
/// 3. general unit table (unknown units count as 1 g)
///
/// When no unit was written and the amount is a small count, the food's
/// piece/medium/small weight is used instead.
#[must_use]
pub fn convert_to_grams(amount: f64, unit: &str, unit_given: bool, food_name: &str) -> f64 {
    let name = food_name.trim().to_lowercase();

    for (key, conversions) in INGREDIENT_CONVERSIONS {
        if name.contains(key) {
            if let Some(per_unit) = lookup(conversions, unit) {
                debug!(food = %food_name, amount, unit, per_unit, "Ingredient-specific conversion");
                return amount * per_unit;
            }
        }
    }

    if unit == "ml" || unit == "l" {
        let ml = if unit == "l" { amount * 1000.0 } else { amount };
        let density = DENSITY_BY_KEY
            .iter()
            .find(|(key, _)| name.contains(key))
            .map_or(1.0, |(_, d)| *d);
        return ml * density;
    }

    let mut grams = amount * lookup(UNIT_TO_GRAM, unit).unwrap_or(1.0);

    if !unit_given && amount > 0.0 && amount <= 10.0 {
        let piece_weight = INGREDIENT_CONVERSIONS
            .iter()
            .filter(|(key, _)| name.contains(key))
            .find_map(|(_, conversions)| {
                lookup(conversions, "piece")
                    .or_else(|| lookup(conversions, "medium"))
                    .or_else(|| lookup(conversions, "small"))
            });
        if let Some(weight) = piece_weight {
            debug!(food = %food_name, amount, weight, "Assuming piece count");
            grams = amount * weight;
        }
    }

    grams
}

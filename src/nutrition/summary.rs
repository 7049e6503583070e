//! Per-100g nutrition scaling and accumulation into canonical keys.

use std::collections::BTreeMap;

use serde_json::Value;

pub type NutritionSummary = BTreeMap<String, f64>;

/// Canonical nutrient keys and the aliases accepted for each, in priority order.
const NUTRIENT_KEY_ALIASES: &[(&str, &[&str])] = &[
    ("calories", &["energy_kcal", "kcal"]),
    ("protein", &["protein_g"]),
    ("total_fat", &["fat", "fat_total", "total_fat_g"]),
    ("carbohydrates", &["carbs", "carbohydrate", "carbohydrates_g"]),
    ("dietary_fiber", &["fiber", "fiber_g"]),
    ("total_sugars", &["sugars", "sugar", "sugars_g"]),
    ("saturated_fats", &["saturated_fat", "sat_fat", "saturated_fats_g"]),
    ("trans_fats", &["trans_fat", "trans_fats_g"]),
    ("vitamin_d_iu", &["vitamin_d", "vitamin_d_ug"]),
    ("calcium", &["calcium_mg"]),
    ("iron", &["iron_mg"]),
    ("potassium", &["potassium_mg"]),
];

/// 1 µg of vitamin D is 40 IU.
const VITAMIN_D_IU_PER_UG: f64 = 40.0;

/// Numeric value of a nutrient entry; numeric strings count.
#[must_use]
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn add(summary: &mut NutritionSummary, key: &str, value: Option<f64>, factor: f64) {
    let Some(n) = value.map(|v| v * factor) else {
        return;
    };
    if !n.is_finite() || n <= 0.0 {
        return;
    }
    *summary.entry(key.to_string()).or_insert(0.0) += n;
}

/// Adds `nutrition_100g` scaled to `grams` into `summary`.
///
/// Canonical keys win over their aliases. Keys not covered by the alias table
/// are added unchanged.
pub fn accumulate(summary: &mut NutritionSummary, nutrition_100g: &Value, grams: f64) {
    let factor = grams / 100.0;
    if !factor.is_finite() || factor <= 0.0 {
        return;
    }
    let Some(nutrition) = nutrition_100g.as_object() else {
        return;
    };
    let present = |key: &str| nutrition.get(key).filter(|v| !v.is_null());

    let mut covered: Vec<&str> = Vec::new();
    for &(canon, aliases) in NUTRIENT_KEY_ALIASES {
        if let Some(value) = present(canon) {
            add(summary, canon, numeric(value), factor);
            covered.push(canon);
            continue;
        }

        if let Some((alias, value)) = aliases.iter().find_map(|&a| present(a).map(|v| (a, v))) {
            if canon == "vitamin_d_iu" && alias == "vitamin_d_ug" {
                add(
                    summary,
                    canon,
                    numeric(value).map(|ug| ug * VITAMIN_D_IU_PER_UG),
                    factor,
                );
            } else {
                add(summary, canon, numeric(value), factor);
            }
            covered.push(canon);
            covered.push(alias);
        }
    }

    for (key, value) in nutrition {
        if covered.contains(&key.as_str()) {
            continue;
        }
        add(summary, key, numeric(value), factor);
    }
}

//! Keyword-based habit and category tagging for recipes without stored tags.

use serde_json::Value;

use super::constants as kw;

/// Lowercased title, ingredients and NER entities joined by spaces.
#[must_use]
pub fn text_bag(recipe: &Value) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(title) = recipe.get("title").filter(|t| !t.is_null()) {
        parts.push(value_text(title));
    }
    if let Some(ingredients) = recipe.get("ingredients").and_then(Value::as_array) {
        parts.extend(ingredients.iter().filter(|i| !i.is_null()).map(value_text));
    }
    let ner = recipe
        .get("NER")
        .and_then(Value::as_array)
        .or_else(|| recipe.get("ner").and_then(Value::as_array));
    if let Some(ner) = ner {
        parts.extend(ner.iter().filter(|n| !n.is_null()).map(value_text));
    }

    parts.join(" ").to_lowercase()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True if `text` contains any of `words` (case-insensitive substring).
#[must_use]
pub fn has_any(text: &str, words: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    words.iter().any(|w| lower.contains(&w.to_lowercase()))
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

#[must_use]
pub fn habits(recipe: &Value) -> Vec<String> {
    let txt = text_bag(recipe);
    let mut tags = Vec::new();

    let has_meat = has_any(&txt, kw::MEAT);
    let has_dairy = has_any(&txt, kw::DAIRY);
    let has_eggs = has_any(&txt, kw::EGGS);
    let has_gluten = has_any(&txt, kw::GLUTEN);
    let has_nuts = has_any(&txt, kw::NUTS);
    let has_sugar = has_any(&txt, kw::SUGAR);
    let has_seafood = has_any(&txt, kw::SEAFOOD);
    let has_soy = has_any(&txt, kw::SOY);

    if !has_meat {
        push_unique(&mut tags, "vegetarian");
        if !has_dairy && !has_eggs && !txt.contains("honey") {
            push_unique(&mut tags, "vegan");
        }
    }

    let free_tags = [
        (has_dairy, "dairy_free"),
        (has_eggs, "egg_free"),
        (has_gluten, "gluten_free"),
        (has_nuts, "nut_free"),
        (has_seafood, "seafood_free"),
        (has_soy, "soy_free"),
        (has_sugar, "low_sugar"),
        (has_any(&txt, kw::FISH), "fish_free"),
        (has_any(&txt, kw::SHELLFISH), "shellfish_free"),
    ];
    for (present, tag) in free_tags {
        if !present {
            push_unique(&mut tags, tag);
        }
    }

    if has_any(&txt, kw::SOFT_FOOD) {
        push_unique(&mut tags, "soft_food");
    }

    let contains_tags = [
        (has_meat, "contains_meat"),
        (has_dairy, "contains_dairy"),
        (has_eggs, "contains_eggs"),
        (has_gluten, "contains_gluten"),
        (has_nuts, "contains_nuts"),
        (has_seafood, "contains_seafood"),
        (has_soy, "contains_soy"),
    ];
    for (present, tag) in contains_tags {
        if present {
            push_unique(&mut tags, tag);
        }
    }

    // Placeholders until per-recipe nutrition feeds these.
    for tag in ["low_sodium", "diabetic_friendly", "heart_healthy"] {
        push_unique(&mut tags, tag);
    }

    tags
}

#[must_use]
pub fn categories(recipe: &Value) -> Vec<String> {
    let txt = text_bag(recipe);
    let mut cats = Vec::new();

    let keyword_categories: [(&[&str], &str); 6] = [
        (kw::DESSERT, "dessert"),
        (kw::SOUP, "soup"),
        (kw::SALAD, "salad"),
        (kw::BEVERAGE, "beverage"),
        (kw::BREAKFAST, "breakfast"),
        (kw::SNACK, "snack"),
    ];
    for (words, cat) in keyword_categories {
        if has_any(&txt, words) {
            push_unique(&mut cats, cat);
        }
    }

    if has_any(&txt, kw::MAIN_DISH) {
        push_unique(&mut cats, "lunch");
        push_unique(&mut cats, "dinner");
    }

    if cats.is_empty() {
        cats.push("dinner".to_string());
    }
    cats
}

use mealwise::recipes::tags::{categories, habits, has_any, text_bag};
use serde_json::json;

#[test]
fn test_text_bag_joins_title_ingredients_and_ner() {
    let recipe = json!({
        "title": "Pancakes",
        "ingredients": ["Flour", "Milk"],
        "NER": ["flour", "milk"],
    });
    assert_eq!(text_bag(&recipe), "pancakes flour milk flour milk");
}

#[test]
fn test_has_any_is_case_insensitive() {
    assert!(has_any("Honey Glazed Carrots", &["honey"]));
    assert!(!has_any("", &["honey"]));
    assert!(!has_any("carrots", &["honey"]));
}

#[test]
fn test_plant_based_soup_habits() {
    let recipe = json!({
        "title": "Vegan Lentil Soup",
        "ingredients": ["lentils", "carrots", "vegetable broth"],
    });
    let tags = habits(&recipe);

    for expected in ["vegetarian", "vegan", "dairy_free", "gluten_free", "soft_food", "low_sodium"] {
        assert!(tags.contains(&expected.to_string()), "missing {expected}: {tags:?}");
    }
    assert!(!tags.iter().any(|t| t.starts_with("contains_")));
    assert_eq!(categories(&recipe), vec!["soup"]);
}

#[test]
fn test_meat_and_dairy_habits() {
    let recipe = json!({
        "title": "Butter Chicken",
        "ingredients": ["chicken thighs", "butter", "cream"],
    });
    let tags = habits(&recipe);

    assert!(!tags.contains(&"vegetarian".to_string()));
    assert!(!tags.contains(&"vegan".to_string()));
    assert!(!tags.contains(&"dairy_free".to_string()));
    assert!(tags.contains(&"egg_free".to_string()));
    assert!(tags.contains(&"contains_meat".to_string()));
    assert!(tags.contains(&"contains_dairy".to_string()));
    assert_eq!(categories(&recipe), vec!["lunch", "dinner"]);
}

#[test]
fn test_honey_rules_out_vegan() {
    let recipe = json!({ "title": "Honey Oat Bars", "ingredients": ["oats", "honey"] });
    let tags = habits(&recipe);

    assert!(tags.contains(&"vegetarian".to_string()));
    assert!(!tags.contains(&"vegan".to_string()));
    assert!(!tags.contains(&"low_sugar".to_string()));
}

#[test]
fn test_uncategorized_recipe_defaults_to_dinner() {
    assert_eq!(categories(&json!({ "title": "Mystery" })), vec!["dinner"]);
}

use mealwise::nutrition::variations::{
    is_negligible, norm, normalize_name_for_search, search_variations,
};

#[test]
fn test_norm_strips_quantities_units_and_punctuation() {
    assert_eq!(
        norm("2 cups All-Purpose Flour, sifted"),
        "all purpose flour sifted"
    );
    assert_eq!(norm("  "), "");
}

#[test]
fn test_synonyms_map_to_table_names() {
    assert_eq!(normalize_name_for_search("Scallions"), "green onion");
    assert_eq!(normalize_name_for_search("fresh coriander"), "fresh cilantro");
}

#[test]
fn test_variations_drop_descriptors_and_build_phrases() {
    assert_eq!(
        search_variations("chopped fresh spinach"),
        vec![
            "chopped fresh spinach",
            "chopped fresh spinachs",
            "chopped spinach",
            "fresh spinach",
            "spinach",
        ]
    );
}

#[test]
fn test_variations_singularize() {
    assert_eq!(
        search_variations("tomatoes"),
        vec!["tomatoes", "tomato", "tomatoe"]
    );
    assert_eq!(
        search_variations("berries"),
        vec!["berries", "berry", "berri", "berrie"]
    );
}

#[test]
fn test_variations_apply_synonyms_first() {
    assert_eq!(
        search_variations("Scallions"),
        vec!["green onion", "green onions", "onion"]
    );
}

#[test]
fn test_variations_are_unique() {
    let variations = search_variations("fresh basil leaves");
    let mut deduped = variations.clone();
    deduped.dedup();
    assert_eq!(variations.len(), deduped.len());
    assert!(variations.iter().all(|v| !v.is_empty()));
}

#[test]
fn test_empty_names_have_no_variations() {
    assert!(search_variations("").is_empty());
    assert!(search_variations("1/2").is_empty());
}

#[test]
fn test_is_negligible() {
    assert!(is_negligible(0.0, "salt"));
    assert!(!is_negligible(1.0, "salt"));
    assert!(is_negligible(2.0, "parsley for garnish"));
    assert!(is_negligible(1.0, "sour cream, optional"));
    assert!(!is_negligible(1.0, "flour"));
    assert!(!is_negligible(0.0, "flour"));
}

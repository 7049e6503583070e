use mealwise::nutrition::quantity::canonical_unit;
use mealwise::nutrition::parse_amount_unit;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_mixed_number_with_unit() {
    let parsed = parse_amount_unit("1 1/2 cups milk");
    assert_close(parsed.amount, 1.5);
    assert_eq!(parsed.unit, "cup");
    assert!(parsed.unit_given);
    assert_eq!(parsed.name, "milk");
}

#[test]
fn test_ranges_use_midpoint() {
    let parsed = parse_amount_unit("2-3 cloves garlic");
    assert_close(parsed.amount, 2.5);
    assert_eq!(parsed.unit, "clove");
    assert_eq!(parsed.name, "garlic");

    let parsed = parse_amount_unit("2 to 3 tbsp sugar");
    assert_close(parsed.amount, 2.5);
    assert_eq!(parsed.unit, "tbsp");
    assert_eq!(parsed.name, "sugar");
}

#[test]
fn test_unicode_fractions() {
    let parsed = parse_amount_unit("½ tsp salt");
    assert_close(parsed.amount, 0.5);
    assert_eq!(parsed.unit, "tsp");
    assert_eq!(parsed.name, "salt");

    let parsed = parse_amount_unit("1½ cups flour");
    assert_close(parsed.amount, 1.5);
    assert_eq!(parsed.unit, "cup");
    assert_eq!(parsed.name, "flour");
}

#[test]
fn test_unit_attached_to_number() {
    let parsed = parse_amount_unit("200g chicken breast");
    assert_close(parsed.amount, 200.0);
    assert_eq!(parsed.unit, "g");
    assert!(parsed.unit_given);
    assert_eq!(parsed.name, "chicken breast");

    let parsed = parse_amount_unit("1.5 kg potatoes");
    assert_close(parsed.amount, 1.5);
    assert_eq!(parsed.unit, "kg");
    assert_eq!(parsed.name, "potatoes");
}

#[test]
fn test_unit_word_must_end_at_boundary() {
    // "garlic" must not be read as the unit "g".
    let parsed = parse_amount_unit("2 garlic cloves");
    assert_close(parsed.amount, 2.0);
    assert_eq!(parsed.unit, "g");
    assert!(!parsed.unit_given);
    assert_eq!(parsed.name, "garlic cloves");
}

#[test]
fn test_line_without_number_has_zero_amount() {
    let parsed = parse_amount_unit("salt to taste");
    assert_close(parsed.amount, 0.0);
    assert_eq!(parsed.unit, "g");
    assert!(!parsed.unit_given);
    assert_eq!(parsed.name, "salt to taste");
}

#[test]
fn test_approximation_words_are_dropped() {
    let parsed = parse_amount_unit("about 3 large eggs");
    assert_close(parsed.amount, 3.0);
    assert_eq!(parsed.unit, "large");
    assert_eq!(parsed.name, "eggs");

    let parsed = parse_amount_unit("~2 cups rice");
    assert_close(parsed.amount, 2.0);
    assert_eq!(parsed.name, "rice");
}

#[test]
fn test_text_before_quantity_is_kept() {
    let parsed = parse_amount_unit("Salt, 1 tsp");
    assert_close(parsed.amount, 1.0);
    assert_eq!(parsed.unit, "tsp");
    assert_eq!(parsed.name, "Salt");
}

#[test]
fn test_canonical_unit_spellings() {
    assert_eq!(canonical_unit("Tablespoons"), "tbsp");
    assert_eq!(canonical_unit("teaspoon"), "tsp");
    assert_eq!(canonical_unit("lbs"), "lb");
    assert_eq!(canonical_unit("grams"), "g");
    assert_eq!(canonical_unit("slices"), "slice");
    assert_eq!(canonical_unit("oz"), "oz");
}

use mealwise::nutrition::units::convert_to_grams;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_ingredient_specific_weights_win() {
    assert_close(convert_to_grams(1.5, "cup", true, "Whole milk"), 360.0);
    assert_close(convert_to_grams(2.0, "cup", true, "Flour"), 250.0);
    assert_close(convert_to_grams(2.0, "tbsp", true, "Butter, salted"), 28.0);
    assert_close(convert_to_grams(1.0, "stick", true, "butter"), 113.0);
    assert_close(convert_to_grams(2.0, "large", true, "Egg, whole"), 100.0);
}

#[test]
fn test_liquids_use_density() {
    assert_close(convert_to_grams(250.0, "ml", true, "Soy sauce"), 290.0);
    assert_close(convert_to_grams(1.0, "l", true, "water"), 1000.0);
    assert_close(convert_to_grams(100.0, "ml", true, "mystery liquid"), 100.0);
}

#[test]
fn test_general_unit_table_and_unknown_units() {
    assert_close(convert_to_grams(1.0, "cup", true, "zucchini"), 240.0);
    assert_close(convert_to_grams(2.0, "oz", true, "zucchini"), 56.7);
    assert_close(convert_to_grams(3.0, "piece", true, "zucchini"), 3.0);
}

#[test]
fn test_piece_heuristic_only_without_written_unit() {
    assert_close(convert_to_grams(2.0, "g", false, "Banana, raw"), 236.0);
    assert_close(convert_to_grams(2.0, "g", true, "Banana, raw"), 2.0);
    // Large counts are taken as grams.
    assert_close(convert_to_grams(150.0, "g", false, "Banana, raw"), 150.0);
}

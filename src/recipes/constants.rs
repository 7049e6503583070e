//! Limits, keyword lists and the allowed filter values for the recipes API.

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;
/// Page size for each segment of a parallel scan.
pub const PAGE_LIMIT: i32 = 100;

pub const MEAT: &[&str] = &[
    "meat", "chicken", "beef", "pork", "bacon", "lamb", "ham", "turkey", "fish", "tuna", "salmon",
    "shrimp", "anchovy", "gelatin",
];
pub const DAIRY: &[&str] = &["milk", "cheese", "butter", "cream", "yogurt", "whey", "ghee"];
pub const EGGS: &[&str] = &["egg", "eggs", "albumen", "mayonnaise"];
pub const GLUTEN: &[&str] = &[
    "wheat", "flour", "bread", "pasta", "noodle", "semolina", "barley", "rye", "cracker", "beer",
];
pub const NUTS: &[&str] = &[
    "peanut", "almond", "walnut", "pecan", "cashew", "hazelnut", "pistachio", "macadamia",
];
pub const SUGAR: &[&str] = &["sugar", "syrup", "honey", "molasses", "fructose", "glucose", "corn syrup"];
pub const SEAFOOD: &[&str] = &[
    "fish", "salmon", "tuna", "cod", "bass", "tilapia", "shrimp", "crab", "lobster", "shellfish",
];
pub const SOY: &[&str] = &["soy", "soy sauce", "tofu", "tempeh", "miso", "edamame"];
pub const FISH: &[&str] = &["fish", "salmon", "tuna", "cod", "bass", "tilapia"];
pub const SHELLFISH: &[&str] = &["shrimp", "crab", "lobster", "shellfish"];

pub const DESSERT: &[&str] = &["cake", "cookie", "brownie", "pie", "pudding", "mousse", "tart", "frosting"];
pub const SOUP: &[&str] = &["soup", "broth", "chowder", "bisque"];
pub const SALAD: &[&str] = &["salad"];
pub const BEVERAGE: &[&str] = &["smoothie", "juice", "latte", "milkshake", "punch", "lemonade", "drink"];
pub const BREAKFAST: &[&str] = &[
    "pancake", "waffle", "oatmeal", "cereal", "muffin", "granola", "omelet", "breakfast", "toast",
    "bagel", "eggs", "brunch",
];
pub const SNACK: &[&str] = &["dip", "nacho", "popcorn", "bar"];
pub const MAIN_DISH: &[&str] = &[
    "casserole", "stew", "roast", "pasta", "rice", "noodle", "chicken", "beef", "pork", "fish",
];
pub const SOFT_FOOD: &[&str] = &["soup", "puree", "mashed", "smooth", "creamy", "soft", "yogurt", "pudding"];

pub const ALL: &str = "all";

pub const VALID_CATEGORIES: &[&str] = &[
    ALL, "breakfast", "lunch", "dinner", "dessert", "soup", "salad", "snack", "beverage",
];
pub const VALID_DIET_TYPES: &[&str] = &[
    ALL,
    "vegetarian",
    "vegan",
    "low_sugar",
    "low_sodium",
    "diabetic_friendly",
    "heart_healthy",
    "soft_food",
];
pub const VALID_ALLERGY_FILTERS: &[&str] = &[
    ALL,
    "dairy_free",
    "egg_free",
    "gluten_free",
    "nut_free",
    "seafood_free",
    "soy_free",
    "fish_free",
    "shellfish_free",
];

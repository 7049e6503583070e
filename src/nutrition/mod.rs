//! Nutrition matching: parse free-text ingredient lines, find the closest food
//! in the foods table, convert the quantity to grams and sum nutrition.

pub mod handler;
pub mod quantity;
pub mod scoring;
pub mod summary;
pub mod units;
pub mod variations;

pub use handler::{NutritionService, handler};
pub use quantity::{ParsedLine, parse_amount_unit};

//! Foods API: lookup by id and name-prefix search over the foods GSI

pub mod handler;
pub mod normalize;

pub use handler::{FoodsService, handler};
pub use normalize::{first_letter_partition, normalize_food, parse_maybe_json};

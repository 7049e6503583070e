//! Recipes API: lookup, search, filtering and facets over the recipes table

pub mod cache;
pub mod constants;
pub mod filters;
pub mod handler;
pub mod normalize;
pub mod queries;
pub mod tags;

pub use handler::handler;
pub use queries::RecipesService;

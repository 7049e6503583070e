use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "ap-southeast-2";
pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://tp33-data-recipe.s3.ap-southeast-2.amazonaws.com/raw/foodspics";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub recipes_table: String,
    pub foods_table: String,
    pub foods_gsi: String,
    pub candidate_limit: i32,
    pub max_gram_per_line: f64,
    pub image_base_url: String,
    pub query_cache_ttl: Duration,
    pub query_cache_capacity: usize,
    pub scan_segments: i32,
    pub max_scan_items: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recipes_table: "Recipes_i2".to_string(),
            foods_table: "Foods_v2".to_string(),
            foods_gsi: "gsi_name_prefix".to_string(),
            candidate_limit: 15,
            max_gram_per_line: 2000.0,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            query_cache_ttl: Duration::from_secs(30),
            query_cache_capacity: 50,
            scan_segments: 4,
            max_scan_items: 5000,
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error naming the variable if a numeric setting does not parse.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            recipes_table: string_var(&["RECIPES_TABLE"], defaults.recipes_table),
            foods_table: string_var(&["FOODS_TABLE", "TABLE_NAME"], defaults.foods_table),
            foods_gsi: string_var(&["FOODS_GSI", "GSI_NAME"], defaults.foods_gsi),
            candidate_limit: parsed_var("CANDIDATE_LIMIT", defaults.candidate_limit)?,
            max_gram_per_line: parsed_var("MAX_GRAM_PER_LINE", defaults.max_gram_per_line)?,
            image_base_url: string_var(&["RECIPE_IMAGE_BASE_URL"], defaults.image_base_url)
                .trim_end_matches('/')
                .to_string(),
            query_cache_ttl: Duration::from_secs(parsed_var(
                "QUERY_CACHE_TTL_SECS",
                defaults.query_cache_ttl.as_secs(),
            )?),
            query_cache_capacity: parsed_var(
                "QUERY_CACHE_CAPACITY",
                defaults.query_cache_capacity,
            )?,
            scan_segments: parsed_var("SCAN_SEGMENTS", defaults.scan_segments)?.max(1),
            max_scan_items: parsed_var("MAX_SCAN_ITEMS", defaults.max_scan_items)?,
        })
    }

    /// Loads the shared AWS config, falling back to the default region when
    /// `AWS_REGION` is not set.
    pub async fn load_aws_config() -> aws_config::SdkConfig {
        let region = aws_config::meta::region::RegionProviderChain::default_provider()
            .or_else(DEFAULT_REGION);
        aws_config::from_env().region(region).load().await
    }
}

fn string_var(keys: &[&str], default: String) -> String {
    keys.iter()
        .find_map(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or(default)
}

fn parsed_var<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| format!("{key}: {e}")),
        _ => Ok(default),
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

/// Quantity, unit and ingredient name pulled out of one recipe line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub amount: f64,
    /// Canonical unit; `g` when none was written.
    pub unit: String,
    /// False when the line had no unit and `g` was assumed.
    pub unit_given: bool,
    pub name: String,
}

static APPROX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[~≈]|\b(?:about|approx\.?|around|nearly)\b").expect("static regex compile")
});

/// Known unit tokens, longest spelling first.
const UNIT_ALTERNATION: &str = "tablespoons|tablespoon|teaspoons|teaspoon|handful|pounds|pound|breasts|breast|pieces|piece|sticks|stick|slices|slice|cloves|clove|grams|gram|large|medium|small|bunch|pinch|sprig|cups|cup|tbsp|tsp|lbs|lb|oz|kg|ml|can|dash|g|l";

static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)(?:(?P<whole>\d+)\s+(?P<mnum>\d+)/(?P<mden>\d+)|(?P<lo>\d+(?:\.\d+)?)\s*(?:-|\bto\b)\s*(?P<hi>\d+(?:\.\d+)?)|(?P<num>\d+)/(?P<den>\d+)|(?P<dec>\d+(?:\.\d+)?))(?:[\s-]*(?P<unit>{UNIT_ALTERNATION})\b)?\s*(?P<rest>.*)"
    );
    Regex::new(&pattern).expect("static regex compile")
});

fn fraction_text(c: char) -> Option<&'static str> {
    match c {
        '¼' => Some("1/4"),
        '½' => Some("1/2"),
        '¾' => Some("3/4"),
        '⅓' => Some("1/3"),
        '⅔' => Some("2/3"),
        '⅛' => Some("1/8"),
        _ => None,
    }
}

/// Expands unicode vulgar fractions; `1½` becomes the mixed number `1 1/2`.
fn expand_fractions(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match fraction_text(c) {
            Some(text) => {
                if out.chars().last().is_some_and(|p| p.is_ascii_digit()) {
                    out.push(' ');
                }
                out.push_str(text);
            }
            None => out.push(c),
        }
    }
    out
}

/// Maps unit spellings onto the keys used by the conversion tables.
#[must_use]
pub fn canonical_unit(unit: &str) -> String {
    let lower = unit.to_lowercase();
    let canon = match lower.as_str() {
        "gram" | "grams" => "g",
        "pound" | "pounds" | "lbs" => "lb",
        "cups" => "cup",
        "tablespoon" | "tablespoons" => "tbsp",
        "teaspoon" | "teaspoons" => "tsp",
        "slices" => "slice",
        "cloves" => "clove",
        "pieces" => "piece",
        "breasts" => "breast",
        "sticks" => "stick",
        other => other,
    };
    canon.to_string()
}

fn ratio(num: &str, den: &str) -> f64 {
    let n: f64 = num.parse().unwrap_or(0.0);
    let d: f64 = den.parse().unwrap_or(0.0);
    if d == 0.0 { 0.0 } else { n / d }
}

/// Parses lines like `1 1/2 cups milk`, `2-3 cloves garlic` or `½ tsp salt`.
///
/// Ranges resolve to their midpoint. A line without any number yields amount
/// 0 so it cannot contribute phantom calories.
#[must_use]
pub fn parse_amount_unit(line: &str) -> ParsedLine {
    let cleaned = APPROX_RE.replace_all(line.trim(), "");
    let s = expand_fractions(cleaned.trim());

    let Some(caps) = QUANTITY_RE.captures(&s) else {
        return ParsedLine {
            amount: 0.0,
            unit: "g".to_string(),
            unit_given: false,
            name: s.trim().to_string(),
        };
    };

    let amount = if let (Some(whole), Some(num), Some(den)) =
        (caps.name("whole"), caps.name("mnum"), caps.name("mden"))
    {
        whole.as_str().parse::<f64>().unwrap_or(0.0) + ratio(num.as_str(), den.as_str())
    } else if let (Some(lo), Some(hi)) = (caps.name("lo"), caps.name("hi")) {
        let lo: f64 = lo.as_str().parse().unwrap_or(0.0);
        let hi: f64 = hi.as_str().parse().unwrap_or(0.0);
        (lo + hi) / 2.0
    } else if let (Some(num), Some(den)) = (caps.name("num"), caps.name("den")) {
        ratio(num.as_str(), den.as_str())
    } else {
        caps.name("dec")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0)
    };

    let (unit, unit_given) = caps
        .name("unit")
        .map_or(("g".to_string(), false), |m| (canonical_unit(m.as_str()), true));

    // Text ahead of the quantity ("Salt, 1 tsp") is still part of the name.
    let start = caps.get(0).map_or(0, |m| m.start());
    let before = s[..start].trim_matches(|c: char| !c.is_alphanumeric());
    let rest = caps.name("rest").map_or("", |m| m.as_str()).trim();
    let name = match (before.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => before.to_string(),
        (false, false) => format!("{before} {rest}"),
    };

    ParsedLine {
        amount,
        unit,
        unit_given,
        name,
    }
}

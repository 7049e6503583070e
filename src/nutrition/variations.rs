//! Search-term generation for ingredient names.

use once_cell::sync::Lazy;
use regex::Regex;

static SYNONYMS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bscallions?\b", "green onion"),
        (r"(?i)\bspring onions?\b", "green onion"),
        (r"(?i)\bcoriander\b", "cilantro"),
        (r"(?i)\bcapsicum\b", "bell pepper"),
        (r"(?i)\baubergine\b", "eggplant"),
        (r"(?i)\bcourgette\b", "zucchini"),
        (r"(?i)\bconfectioners sugar\b", "powdered sugar"),
        (r"(?i)\bicing sugar\b", "powdered sugar"),
        (r"(?i)\bgarbanzo beans?\b", "chickpeas"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("static regex compile"), replacement))
    .collect()
});

static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d./-]+").expect("static regex compile"));
static UNIT_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:cups?|tbsp|tablespoons?|tsp|teaspoons?|g|kg|oz|ml|l|pounds?|lb|slices?|cloves?)\b")
        .expect("static regex compile")
});
static PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("static regex compile"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex compile"));

static NEGLIGIBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"to taste|pinch|dash|garnish|for serving|to serve|optional")
        .expect("static regex compile")
});
static SEASONING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"salt|pepper|seasoning|spice|herbs?").expect("static regex compile")
});

/// Descriptors dropped one at a time to form simpler variations.
static DESCRIPTOR_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "fresh", "raw", "organic", "dried", "cooked", "boiled", "steamed", "fried", "grilled",
        "baked", "roasted", "whole", "ground", "chopped", "sliced", "diced", "minced",
    ]
    .iter()
    .map(|d| Regex::new(&format!(r"\b{d}\s+")).expect("static regex compile"))
    .collect()
});

/// Adjectives never queried as a single word.
const SKIP_SINGLES: &[&str] = &[
    "thinly", "thickly", "finely", "coarsely", "lightly", "heavily", "fresh", "freshly", "frozen",
    "dried", "canned", "raw", "cooked", "low", "high", "reduced", "extra", "packed", "chopped",
    "sliced", "diced", "minced", "ground", "shredded", "green", "red", "black", "white", "yellow",
    "brown", "vegetable",
];

/// Preparation tokens left out of phrase building.
const DIRECTIVE_WORDS: &[&str] = &[
    "divided", "seeded", "pitted", "julienned", "leaves", "for", "serving", "serve", "white",
    "part", "only",
];

/// Maps regional names onto the names used in the foods table.
#[must_use]
pub fn normalize_name_for_search(name: &str) -> String {
    SYNONYMS
        .iter()
        .fold(name.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// Lowercases and strips quantities, unit words and punctuation.
#[must_use]
pub fn norm(s: &str) -> String {
    let s = s.to_lowercase();
    let s = NUMERIC_RE.replace_all(&s, " ");
    let s = UNIT_WORD_RE.replace_all(&s, " ");
    let s = PUNCT_RE.replace_all(&s, " ");
    SPACE_RE.replace_all(&s, " ").trim().to_string()
}

fn push_unique(variations: &mut Vec<String>, candidate: String) {
    if !candidate.is_empty() && !variations.contains(&candidate) {
        variations.push(candidate);
    }
}

/// Ordered, de-duplicated search terms for an ingredient name, most specific first.
#[must_use]
pub fn search_variations(name: &str) -> Vec<String> {
    let base = norm(&normalize_name_for_search(name));
    let mut variations = Vec::new();
    if base.is_empty() {
        return variations;
    }
    push_unique(&mut variations, base.clone());

    let len = base.chars().count();
    if let Some(stem) = base.strip_suffix("ies").filter(|_| len > 4) {
        push_unique(&mut variations, format!("{stem}y"));
    }
    if let Some(stem) = base.strip_suffix("es").filter(|_| len > 3) {
        push_unique(&mut variations, stem.to_string());
    }
    match base.strip_suffix('s') {
        Some(stem) if len > 3 => push_unique(&mut variations, stem.to_string()),
        Some(_) => {}
        None => push_unique(&mut variations, format!("{base}s")),
    }

    for re in DESCRIPTOR_RES.iter() {
        let simplified = re.replace(&base, "").trim().to_string();
        if simplified != base {
            push_unique(&mut variations, simplified);
        }
    }

    let words: Vec<&str> = base
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !DIRECTIVE_WORDS.contains(w))
        .collect();
    if words.len() > 1 {
        push_unique(&mut variations, words[words.len() - 2..].join(" "));
        if words.len() >= 3 {
            push_unique(&mut variations, words[words.len() - 3..].join(" "));
        }
        for word in &words {
            if !SKIP_SINGLES.contains(word) {
                push_unique(&mut variations, (*word).to_string());
            }
        }
    }

    variations
}

/// Lines that should contribute no weight: garnishes, optional extras, and
/// unquantified seasonings.
#[must_use]
pub fn is_negligible(amount: f64, name: &str) -> bool {
    let n = name.to_lowercase();
    if NEGLIGIBLE_RE.is_match(&n) {
        return true;
    }
    amount == 0.0 && SEASONING_RE.is_match(&n)
}

//! Normalisation of free-text guidance fields.

use serde::Deserialize;

/// A list field that may arrive either as a `|`-delimited string or as an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListField {
    Delimited(String),
    Items(Vec<Option<String>>),
}

impl ListField {
    /// Trimmed, non-empty items in input order.
    pub(crate) fn into_items(self) -> Vec<String> {
        match self {
            ListField::Delimited(text) => split_list(&text),
            ListField::Items(items) => items
                .into_iter()
                .flatten()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Split a `|`-delimited string into trimmed, non-empty items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Zone used when a record has none.
pub const DEFAULT_ZONE: &str = "Neutral";

/// Canonical casing for the well-known zones; anything else is only trimmed.
pub fn normalize_zone(zone: Option<&str>) -> String {
    let Some(zone) = zone.map(str::trim).filter(|z| !z.is_empty()) else {
        return DEFAULT_ZONE.to_string();
    };
    match zone.to_lowercase().as_str() {
        "very bad" => "Very Bad".to_string(),
        "bad" => "Bad".to_string(),
        "good" => "Good".to_string(),
        "best" => "Best".to_string(),
        _ => zone.to_string(),
    }
}

const DIRECTION_NAMES: [(&str, &str); 16] = [
    ("NORTH", "N"),
    ("NORTH-NORTHEAST", "NNE"),
    ("NORTHEAST", "NE"),
    ("EAST-NORTHEAST", "ENE"),
    ("EAST", "E"),
    ("EAST-SOUTHEAST", "ESE"),
    ("SOUTHEAST", "SE"),
    ("SOUTH-SOUTHEAST", "SSE"),
    ("SOUTH", "S"),
    ("SOUTH-SOUTHWEST", "SSW"),
    ("SOUTHWEST", "SW"),
    ("WEST-SOUTHWEST", "WSW"),
    ("WEST", "W"),
    ("WEST-NORTHWEST", "WNW"),
    ("NORTHWEST", "NW"),
    ("NORTH-NORTHWEST", "NNW"),
];

/// Reduce a free-text direction to its key.
///
/// A parenthesised abbreviation wins (`"North-Northeast (NNE)"` gives `NNE`).
/// Otherwise commas are dropped, `word - word` becomes `word-word`, whitespace
/// collapses and the compass name table is consulted; unknown text comes back
/// upper-cased. Empty input gives an empty key.
pub fn normalize_direction_key(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Some(abbrev) = parenthesized(raw) {
        return abbrev.trim().to_uppercase();
    }

    let without_commas = raw.replace(',', "");
    let joined = without_commas
        .split('-')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("-");
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    let upper = collapsed.to_uppercase();

    DIRECTION_NAMES
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, abbrev)| (*abbrev).to_string())
        .unwrap_or(upper)
}

/// Contents of the first non-empty `( ... )` group.
fn parenthesized(text: &str) -> Option<&str> {
    let mut rest = text;
    loop {
        let open = rest.find('(')?;
        rest = &rest[open + 1..];
        let close = rest.find(')')?;
        if close > 0 {
            return Some(&rest[..close]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_names_and_abbreviations() {
        assert_eq!(normalize_direction_key("North-Northeast"), "NNE");
        assert_eq!(normalize_direction_key("(NNE)"), "NNE");
        assert_eq!(normalize_direction_key("North - Northeast"), "NNE");
        assert_eq!(normalize_direction_key("  south  west "), "SOUTH WEST");
        assert_eq!(normalize_direction_key("Southwest"), "SW");
        assert_eq!(normalize_direction_key("West, Northwest"), "WEST NORTHWEST");
        assert_eq!(normalize_direction_key("Zone 7 (wnw)"), "WNW");
        assert_eq!(normalize_direction_key("ne"), "NE");
        assert_eq!(normalize_direction_key("Centre"), "CENTRE");
        assert_eq!(normalize_direction_key("   "), "");
    }

    #[test]
    fn test_empty_parentheses_fall_through_to_name_table() {
        assert_eq!(normalize_direction_key("East ()"), "EAST ()");
    }

    #[test]
    fn test_later_parenthesised_group_is_used() {
        assert_eq!(normalize_direction_key("East () (E)"), "E");
        assert_eq!(normalize_direction_key("() North (n) (S)"), "N");
        assert_eq!(normalize_direction_key("North (NNE"), "NORTH (NNE");
    }

    #[test]
    fn test_zone_normalization() {
        assert_eq!(normalize_zone(Some("  very BAD ")), "Very Bad");
        assert_eq!(normalize_zone(Some("best")), "Best");
        assert_eq!(normalize_zone(Some("GOOD")), "Good");
        assert_eq!(normalize_zone(Some(" neutral ")), "neutral");
        assert_eq!(normalize_zone(Some("Not Ideal")), "Not Ideal");
        assert_eq!(normalize_zone(None), "Neutral");
        assert_eq!(normalize_zone(Some("")), "Neutral");
    }

    #[test]
    fn test_list_fields() {
        assert_eq!(split_list(" a | b ||c|  "), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());

        let items: ListField = serde_json::from_value(serde_json::json!([" x ", "", null, "y"]))
            .expect("array form");
        assert_eq!(items.into_items(), vec!["x", "y"]);

        let delimited: ListField =
            serde_json::from_value(serde_json::json!("one|two")).expect("string form");
        assert_eq!(delimited.into_items(), vec!["one", "two"]);
    }
}

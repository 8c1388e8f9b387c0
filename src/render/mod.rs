//! SVG stats card rendering
//!
//! Pure functions from a [`Summary`](crate::stats::Summary) to markup.

mod card;
mod pie;

pub use card::render;
pub use pie::pie_chart;

use std::collections::BTreeMap;

/// Slices under this share of the total are grouped into "Others"
const OTHERS_THRESHOLD_PCT: f64 = 1.0;

const OTHERS: &str = "Others";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("Python", "#3776AB"),
    ("TypeScript", "#3178C6"),
    ("JavaScript", "#F7DF1E"),
    ("HTML", "#E34F26"),
    ("CSS", "#1572B6"),
    ("Rust", "#B7410E"),
    ("Solidity", "#363636"),
    ("Circom", "#58A6FF"),
    ("Haskell", "#5D4F85"),
    ("MATLAB", "#0076A8"),
    ("C++", "#00599C"),
    ("R", "#276DC3"),
    ("C", "#A8B9CC"),
    ("Java", "#007396"),
    ("Ruby", "#CC342D"),
    ("Shell", "#4EAA25"),
    ("PowerShell", "#5391FE"),
    ("PLSQL", "#F80000"),
    ("Makefile", "#427819"),
    (OTHERS, "#808080"),
];

const FALLBACK_COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#FFE66D", "#1A535C", "#F7FFF7", "#9B5DE5", "#F15BB5", "#FEE440",
    "#00BBF9", "#00F5D4",
];

/// One language share of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub name: String,
    pub size: u64,
    pub percentage: f64,
    pub color: &'static str,
}

/// Largest languages first, with sub-1% languages folded into "Others".
pub fn language_slices(languages: &BTreeMap<String, u64>) -> Vec<Slice> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let share = |size: u64| size as f64 / total as f64 * 100.0;

    let mut sorted: Vec<(&String, u64)> = languages
        .iter()
        .filter(|(_, size)| **size > 0)
        .map(|(name, size)| (name, *size))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut slices: Vec<Slice> = Vec::new();
    let mut others = 0u64;
    for (name, size) in sorted {
        if share(size) >= OTHERS_THRESHOLD_PCT {
            let color = color_for(name, slices.len());
            slices.push(Slice {
                name: name.clone(),
                size,
                percentage: share(size),
                color,
            });
        } else {
            others += size;
        }
    }

    if others > 0 {
        slices.push(Slice {
            name: OTHERS.to_string(),
            size: others,
            percentage: share(others),
            color: color_for(OTHERS, slices.len()),
        });
    }
    slices
}

fn color_for(name: &str, index: usize) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(lang, _)| *lang == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLORS[index % FALLBACK_COLORS.len()])
}

/// Escape text for inclusion in SVG markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn slices_sorted_and_grouped() {
        let slices = language_slices(&languages(&[
            ("Rust", 600),
            ("Python", 394),
            ("Zig", 4),
            ("Nix", 2),
        ]));

        let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Rust", "Python", "Others"]);
        assert_eq!(slices[2].size, 6);
        assert!((slices[0].percentage - 60.0).abs() < 1e-9);
        assert_eq!(slices[0].color, "#B7410E");
        assert_eq!(slices[2].color, "#808080");
    }

    #[test]
    fn unknown_language_uses_fallback_palette() {
        let slices = language_slices(&languages(&[("Elm", 10)]));
        assert_eq!(slices[0].color, FALLBACK_COLORS[0]);
    }

    #[test]
    fn empty_languages_have_no_slices() {
        assert!(language_slices(&BTreeMap::new()).is_empty());
        assert!(language_slices(&languages(&[("Rust", 0)])).is_empty());
    }

    #[test]
    fn escape_markup() {
        assert_eq!(escape("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}

use std::collections::HashSet;

use crate::models::Medication;

/// Needles identifying PDE5-class medications.
const PDE5_NEEDLES: &[&str] = &["tadalafil", "sildenafil", "vardenafil"];

/// Needles identifying nitrate therapy.
const NITRATE_NEEDLES: &[&str] = &["nitroglycerin", "isosorbide", "nitrate"];

/// Lower-cased, trimmed, non-empty labels as a set.
pub fn to_label_set(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Lower-cased medication names as a set. Duplicates collapse.
pub fn medication_name_set(meds: &[Medication]) -> HashSet<String> {
    meds.iter()
        .map(|m| m.name.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Trimmed, non-empty allergy entries in submission order.
pub fn clean_allergies(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a medication name belongs to the PDE5 inhibitor class.
pub fn is_pde5(name: &str) -> bool {
    let lower = name.to_lowercase();
    PDE5_NEEDLES.iter().any(|n| lower.contains(n))
}

/// Whether a medication name is a nitrate.
pub fn is_nitrate(name: &str) -> bool {
    let lower = name.to_lowercase();
    NITRATE_NEEDLES.iter().any(|n| lower.contains(n))
}

/// Case-insensitive substring test of `needle` inside `haystack`.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

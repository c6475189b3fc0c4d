use std::sync::LazyLock;

use regex::Regex;

/// First "NNN/NN" pair in free text, digits 2-3 wide.
static RE_BP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{2,3})\s*/\s*(\d{2,3})").unwrap());

/// First milligram quantity in a dosage string ("10mg", "0.4 mg", "500 milligrams").
static RE_MG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:mg|milligrams?)\b").unwrap());

/// Body-mass index from kilograms and centimetres.
/// Returns 0.0 when either input is non-positive.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return 0.0;
    }
    let m = height_cm / 100.0;
    weight_kg / (m * m)
}

/// Use the intake's BMI when supplied, otherwise recompute.
pub fn effective_bmi(supplied: f64, weight_kg: f64, height_cm: f64) -> f64 {
    if supplied != 0.0 {
        supplied
    } else {
        compute_bmi(weight_kg, height_cm)
    }
}

/// Parse "systolic/diastolic" out of free text.
///
/// Returns `(0, 0)` when no pair is found. Callers treat that as
/// "no blood-pressure signal", never as a clinical reading.
pub fn parse_blood_pressure(text: &str) -> (u32, u32) {
    let Some(caps) = RE_BP.captures(text) else {
        return (0, 0);
    };
    let systolic = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let diastolic = caps.get(2).and_then(|m| m.as_str().parse().ok());
    match (systolic, diastolic) {
        (Some(s), Some(d)) => (s, d),
        _ => (0, 0),
    }
}

/// Milligram quantity embedded in a dosage string, 0.0 when absent or malformed.
pub fn parse_dose_mg(dosage: &str) -> f64 {
    RE_MG
        .captures(dosage)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Mask appended after the retained first character.
pub const REDACTION_MASK: &str = "***";

/// Redact a patient name for the audit log: first character plus mask.
/// Names of two characters or fewer pass through unchanged.
pub fn redact_patient_ref(name: &str) -> String {
    let name = name.trim();
    if name.chars().count() <= 2 {
        return name.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{first}{REDACTION_MASK}"),
        None => String::new(),
    }
}

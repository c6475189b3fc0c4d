use crate::models::Intake;

/// Check an intake for structural completeness.
///
/// Every check runs; the returned list holds all violations found,
/// in a fixed order. An empty list means scoring may proceed.
pub fn validate_intake(intake: &Intake) -> Vec<String> {
    let mut violations = Vec::new();

    if intake.patient_name.trim().is_empty() {
        violations.push("patientName is required".to_string());
    }
    if intake.age <= 0 {
        violations.push("age must be greater than 0".to_string());
    }
    if !(intake.weight_kg > 0.0) {
        violations.push("weight must be greater than 0".to_string());
    }
    if !(intake.height_cm > 0.0) {
        violations.push("height must be greater than 0".to_string());
    }
    if intake.bp.trim().is_empty() {
        violations.push("bp is required".to_string());
    }
    if intake.complaint.trim().is_empty() {
        violations.push("complaint is required".to_string());
    }

    violations
}

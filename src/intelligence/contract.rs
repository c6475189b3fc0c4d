use serde_json::Value;

use crate::models::AnalysisResponse;

/// Keys every serialized response must carry.
const REQUIRED_KEYS: &[&str] = &[
    "riskLevel",
    "riskScore",
    "flaggedIssues",
    "recommendedPlan",
    "confidence",
    "alternatives",
    "computedBmi",
];

const PLAN_KEYS: &[&str] = &["medication", "dosage", "frequency", "duration", "rationale"];

/// Outbound payload conformance check. Returns violation strings; an
/// empty list means the payload conforms.
pub trait SchemaChecker: Send + Sync {
    fn check(&self, response: &AnalysisResponse) -> Vec<String>;
}

/// Checks the response as it will appear on the wire.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseContractChecker;

impl SchemaChecker for ResponseContractChecker {
    fn check(&self, response: &AnalysisResponse) -> Vec<String> {
        match serde_json::to_value(response) {
            Ok(value) => check_value(&value),
            Err(e) => vec![format!("schema: response is not serializable ({e})")],
        }
    }
}

/// Validate a serialized response payload.
pub fn check_value(value: &Value) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(obj) = value.as_object() else {
        return vec!["schema: response must be an object".to_string()];
    };

    for key in REQUIRED_KEYS {
        if !obj.contains_key(*key) {
            violations.push(format!("schema: missing field {key}"));
        }
    }

    let invalid = obj.get("riskLevel").and_then(Value::as_str) == Some("INVALID");

    if let Some(score) = obj.get("riskScore").and_then(Value::as_i64) {
        if score < 0 {
            violations.push("schema: riskScore must be non-negative".to_string());
        }
    }

    if let Some(confidence) = obj.get("confidence") {
        check_unit_interval(confidence, "confidence", &mut violations);
    }

    if let Some(plan) = obj.get("recommendedPlan").and_then(Value::as_object) {
        for key in PLAN_KEYS {
            if !plan.get(*key).is_some_and(Value::is_string) {
                violations.push(format!("schema: recommendedPlan.{key} must be a string"));
            }
        }
        let medication = plan.get("medication").and_then(Value::as_str).unwrap_or("");
        if !invalid && medication.trim().is_empty() {
            violations.push("schema: recommendedPlan.medication is required".to_string());
        }
    }

    if let Some(issues) = obj.get("flaggedIssues").and_then(Value::as_array) {
        for (i, issue) in issues.iter().enumerate() {
            let described = issue
                .get("description")
                .and_then(Value::as_str)
                .is_some_and(|d| !d.trim().is_empty());
            if !described {
                violations.push(format!("schema: flaggedIssues[{i}].description is required"));
            }
        }
    }

    if let Some(alternatives) = obj.get("alternatives").and_then(Value::as_array) {
        for (i, alt) in alternatives.iter().enumerate() {
            if let Some(confidence) = alt.get("confidence") {
                check_unit_interval(confidence, &format!("alternatives[{i}].confidence"), &mut violations);
            }
        }
    }

    if !invalid && !obj.contains_key("auditId") {
        violations.push("schema: missing field auditId".to_string());
    }

    violations
}

fn check_unit_interval(value: &Value, field: &str, violations: &mut Vec<String>) {
    match value.as_f64() {
        Some(v) if (0.0..=1.0).contains(&v) => {}
        _ => violations.push(format!("schema: {field} must be a number between 0 and 1")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alternative, Issue, IssueType, Plan, RiskLevel, Severity};
    use uuid::Uuid;

    fn conforming() -> AnalysisResponse {
        AnalysisResponse {
            risk_level: RiskLevel::Low,
            risk_score: 2,
            flagged_issues: vec![Issue::new(IssueType::Bmi, Severity::Info, "BMI 27.5 is elevated")],
            recommended_plan: Plan {
                medication: "Tadalafil".into(),
                dosage: "10mg".into(),
                ..Default::default()
            },
            confidence: 0.73,
            alternatives: vec![Alternative {
                medication: "Sildenafil".into(),
                confidence: Some(0.68),
                ..Default::default()
            }],
            computed_bmi: 27.5,
            audit_id: Some(Uuid::new_v4()),
            audited_at: Some(chrono::Utc::now()),
            validation_errors: Vec::new(),
        }
    }

    #[test]
    fn conforming_response_has_no_violations() {
        assert!(ResponseContractChecker.check(&conforming()).is_empty());
    }

    #[test]
    fn invalid_response_needs_no_plan_or_audit() {
        let resp = AnalysisResponse::invalid(vec!["bp is required".into()]);
        assert!(ResponseContractChecker.check(&resp).is_empty());
    }

    #[test]
    fn out_of_range_confidence_is_reported() {
        let mut resp = conforming();
        resp.confidence = 1.2;
        resp.alternatives[0].confidence = Some(-0.1);
        let violations = ResponseContractChecker.check(&resp);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].contains("confidence"));
        assert!(violations[1].contains("alternatives[0]"));
    }

    #[test]
    fn missing_plan_medication_and_audit_reported() {
        let mut resp = conforming();
        resp.recommended_plan.medication.clear();
        resp.audit_id = None;
        let violations = ResponseContractChecker.check(&resp);
        assert!(violations.iter().any(|v| v.contains("recommendedPlan.medication")));
        assert!(violations.iter().any(|v| v.contains("auditId")));
    }

    #[test]
    fn raw_payload_missing_keys() {
        let violations = check_value(&serde_json::json!({"riskLevel": "LOW"}));
        assert!(violations.iter().any(|v| v == "schema: missing field riskScore"));
        assert!(violations.iter().any(|v| v == "schema: missing field auditId"));
        assert_eq!(check_value(&serde_json::json!([])).len(), 1);
    }
}

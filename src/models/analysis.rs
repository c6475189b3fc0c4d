use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{IssueType, RiskLevel, Severity};

/// A flagged clinical concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
}

impl Issue {
    pub fn new(issue_type: IssueType, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity,
            description: description.into(),
        }
    }
}

/// Primary recommended treatment. Exactly one per analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub rationale: String,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.medication.is_empty()
    }
}

/// Secondary treatment option, ranked by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub medication: String,
    pub dosage: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Assigned by the confidence estimator after plan selection.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub confidence: Option<f64>,
}

/// Outward-facing analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub flagged_issues: Vec<Issue>,
    pub recommended_plan: Plan,
    pub confidence: f64,
    pub alternatives: Vec<Alternative>,
    pub computed_bmi: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audit_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audited_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub validation_errors: Vec<String>,
}

impl AnalysisResponse {
    /// Short-circuit result for an intake that failed validation.
    pub fn invalid(violations: Vec<String>) -> Self {
        Self {
            risk_level: RiskLevel::Invalid,
            risk_score: 0,
            flagged_issues: Vec::new(),
            recommended_plan: Plan::default(),
            confidence: 0.0,
            alternatives: Vec::new(),
            computed_bmi: 0.0,
            audit_id: None,
            audited_at: None,
            validation_errors: violations,
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.risk_level == RiskLevel::Invalid
    }

    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.flagged_issues.iter().any(|i| i.issue_type == issue_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_response_shape() {
        let resp = AnalysisResponse::invalid(vec!["age must be greater than 0".into()]);
        assert!(resp.is_invalid());
        assert_eq!(resp.risk_score, 0);
        assert!(resp.recommended_plan.is_empty());
        assert!(resp.flagged_issues.is_empty());
        assert_eq!(resp.validation_errors.len(), 1);
    }

    #[test]
    fn serializes_camel_case_wire_names() {
        let resp = AnalysisResponse::invalid(vec!["x".into()]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["riskLevel"], "INVALID");
        assert_eq!(json["riskScore"], 0);
        assert!(json["recommendedPlan"].is_object());
        assert!(json["validationErrors"].is_array());
        assert!(json.get("auditId").is_none());
    }

    #[test]
    fn issue_serializes_type_key() {
        let issue = Issue::new(IssueType::Allergy, Severity::Danger, "test");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "allergy");
        assert_eq!(json["severity"], "danger");
    }
}

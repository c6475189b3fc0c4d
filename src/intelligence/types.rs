use std::collections::HashSet;

use thiserror::Error;

use crate::models::{AuditSummary, Intake, Issue, RiskLevel};

use super::helpers::{clean_allergies, is_nitrate, medication_name_set, to_label_set};
use super::metrics::{effective_bmi, parse_blood_pressure};

// ---------------------------------------------------------------------------
// Condition labels recognised by the rule set
// ---------------------------------------------------------------------------

pub const HEART_DISEASE: &str = "heart disease";
pub const KIDNEY_DISEASE: &str = "kidney disease";
pub const LIVER_DISEASE: &str = "liver disease";
pub const DIABETES: &str = "diabetes";
pub const HYPERTENSION: &str = "hypertension";

// ---------------------------------------------------------------------------
// ClinicalContext
// ---------------------------------------------------------------------------

/// Derived view of an intake, built into fresh containers.
/// Rules read only from this; the caller's intake is left untouched.
#[derive(Debug, Clone)]
pub struct ClinicalContext {
    pub age: i32,
    pub bmi: f64,
    /// Raw BP text, echoed into issue descriptions.
    pub bp_text: String,
    pub systolic: u32,
    pub diastolic: u32,
    pub conditions: HashSet<String>,
    pub medications: HashSet<String>,
    pub allergies: Vec<String>,
    pub smoking_current: bool,
    pub alcohol_heavy: bool,
    pub has_nitrate: bool,
    /// Lower-cased, trimmed chief complaint.
    pub complaint: String,
}

impl ClinicalContext {
    pub fn from_intake(intake: &Intake) -> Self {
        let (systolic, diastolic) = parse_blood_pressure(&intake.bp);
        let medications = medication_name_set(&intake.medications);
        let has_nitrate = medications.iter().any(|m| is_nitrate(m));

        Self {
            age: intake.age,
            bmi: effective_bmi(intake.bmi, intake.weight_kg, intake.height_cm),
            bp_text: intake.bp.trim().to_string(),
            systolic,
            diastolic,
            conditions: to_label_set(&intake.conditions),
            medications,
            allergies: clean_allergies(intake.allergy_list()),
            smoking_current: intake.smoking.trim().eq_ignore_ascii_case("current"),
            alcohol_heavy: intake.alcohol.trim().eq_ignore_ascii_case("heavy"),
            has_nitrate,
            complaint: intake.complaint.trim().to_lowercase(),
        }
    }

    pub fn has_condition(&self, label: &str) -> bool {
        self.conditions.contains(label)
    }

    /// Exact membership on the lower-cased medication name.
    pub fn takes(&self, medication: &str) -> bool {
        self.medications.contains(medication)
    }

    pub fn has_renal_or_hepatic(&self) -> bool {
        self.has_condition(KIDNEY_DISEASE) || self.has_condition(LIVER_DISEASE)
    }
}

// ---------------------------------------------------------------------------
// Findings & RiskAssessment
// ---------------------------------------------------------------------------

/// Output of a single rule: a score delta and, usually, an issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub delta: i32,
    pub issue: Option<Issue>,
}

impl Finding {
    pub fn issue(delta: i32, issue: Issue) -> Self {
        Self {
            delta,
            issue: Some(issue),
        }
    }

    /// Score contribution with nothing surfaced to the reader.
    pub fn silent(delta: i32) -> Self {
        Self { delta, issue: None }
    }
}

/// Running score and issue list. The score is purely additive;
/// issues keep rule-evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub score: i32,
    pub issues: Vec<Issue>,
}

/// Score every valid intake starts from.
pub const BASELINE_SCORE: i32 = 1;

impl RiskAssessment {
    pub fn new() -> Self {
        Self {
            score: BASELINE_SCORE,
            issues: Vec::new(),
        }
    }

    pub fn apply(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.score += finding.delta;
            if let Some(issue) = finding.issue {
                self.issues.push(issue);
            }
        }
    }

    pub fn level(&self) -> RiskLevel {
        super::scoring::classify_risk(self.score)
    }
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// ReferenceError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, String),
}

// ---------------------------------------------------------------------------
// AnalysisEngine trait
// ---------------------------------------------------------------------------

/// Entry points exposed to the transport layer.
pub trait AnalysisEngine: Send + Sync {
    /// Run the full pipeline on one intake. Never fails: validation and
    /// schema problems are reported inside the response.
    fn analyze(&self, intake: &Intake) -> crate::models::AnalysisResponse;

    /// Most recent audit summaries, newest first.
    fn latest_audits(&self, limit: usize) -> Vec<AuditSummary>;

    /// How many summaries the audit log retains.
    fn audit_retention(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueType, Medication, Severity};

    #[test]
    fn context_is_built_from_intake() {
        let intake = Intake {
            age: 68,
            weight_kg: 90.0,
            height_cm: 170.0,
            bp: " 168/102 ".into(),
            conditions: vec!["Heart Disease".into(), "Hypertension".into()],
            medications: vec![Medication::new("Nitroglycerin", "0.4mg", "PRN")],
            smoking: "Current".into(),
            alcohol: "HEAVY".into(),
            allergies: Some(vec![" Sulfa ".into(), "".into()]),
            complaint: " ED ".into(),
            ..Default::default()
        };

        let ctx = ClinicalContext::from_intake(&intake);
        assert_eq!((ctx.systolic, ctx.diastolic), (168, 102));
        assert_eq!(ctx.bp_text, "168/102");
        assert!(ctx.has_condition(HEART_DISEASE));
        assert!(ctx.has_nitrate);
        assert!(ctx.smoking_current);
        assert!(ctx.alcohol_heavy);
        assert_eq!(ctx.allergies, vec!["Sulfa".to_string()]);
        assert_eq!(ctx.complaint, "ed");
        assert!((ctx.bmi - 31.14).abs() < 0.01);
    }

    #[test]
    fn context_does_not_mutate_intake() {
        let intake = Intake {
            conditions: vec!["  Diabetes ".into()],
            ..Default::default()
        };
        let before = intake.conditions.clone();
        let _ = ClinicalContext::from_intake(&intake);
        assert_eq!(intake.conditions, before);
    }

    #[test]
    fn assessment_is_additive() {
        let mut a = RiskAssessment::new();
        a.apply(vec![
            Finding::silent(1),
            Finding::issue(3, Issue::new(IssueType::Allergy, Severity::Danger, "x")),
            Finding::issue(0, Issue::new(IssueType::CardiacClearance, Severity::Warning, "y")),
        ]);
        assert_eq!(a.score, BASELINE_SCORE + 4);
        assert_eq!(a.issues.len(), 2);
        assert_eq!(a.issues[0].issue_type, IssueType::Allergy);
    }
}

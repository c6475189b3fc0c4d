use crate::models::{Issue, IssueType, RiskLevel, Severity};

use super::messages::MessageTemplates;
use super::types::*;

/// Score thresholds for risk banding.
pub mod risk_thresholds {
    pub const HIGH: i32 = 8;
    pub const MEDIUM: i32 = 4;
}

/// A declarative risk rule. Rules are independent: each inspects the
/// context and pushes zero or more findings.
pub struct RiskRule {
    pub id: &'static str,
    pub check: fn(&ClinicalContext, &mut Vec<Finding>),
}

/// Intake rules in evaluation order. Order shapes the issue list only;
/// the score is a plain sum.
pub static INTAKE_RULES: &[RiskRule] = &[
    RiskRule { id: "bmi", check: bmi_rule },
    RiskRule { id: "blood_pressure", check: blood_pressure_rule },
    RiskRule { id: "heart_disease", check: heart_disease_rule },
    RiskRule { id: "kidney_disease", check: kidney_disease_rule },
    RiskRule { id: "liver_disease", check: liver_disease_rule },
    RiskRule { id: "diabetes", check: diabetes_rule },
    RiskRule { id: "hypertension", check: hypertension_rule },
    RiskRule { id: "age", check: age_rule },
    RiskRule { id: "smoking", check: smoking_rule },
    RiskRule { id: "alcohol", check: alcohol_rule },
    RiskRule { id: "nitrate", check: nitrate_rule },
];

/// Evaluate every intake rule from the baseline score.
pub fn score_intake(ctx: &ClinicalContext) -> RiskAssessment {
    let mut assessment = RiskAssessment::new();
    let mut findings = Vec::new();
    for rule in INTAKE_RULES {
        let before = findings.len();
        (rule.check)(ctx, &mut findings);
        if findings.len() > before {
            tracing::trace!(rule = rule.id, hits = findings.len() - before, "Risk rule fired");
        }
    }
    assessment.apply(findings);
    assessment
}

/// Band a final score. Thresholds are fixed for compatibility.
pub fn classify_risk(score: i32) -> RiskLevel {
    if score >= risk_thresholds::HIGH {
        RiskLevel::High
    } else if score >= risk_thresholds::MEDIUM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn bmi_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.bmi >= 30.0 {
        out.push(Finding::issue(
            2,
            Issue::new(IssueType::Bmi, Severity::Warning, MessageTemplates::bmi_obese(ctx.bmi)),
        ));
    } else if ctx.bmi >= 27.0 {
        out.push(Finding::issue(
            1,
            Issue::new(IssueType::Bmi, Severity::Info, MessageTemplates::bmi_elevated(ctx.bmi)),
        ));
    }
}

fn blood_pressure_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    // (0, 0) means no reading and falls through both tiers.
    if ctx.systolic >= 160 || ctx.diastolic >= 100 {
        out.push(Finding::issue(
            3,
            Issue::new(
                IssueType::BloodPressure,
                Severity::Danger,
                MessageTemplates::bp_uncontrolled(&ctx.bp_text),
            ),
        ));
    } else if ctx.systolic >= 140 || ctx.diastolic >= 90 {
        out.push(Finding::issue(
            2,
            Issue::new(
                IssueType::BloodPressure,
                Severity::Warning,
                MessageTemplates::bp_elevated(&ctx.bp_text),
            ),
        ));
    }
}

fn heart_disease_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.has_condition(HEART_DISEASE) {
        out.push(Finding::issue(
            3,
            Issue::new(
                IssueType::CardiacHistory,
                Severity::Danger,
                MessageTemplates::cardiac_history(),
            ),
        ));
    }
}

fn kidney_disease_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.has_condition(KIDNEY_DISEASE) {
        out.push(Finding::issue(
            2,
            Issue::new(
                IssueType::RenalImpairment,
                Severity::Warning,
                MessageTemplates::renal_impairment(),
            ),
        ));
    }
}

fn liver_disease_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.has_condition(LIVER_DISEASE) {
        out.push(Finding::issue(
            2,
            Issue::new(
                IssueType::HepaticImpairment,
                Severity::Warning,
                MessageTemplates::hepatic_impairment(),
            ),
        ));
    }
}

fn diabetes_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.has_condition(DIABETES) {
        out.push(Finding::issue(
            1,
            Issue::new(IssueType::MetabolicRisk, Severity::Info, MessageTemplates::metabolic_risk()),
        ));
    }
}

fn hypertension_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.has_condition(HYPERTENSION) {
        out.push(Finding::silent(1));
    }
}

fn age_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.age > 65 {
        out.push(Finding::issue(
            2,
            Issue::new(IssueType::AgeRelated, Severity::Info, MessageTemplates::age_related()),
        ));
    } else if ctx.age >= 55 {
        out.push(Finding::silent(1));
    }
}

fn smoking_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.smoking_current {
        out.push(Finding::issue(
            1,
            Issue::new(IssueType::Lifestyle, Severity::Info, MessageTemplates::smoking()),
        ));
    }
}

fn alcohol_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.alcohol_heavy {
        out.push(Finding::issue(
            1,
            Issue::new(IssueType::Alcohol, Severity::Info, MessageTemplates::heavy_alcohol()),
        ));
    }
}

fn nitrate_rule(ctx: &ClinicalContext, out: &mut Vec<Finding>) {
    if ctx.has_nitrate {
        out.push(Finding::issue(
            5,
            Issue::new(
                IssueType::Contraindication,
                Severity::Danger,
                MessageTemplates::nitrate_contraindication(),
            ),
        ));
    }
}

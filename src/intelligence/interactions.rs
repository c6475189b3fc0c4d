use crate::models::{Alternative, Issue, IssueType, Plan, Severity};

use super::helpers::{contains_ci, is_pde5};
use super::messages::MessageTemplates;
use super::metrics::parse_dose_mg;
use super::reference::{ClinicalReferenceData, RuleTerm};
use super::types::{ClinicalContext, Finding, HEART_DISEASE};

/// Everything the plan-dependent rules may look at.
pub struct PlanReview<'a> {
    pub ctx: &'a ClinicalContext,
    pub plan: &'a Plan,
    pub alternatives: &'a [Alternative],
    pub reference: &'a ClinicalReferenceData,
}

impl PlanReview<'_> {
    fn plan_is_pde5(&self) -> bool {
        is_pde5(&self.plan.medication)
    }
}

/// A rule evaluated once the plan is known.
pub struct PlanRule {
    pub id: &'static str,
    pub check: fn(&PlanReview<'_>, &mut Vec<Finding>),
}

/// Plan rules in evaluation order, continuing the intake rules.
pub static PLAN_RULES: &[PlanRule] = &[
    PlanRule { id: "pde5_amlodipine", check: pde5_amlodipine_rule },
    PlanRule { id: "pde5_tamsulosin", check: pde5_tamsulosin_rule },
    PlanRule { id: "pde5_cardiac_clearance", check: pde5_cardiac_rule },
    PlanRule { id: "pde5_heavy_alcohol", check: pde5_alcohol_rule },
    PlanRule { id: "reference_interactions", check: reference_interaction_rule },
    PlanRule { id: "plan_allergy", check: plan_allergy_rule },
    PlanRule { id: "alternative_allergy", check: alternative_allergy_rule },
    PlanRule { id: "pde5_dose_cap", check: pde5_dose_cap_rule },
];

/// Cross-reference the selected plan and alternatives against the
/// patient's medications, conditions and allergies.
pub fn check_plan(review: &PlanReview<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in PLAN_RULES {
        let before = findings.len();
        (rule.check)(review, &mut findings);
        if findings.len() > before {
            tracing::trace!(rule = rule.id, hits = findings.len() - before, "Plan rule fired");
        }
    }
    findings
}

/// First allergy entry contained (case-insensitively) in the medication
/// name. Later matches are not reported.
pub fn first_matching_allergy<'a>(allergies: &'a [String], medication: &str) -> Option<&'a str> {
    allergies
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .find(|a| contains_ci(medication, a))
}

/// Whether a reference-rule term is satisfied by the context or plan.
pub fn term_present(term: &RuleTerm, ctx: &ClinicalContext, plan: &Plan) -> bool {
    match term {
        RuleTerm::Medication(needle) => {
            let needle = needle.to_lowercase();
            ctx.medications.iter().any(|m| m.contains(&needle))
                || plan.medication.to_lowercase().contains(&needle)
        }
        RuleTerm::Condition(label) => ctx.has_condition(&label.to_lowercase()),
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn pde5_amlodipine_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    if review.plan_is_pde5() && review.ctx.takes("amlodipine") {
        out.push(Finding::issue(
            1,
            Issue::new(
                IssueType::DrugInteraction,
                Severity::Warning,
                MessageTemplates::pde5_amlodipine(),
            ),
        ));
    }
}

fn pde5_tamsulosin_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    if review.plan_is_pde5() && review.ctx.takes("tamsulosin") {
        out.push(Finding::issue(
            1,
            Issue::new(
                IssueType::DrugInteraction,
                Severity::Warning,
                MessageTemplates::pde5_tamsulosin(),
            ),
        ));
    }
}

fn pde5_cardiac_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    if review.plan_is_pde5() && review.ctx.has_condition(HEART_DISEASE) {
        out.push(Finding::issue(
            0,
            Issue::new(
                IssueType::CardiacClearance,
                Severity::Warning,
                MessageTemplates::pde5_cardiac_clearance(),
            ),
        ));
    }
}

fn pde5_alcohol_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    if review.plan_is_pde5() && review.ctx.alcohol_heavy {
        out.push(Finding::issue(
            0,
            Issue::new(IssueType::Alcohol, Severity::Info, MessageTemplates::pde5_heavy_alcohol()),
        ));
    }
}

fn reference_interaction_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    for rule in &review.reference.interaction_rules {
        if term_present(&rule.first, review.ctx, review.plan)
            && term_present(&rule.second, review.ctx, review.plan)
        {
            out.push(Finding::issue(
                rule.delta,
                Issue::new(rule.issue_type, rule.severity, rule.description.clone()),
            ));
        }
    }
}

fn plan_allergy_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    if review.plan.medication.is_empty() {
        return;
    }
    if let Some(allergy) = first_matching_allergy(&review.ctx.allergies, &review.plan.medication) {
        out.push(Finding::issue(
            3,
            Issue::new(
                IssueType::Allergy,
                Severity::Danger,
                MessageTemplates::plan_allergy(allergy, &review.plan.medication),
            ),
        ));
    }
}

fn alternative_allergy_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    for alt in review.alternatives {
        if let Some(allergy) = first_matching_allergy(&review.ctx.allergies, &alt.medication) {
            out.push(Finding::issue(
                0,
                Issue::new(
                    IssueType::Allergy,
                    Severity::Warning,
                    MessageTemplates::alternative_allergy(allergy, &alt.medication),
                ),
            ));
        }
    }
}

fn pde5_dose_cap_rule(review: &PlanReview<'_>, out: &mut Vec<Finding>) {
    if !review.plan_is_pde5() {
        return;
    }
    // Unparsable dosage reads as 0 and never trips the cap.
    let dose_mg = parse_dose_mg(&review.plan.dosage);
    let cap = review.reference.pde5_dose_cap_mg;
    if dose_mg > cap {
        out.push(Finding::issue(
            2,
            Issue::new(
                IssueType::DoseCap,
                Severity::Warning,
                MessageTemplates::dose_cap(&review.plan.medication, dose_mg, cap),
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::plans::select_plan;
    use crate::models::{Intake, Medication};

    fn ed_intake() -> Intake {
        Intake {
            patient_name: "Test Patient".into(),
            age: 45,
            weight_kg: 78.0,
            height_cm: 175.0,
            bp: "120/80".into(),
            complaint: "ED".into(),
            ..Default::default()
        }
    }

    fn review_findings(intake: &Intake) -> Vec<Finding> {
        let ctx = ClinicalContext::from_intake(intake);
        let sel = select_plan(&ctx);
        let reference = ClinicalReferenceData::builtin();
        check_plan(&PlanReview {
            ctx: &ctx,
            plan: &sel.plan,
            alternatives: &sel.alternatives,
            reference: &reference,
        })
    }

    fn issues_of(findings: &[Finding], issue_type: IssueType) -> Vec<&Issue> {
        findings
            .iter()
            .filter_map(|f| f.issue.as_ref())
            .filter(|i| i.issue_type == issue_type)
            .collect()
    }

    #[test]
    fn pde5_with_amlodipine_flags_single_hypotension_interaction() {
        let mut intake = ed_intake();
        intake.medications = vec![
            Medication::new("Amlodipine", "5mg", "Daily"),
            Medication::new("amlodipine", "5mg", "Daily"),
        ];
        let findings = review_findings(&intake);
        let interactions = issues_of(&findings, IssueType::DrugInteraction);
        assert_eq!(interactions.len(), 1);
        assert!(interactions[0].description.contains("hypotens"));
        assert_eq!(findings.iter().map(|f| f.delta).sum::<i32>(), 1);
    }

    #[test]
    fn pde5_with_tamsulosin() {
        let mut intake = ed_intake();
        intake.medications = vec![Medication::new("Tamsulosin", "0.4mg", "Daily")];
        let findings = review_findings(&intake);
        let interactions = issues_of(&findings, IssueType::DrugInteraction);
        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].severity, Severity::Warning);
    }

    #[test]
    fn pde5_cardiac_and_alcohol_notes_add_no_score() {
        let mut intake = ed_intake();
        intake.conditions = vec!["Heart Disease".into()];
        intake.alcohol = "heavy".into();
        let findings = review_findings(&intake);
        assert_eq!(issues_of(&findings, IssueType::CardiacClearance).len(), 1);
        assert_eq!(issues_of(&findings, IssueType::Alcohol).len(), 1);
        assert_eq!(findings.iter().map(|f| f.delta).sum::<i32>(), 0);
    }

    #[test]
    fn non_pde5_plan_skips_pde5_rules() {
        let mut intake = ed_intake();
        intake.complaint = "Hair Loss".into();
        intake.medications = vec![Medication::new("Amlodipine", "5mg", "Daily")];
        intake.conditions = vec!["heart disease".into()];
        let findings = review_findings(&intake);
        assert!(findings.is_empty());
    }

    #[test]
    fn reference_rule_matches_plan_and_condition() {
        let mut intake = ed_intake();
        intake.complaint = "hair loss".into();
        intake.conditions = vec!["Pregnancy".into()];
        let findings = review_findings(&intake);
        let contra = issues_of(&findings, IssueType::Contraindication);
        assert_eq!(contra.len(), 1);
        assert_eq!(contra[0].severity, Severity::Danger);
        assert_eq!(findings[0].delta, 2);
    }

    #[test]
    fn reference_rule_matches_two_current_medications() {
        let mut intake = ed_intake();
        intake.complaint = "checkup".into();
        intake.medications = vec![
            Medication::new("Amlodipine", "5mg", "Daily"),
            Medication::new("Simvastatin", "40mg", "Nightly"),
        ];
        let findings = review_findings(&intake);
        assert_eq!(issues_of(&findings, IssueType::DrugInteraction).len(), 1);
    }

    #[test]
    fn metformin_plan_with_contrast_substring() {
        let mut intake = ed_intake();
        intake.complaint = "Weight Loss".into();
        intake.medications = vec![Medication::new("Iodinated contrast (scheduled CT)", "", "")];
        let findings = review_findings(&intake);
        assert_eq!(issues_of(&findings, IssueType::DrugInteraction).len(), 1);
    }

    #[test]
    fn plan_allergy_is_danger_with_fixed_delta() {
        let mut intake = ed_intake();
        intake.allergies = Some(vec!["TADALAFIL".into()]);
        let findings = review_findings(&intake);
        let allergies = issues_of(&findings, IssueType::Allergy);
        // Plan "Tadalafil" and alternative "Tadalafil (daily)" both match.
        assert_eq!(allergies.len(), 2);
        assert_eq!(allergies[0].severity, Severity::Danger);
        assert_eq!(allergies[1].severity, Severity::Warning);
        assert_eq!(findings.iter().map(|f| f.delta).sum::<i32>(), 3);
    }

    #[test]
    fn alternative_allergy_is_warning_only() {
        let mut intake = ed_intake();
        intake.allergies = Some(vec!["sildenafil".into()]);
        let findings = review_findings(&intake);
        let allergies = issues_of(&findings, IssueType::Allergy);
        assert_eq!(allergies.len(), 1);
        assert_eq!(allergies[0].severity, Severity::Warning);
        assert!(allergies[0].description.contains("Sildenafil"));
        assert_eq!(findings.iter().map(|f| f.delta).sum::<i32>(), 0);
    }

    #[test]
    fn first_allergy_match_wins() {
        let allergies = vec!["  ".to_string(), "tada".to_string(), "tadalafil".to_string()];
        assert_eq!(first_matching_allergy(&allergies, "Tadalafil"), Some("tada"));
        assert_eq!(first_matching_allergy(&allergies, "Metformin"), None);
    }

    #[test]
    fn empty_allergy_never_matches() {
        let allergies = vec!["".to_string()];
        assert_eq!(first_matching_allergy(&allergies, "Tadalafil"), None);
    }

    #[test]
    fn dose_cap_fires_above_ceiling() {
        let ctx = ClinicalContext::from_intake(&ed_intake());
        let reference = ClinicalReferenceData::builtin();
        let plan = Plan {
            medication: "Sildenafil".into(),
            dosage: "50mg as needed".into(),
            ..Default::default()
        };
        let findings = check_plan(&PlanReview {
            ctx: &ctx,
            plan: &plan,
            alternatives: &[],
            reference: &reference,
        });
        let caps = issues_of(&findings, IssueType::DoseCap);
        assert_eq!(caps.len(), 1);
        assert_eq!(findings.last().unwrap().delta, 2);
    }

    #[test]
    fn dose_cap_ignores_unparsable_and_at_ceiling() {
        let ctx = ClinicalContext::from_intake(&ed_intake());
        let reference = ClinicalReferenceData::builtin();
        for dosage in ["20mg", "as directed", ""] {
            let plan = Plan {
                medication: "Tadalafil".into(),
                dosage: dosage.into(),
                ..Default::default()
            };
            let findings = check_plan(&PlanReview {
                ctx: &ctx,
                plan: &plan,
                alternatives: &[],
                reference: &reference,
            });
            assert!(issues_of(&findings, IssueType::DoseCap).is_empty(), "{dosage}");
        }
    }
}

use crate::models::{Alternative, Plan};

use super::types::{ClinicalContext, HEART_DISEASE};

/// Complaint branches recognised by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintKind {
    ErectileDysfunction,
    HairLoss,
    WeightLoss,
    General,
}

impl ComplaintKind {
    /// Map a lower-cased complaint to its branch. Anything unknown,
    /// blank included, is `General`.
    pub fn from_complaint(complaint: &str) -> Self {
        match complaint {
            "ed" => Self::ErectileDysfunction,
            "hair loss" => Self::HairLoss,
            "weight loss" => Self::WeightLoss,
            _ => Self::General,
        }
    }
}

/// Primary plan plus ranked alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSelection {
    pub plan: Plan,
    pub alternatives: Vec<Alternative>,
}

/// Select the plan for the context's chief complaint. Stateless lookup.
pub fn select_plan(ctx: &ClinicalContext) -> PlanSelection {
    match ComplaintKind::from_complaint(&ctx.complaint) {
        ComplaintKind::ErectileDysfunction => ed_plan(ctx),
        ComplaintKind::HairLoss => hair_loss_plan(),
        ComplaintKind::WeightLoss => weight_loss_plan(ctx),
        ComplaintKind::General => preventive_care_plan(),
    }
}

fn alternative(medication: &str, dosage: &str, pros: &[&str], cons: &[&str]) -> Alternative {
    Alternative {
        medication: medication.into(),
        dosage: dosage.into(),
        pros: pros.iter().map(|s| s.to_string()).collect(),
        cons: cons.iter().map(|s| s.to_string()).collect(),
        confidence: None,
    }
}

fn ed_plan(ctx: &ClinicalContext) -> PlanSelection {
    if ctx.has_nitrate {
        return PlanSelection {
            plan: Plan {
                medication: "Hold PDE5 inhibitors".into(),
                dosage: "N/A".into(),
                frequency: "Avoid until nitrates are stopped".into(),
                duration: "Reassess after a nitrate-free period".into(),
                rationale: "Nitrate therapy makes PDE5 inhibitors unsafe. Prioritize \
                            cardiology review and lifestyle optimization for ED."
                    .into(),
            },
            alternatives: vec![
                alternative(
                    "Lifestyle & psychosexual therapy",
                    "N/A",
                    &["No hemodynamic risk", "Addresses vascular and psychogenic factors"],
                    &["Slower onset of benefit"],
                ),
                alternative(
                    "Vacuum erection device",
                    "Device-assisted",
                    &["Non-pharmacologic", "No drug interactions"],
                    &["Less spontaneity", "Training required"],
                ),
            ],
        };
    }

    let dosage = if ctx.has_renal_or_hepatic() {
        "5mg (start low due to renal/hepatic risk)"
    } else {
        "10mg"
    };

    let mut rationale = String::from(
        "First-line PDE5 inhibitor with a long half-life for flexible timing. \
         Start low to limit hypotension risk and keep monitoring BP.",
    );
    if ctx.has_condition(HEART_DISEASE) {
        rationale.push_str(" Cardiac history: confirm clearance before sexual activity.");
    }
    if ctx.bmi >= 27.0 {
        rationale.push_str(
            " Weight and activity changes will improve both ED and the cardiometabolic profile.",
        );
    }

    PlanSelection {
        plan: Plan {
            medication: "Tadalafil".into(),
            dosage: dosage.into(),
            frequency: "As needed, 30-60 minutes before sexual activity".into(),
            duration: "30-day supply, renew after follow-up".into(),
            rationale,
        },
        alternatives: vec![
            alternative(
                "Sildenafil",
                "50mg as needed (25mg if sensitive)",
                &["Lower cost", "Shorter duration if side effects occur"],
                &["Shorter window (4-6h)", "Timing affected by meals"],
            ),
            alternative(
                "Tadalafil (daily)",
                "5mg once daily",
                &["Continuous effect", "Supports spontaneity", "May ease urinary symptoms"],
                &["Daily commitment", "Higher cumulative cost"],
            ),
        ],
    }
}

fn hair_loss_plan() -> PlanSelection {
    PlanSelection {
        plan: Plan {
            medication: "Finasteride".into(),
            dosage: "1mg orally once daily".into(),
            frequency: "Daily".into(),
            duration: "3-6 months before full effect".into(),
            rationale: "DHT blocker with the strongest evidence for male pattern hair loss. \
                        Monitor for sexual side effects; avoid when trying to conceive."
                .into(),
        },
        alternatives: vec![
            alternative(
                "Topical Minoxidil 5%",
                "Apply to scalp twice daily",
                &["Over the counter", "Well tolerated"],
                &["Requires adherence", "Temporary shedding may increase"],
            ),
            alternative(
                "Low-level laser therapy",
                "Per device guidance",
                &["Non-drug option"],
                &["Variable evidence", "Cost"],
            ),
        ],
    }
}

fn weight_loss_plan(ctx: &ClinicalContext) -> PlanSelection {
    let mut rationale = String::from(
        "Calorie deficit with structured activity. Metformin improves insulin \
         sensitivity; start low to reduce GI effects.",
    );
    if ctx.bmi >= 35.0 {
        rationale.push_str(" Consider a GLP-1 receptor agonist if no contraindications and coverage allows.");
    }

    PlanSelection {
        plan: Plan {
            medication: "Metformin".into(),
            dosage: "500mg with dinner, uptitrate as tolerated".into(),
            frequency: "Once daily to start; may increase to twice daily".into(),
            duration: "12-week trial with reassessment".into(),
            rationale,
        },
        alternatives: vec![
            alternative(
                "GLP-1 receptor agonist",
                "Per product labeling (weekly titration)",
                &["Robust weight loss", "Cardiometabolic benefit"],
                &["Cost and coverage", "GI side effects", "Avoid with medullary thyroid cancer history"],
            ),
            alternative(
                "Intensive lifestyle program",
                "Nutrition, activity and sleep plan",
                &["Foundational", "No drug interactions"],
                &["Requires adherence", "Slower results"],
            ),
        ],
    }
}

fn preventive_care_plan() -> PlanSelection {
    PlanSelection {
        plan: Plan {
            medication: "Preventive care focus".into(),
            dosage: "N/A".into(),
            frequency: "Per guideline schedule".into(),
            duration: "Ongoing".into(),
            rationale: "No specific complaint matched. Recommend preventive screening, \
                        lifestyle optimization and targeted labs based on history."
                .into(),
        },
        alternatives: vec![alternative(
            "Lifestyle coaching",
            "Weekly sessions",
            &["Addresses root causes", "No drug risk"],
            &["Requires patient engagement"],
        )],
    }
}

use crate::models::{Alternative, Intake, Plan};

use super::helpers::{medication_name_set, round2, to_label_set};

/// Confidence bounds and steps for the heuristic estimator.
pub mod bounds {
    /// Coverage before any optional field is counted.
    pub const BASE_COVERAGE: f64 = 0.60;

    /// Coverage added per populated optional field.
    pub const COVERAGE_STEP: f64 = 0.05;

    pub const PLAN_FLOOR: f64 = 0.55;
    pub const PLAN_WEIGHT: f64 = 0.3;
    pub const PLAN_MAX: f64 = 0.95;

    /// Decay per alternative rank.
    pub const ALTERNATIVE_DECAY: f64 = 0.05;
    pub const ALTERNATIVE_MIN: f64 = 0.40;
    pub const ALTERNATIVE_MAX: f64 = 0.90;
}

/// Confidences for one analysis. `alternatives` is index-aligned with the
/// alternatives passed in.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceScores {
    pub plan: f64,
    pub alternatives: Vec<f64>,
}

/// Produces advisory confidence values for a finalized plan.
///
/// Implementations only annotate: the engine applies the returned numbers
/// after the risk score and plan are fixed, so a provider cannot change
/// either. A model-backed scorer can replace the default heuristic by
/// implementing this trait and passing it to
/// [`DefaultAnalysisEngine::with_confidence`](super::engine::DefaultAnalysisEngine::with_confidence).
pub trait ConfidenceProvider: Send + Sync {
    fn score(&self, intake: &Intake, plan: &Plan, alternatives: &[Alternative]) -> ConfidenceScores;
}

/// Deterministic coverage heuristic. Default provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicConfidence;

impl HeuristicConfidence {
    /// Share of optional signal present on the intake.
    /// Blank condition and medication names do not count. An allergy list
    /// that was sent empty counts; an absent one does not.
    pub fn coverage(intake: &Intake) -> f64 {
        let signals = [
            !intake.bp.trim().is_empty(),
            !to_label_set(&intake.conditions).is_empty(),
            !medication_name_set(&intake.medications).is_empty(),
            intake.allergies.is_some(),
        ];
        let present = signals.iter().filter(|s| **s).count() as f64;
        bounds::BASE_COVERAGE + bounds::COVERAGE_STEP * present
    }

    pub fn plan_confidence(coverage: f64) -> f64 {
        (bounds::PLAN_FLOOR + coverage * bounds::PLAN_WEIGHT).clamp(0.0, bounds::PLAN_MAX)
    }

    /// Confidence for the alternative at `rank` (0-based).
    pub fn alternative_confidence(plan_confidence: f64, rank: usize) -> f64 {
        (plan_confidence - bounds::ALTERNATIVE_DECAY * (rank as f64 + 1.0))
            .clamp(bounds::ALTERNATIVE_MIN, bounds::ALTERNATIVE_MAX)
    }
}

impl ConfidenceProvider for HeuristicConfidence {
    fn score(&self, intake: &Intake, _plan: &Plan, alternatives: &[Alternative]) -> ConfidenceScores {
        let plan = Self::plan_confidence(Self::coverage(intake));
        let alternatives = (0..alternatives.len())
            .map(|rank| round2(Self::alternative_confidence(plan, rank)))
            .collect();
        ConfidenceScores {
            plan: round2(plan),
            alternatives,
        }
    }
}

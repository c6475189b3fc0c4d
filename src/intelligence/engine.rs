use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditStore};
use crate::models::{AnalysisResponse, AuditSummary, Intake};

use super::confidence::{ConfidenceProvider, HeuristicConfidence};
use super::contract::{ResponseContractChecker, SchemaChecker};
use super::helpers::round2;
use super::interactions::{check_plan, PlanReview};
use super::plans::select_plan;
use super::reference::ClinicalReferenceData;
use super::scoring::score_intake;
use super::types::{AnalysisEngine, ClinicalContext};
use super::validation::validate_intake;

/// Default implementation of the analysis engine.
/// Runs validation, scoring, plan selection and the plan checks, then
/// annotates confidence, checks the outbound contract and records the audit.
pub struct DefaultAnalysisEngine {
    pub(crate) reference: ClinicalReferenceData,
    audit: Arc<dyn AuditStore>,
    confidence: Box<dyn ConfidenceProvider>,
    schema: Box<dyn SchemaChecker>,
}

impl DefaultAnalysisEngine {
    pub fn new(reference: ClinicalReferenceData, audit: Arc<dyn AuditStore>) -> Self {
        Self {
            reference,
            audit,
            confidence: Box::new(HeuristicConfidence),
            schema: Box::new(ResponseContractChecker),
        }
    }

    /// Swap the confidence provider. Risk and plan are unaffected.
    pub fn with_confidence(mut self, provider: Box<dyn ConfidenceProvider>) -> Self {
        self.confidence = provider;
        self
    }

    pub fn with_schema_checker(mut self, checker: Box<dyn SchemaChecker>) -> Self {
        self.schema = checker;
        self
    }

    /// Write the audit entry for an assembled response. A store failure
    /// is logged; the response is still returned with its audit id.
    fn record_audit(&self, intake: &Intake, response: &AnalysisResponse) {
        let (Some(audit_id), Some(at)) = (response.audit_id, response.audited_at) else {
            return;
        };
        let entry = AuditEntry::new(
            audit_id,
            at,
            &intake.patient_name,
            &intake.complaint,
            response.risk_level,
            response.risk_score,
        );
        if let Err(e) = self.audit.insert(entry) {
            tracing::warn!(audit_id = %audit_id, error = %e, "Audit write failed");
        }
    }
}

impl AnalysisEngine for DefaultAnalysisEngine {
    fn analyze(&self, intake: &Intake) -> AnalysisResponse {
        let start = Instant::now();

        let violations = validate_intake(intake);
        if !violations.is_empty() {
            tracing::info!(violations = violations.len(), "Intake rejected by validation");
            return AnalysisResponse::invalid(violations);
        }

        let ctx = ClinicalContext::from_intake(intake);
        let mut assessment = score_intake(&ctx);
        let selection = select_plan(&ctx);
        assessment.apply(check_plan(&PlanReview {
            ctx: &ctx,
            plan: &selection.plan,
            alternatives: &selection.alternatives,
            reference: &self.reference,
        }));

        let scores = self
            .confidence
            .score(intake, &selection.plan, &selection.alternatives);
        let mut alternatives = selection.alternatives;
        for (alt, confidence) in alternatives.iter_mut().zip(scores.alternatives) {
            alt.confidence = Some(confidence);
        }

        let risk_level = assessment.level();
        let mut response = AnalysisResponse {
            risk_level,
            risk_score: assessment.score,
            flagged_issues: assessment.issues,
            recommended_plan: selection.plan,
            confidence: scores.plan,
            alternatives,
            computed_bmi: round2(ctx.bmi),
            audit_id: Some(Uuid::new_v4()),
            audited_at: Some(Utc::now()),
            validation_errors: Vec::new(),
        };

        let schema_violations = self.schema.check(&response);
        if !schema_violations.is_empty() {
            tracing::warn!(
                violations = schema_violations.len(),
                "Response failed contract check"
            );
            response.validation_errors.extend(schema_violations);
        }

        self.record_audit(intake, &response);

        tracing::info!(
            audit_id = ?response.audit_id,
            risk = %risk_level,
            score = response.risk_score,
            issues = response.flagged_issues.len(),
            processing_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        response
    }

    fn latest_audits(&self, limit: usize) -> Vec<AuditSummary> {
        match self.audit.latest(limit) {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!(error = %e, "Audit query failed");
                Vec::new()
            }
        }
    }

    fn audit_retention(&self) -> usize {
        self.audit.retention()
    }
}

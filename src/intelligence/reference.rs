use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{IssueType, Severity};

use super::types::ReferenceError;

/// Default ceiling for a PDE5 inhibitor plan dose.
pub const DEFAULT_PDE5_DOSE_CAP_MG: f64 = 20.0;

/// One side of an interaction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RuleTerm {
    /// Lower-case needle matched by substring against current medications
    /// and the selected plan's medication.
    Medication(String),
    /// Lower-case condition label matched exactly.
    Condition(String),
}

/// Static pairwise interaction rule (loaded from interaction_rules.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRule {
    pub id: String,
    pub first: RuleTerm,
    pub second: RuleTerm,
    pub delta: i32,
    pub severity: Severity,
    pub issue_type: IssueType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReferenceFile {
    #[serde(default = "default_dose_cap")]
    pde5_dose_cap_mg: f64,
    interaction_rules: Vec<InteractionRule>,
}

fn default_dose_cap() -> f64 {
    DEFAULT_PDE5_DOSE_CAP_MG
}

/// Reference data for the interaction checker.
#[derive(Debug, Clone)]
pub struct ClinicalReferenceData {
    pub interaction_rules: Vec<InteractionRule>,
    pub pde5_dose_cap_mg: f64,
}

impl ClinicalReferenceData {
    /// Load reference data from `interaction_rules.json` in `dir`.
    pub fn load(dir: &Path) -> Result<Self, ReferenceError> {
        let path = dir.join("interaction_rules.json");
        let json = std::fs::read_to_string(&path)
            .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let file: ReferenceFile = serde_json::from_str(json)
            .map_err(|e| ReferenceError::Parse("interaction_rules.json".into(), e.to_string()))?;
        Ok(Self {
            interaction_rules: file.interaction_rules,
            pde5_dose_cap_mg: file.pde5_dose_cap_mg,
        })
    }

    /// Built-in rule table (no file I/O).
    pub fn builtin() -> Self {
        Self {
            interaction_rules: vec![
                InteractionRule {
                    id: "amlodipine_simvastatin".into(),
                    first: RuleTerm::Medication("amlodipine".into()),
                    second: RuleTerm::Medication("simvastatin".into()),
                    delta: 1,
                    severity: Severity::Warning,
                    issue_type: IssueType::DrugInteraction,
                    description: "Amlodipine raises simvastatin exposure; keep simvastatin at \
                                  or below 20mg daily to limit myopathy risk."
                        .into(),
                },
                InteractionRule {
                    id: "metformin_contrast".into(),
                    first: RuleTerm::Medication("metformin".into()),
                    second: RuleTerm::Medication("contrast".into()),
                    delta: 1,
                    severity: Severity::Warning,
                    issue_type: IssueType::DrugInteraction,
                    description: "Metformin with iodinated contrast: hold metformin around the \
                                  study and recheck renal function to limit lactic acidosis risk."
                        .into(),
                },
                InteractionRule {
                    id: "finasteride_pregnancy".into(),
                    first: RuleTerm::Medication("finasteride".into()),
                    second: RuleTerm::Condition("pregnancy".into()),
                    delta: 2,
                    severity: Severity::Danger,
                    issue_type: IssueType::Contraindication,
                    description: "Finasteride is contraindicated in pregnancy; it can affect \
                                  development of a male fetus."
                        .into(),
                },
            ],
            pde5_dose_cap_mg: DEFAULT_PDE5_DOSE_CAP_MG,
        }
    }

    #[cfg(test)]
    pub fn get_rule(&self, id: &str) -> Option<&InteractionRule> {
        self.interaction_rules.iter().find(|r| r.id == id)
    }
}

impl Default for ClinicalReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_named_rules() {
        let data = ClinicalReferenceData::builtin();
        assert!(data.get_rule("amlodipine_simvastatin").is_some());
        assert!(data.get_rule("metformin_contrast").is_some());
        assert!(data.get_rule("finasteride_pregnancy").is_some());
        assert!(data.get_rule("unknown").is_none());
        assert_eq!(data.pde5_dose_cap_mg, 20.0);
    }

    #[test]
    fn bundled_json_matches_builtin() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/reference");
        let loaded = ClinicalReferenceData::load(&dir).unwrap();
        let builtin = ClinicalReferenceData::builtin();
        assert_eq!(loaded.interaction_rules, builtin.interaction_rules);
        assert_eq!(loaded.pde5_dose_cap_mg, builtin.pde5_dose_cap_mg);
    }

    #[test]
    fn from_json_defaults_dose_cap() {
        let json = r#"{"interaction_rules": [{
            "id": "x",
            "first": {"kind": "medication", "value": "warfarin"},
            "second": {"kind": "condition", "value": "pregnancy"},
            "delta": 3,
            "severity": "danger",
            "issue_type": "contraindication",
            "description": "test"
        }]}"#;
        let data = ClinicalReferenceData::from_json(json).unwrap();
        assert_eq!(data.interaction_rules.len(), 1);
        assert_eq!(data.pde5_dose_cap_mg, DEFAULT_PDE5_DOSE_CAP_MG);
        assert_eq!(
            data.interaction_rules[0].second,
            RuleTerm::Condition("pregnancy".into())
        );
    }

    #[test]
    fn missing_file_is_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        match ClinicalReferenceData::load(tmp.path()) {
            Err(ReferenceError::Load(_, _)) => {}
            other => panic!("Expected Load error, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        match ClinicalReferenceData::from_json("{not json") {
            Err(ReferenceError::Parse(_, _)) => {}
            other => panic!("Expected Parse error, got: {:?}", other.map(|_| ())),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Patient intake record as submitted by the caller.
///
/// Every field defaults when absent so that structurally incomplete
/// payloads reach the validator instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intake {
    pub patient_name: String,
    pub age: i32,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "height")]
    pub height_cm: f64,
    /// Free text, expected as "systolic/diastolic".
    pub bp: String,
    /// Precomputed BMI; zero means "compute from weight and height".
    pub bmi: f64,
    pub conditions: Vec<String>,
    /// `None` when the field was never supplied, `Some(vec![])` when the
    /// caller explicitly reported no allergies.
    pub allergies: Option<Vec<String>>,
    pub medications: Vec<Medication>,
    pub smoking: String,
    pub alcohol: String,
    pub exercise: String,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medication {
    pub name: String,
    /// Free text; may embed a milligram quantity ("5mg", "0.4 mg").
    pub dosage: String,
    pub frequency: String,
}

impl Medication {
    pub fn new(name: &str, dosage: &str, frequency: &str) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
        }
    }
}

impl Intake {
    /// Allergy entries, treating an unset field as empty.
    pub fn allergy_list(&self) -> &[String] {
        self.allergies.as_deref().unwrap_or(&[])
    }
}

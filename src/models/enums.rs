use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde wire name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(IssueType {
    Bmi => "bmi",
    BloodPressure => "blood_pressure",
    CardiacHistory => "cardiac_history",
    RenalImpairment => "renal_impairment",
    HepaticImpairment => "hepatic_impairment",
    MetabolicRisk => "metabolic_risk",
    AgeRelated => "age_related",
    Lifestyle => "lifestyle",
    Alcohol => "alcohol",
    Contraindication => "contraindication",
    DrugInteraction => "drug_interaction",
    CardiacClearance => "cardiac_clearance",
    Allergy => "allergy",
    DoseCap => "dose_cap",
});

// Variant order drives display ordering: Info < Warning < Danger.
str_enum!(Severity {
    Info => "info",
    Warning => "warning",
    Danger => "danger",
});

str_enum!(RiskLevel {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
    Invalid => "INVALID",
});

pub mod confidence;
pub mod contract;
pub mod engine;
pub mod helpers;
pub mod interactions;
pub mod messages;
pub mod metrics;
pub mod plans;
pub mod reference;
pub mod scoring;
pub mod types;
pub mod validation;

pub use confidence::{ConfidenceProvider, ConfidenceScores, HeuristicConfidence};
pub use contract::{ResponseContractChecker, SchemaChecker};
pub use engine::DefaultAnalysisEngine;
pub use reference::ClinicalReferenceData;
pub use types::{AnalysisEngine, ClinicalContext, ReferenceError};

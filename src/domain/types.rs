use serde::{Deserialize, Serialize};

/// Structured answer expected back from the model for a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDecision {
    pub category: String,
    pub confidence: f64,
}

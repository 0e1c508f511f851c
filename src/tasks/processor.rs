use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    ai::{
        inference::{build_prompt, parse_decision},
        ModelClient, TransportError,
    },
    domain::{Category, ClassificationDecision, Entry, FOLDER_FIELD},
    infrastructure::notifier::Diagnostics,
};

/// Decisions below this confidence fall back to [`Category::NoFolder`].
pub const CONFIDENCE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("error calling Ollama: {0}")]
    Transport(#[from] TransportError),
    #[error("error parsing model response ({reason}): {raw}")]
    Parse { raw: String, reason: String },
    #[error("model returned unknown category {category:?}")]
    UnknownCategory { category: String },
    #[error("model returned confidence {confidence} outside 0.0..=1.0")]
    ConfidenceOutOfRange { confidence: f64 },
}

pub struct Categorizer<C, D> {
    client: C,
    model: String,
    diagnostics: D,
}

impl<C, D> Categorizer<C, D>
where
    C: ModelClient,
    D: Diagnostics,
{
    pub fn new(client: C, model: impl Into<String>, diagnostics: D) -> Self {
        Self {
            client,
            model: model.into(),
            diagnostics,
        }
    }

    /// Always yields a category; every failure is reported and becomes the sentinel.
    pub async fn classify(&self, entry: &Entry) -> Category {
        match self.decide(entry).await {
            Ok(category) => category,
            Err(err) => {
                self.diagnostics.report(&err.to_string());
                Category::NoFolder
            }
        }
    }

    pub async fn decide(&self, entry: &Entry) -> Result<Category, ClassifyError> {
        if entry.login_uri().is_empty() && entry.name().is_empty() {
            return Ok(Category::NoFolder);
        }

        let prompt = build_prompt(entry);
        let raw = self.client.generate(&self.model, &prompt).await?;
        let decision = parse_decision(&raw).map_err(|err| ClassifyError::Parse {
            raw: raw.trim().to_string(),
            reason: err.to_string(),
        })?;
        accept_decision(&decision)
    }

    /// Labels every entry in input order. Originals are left untouched.
    pub async fn run(&self, entries: &[Entry]) -> Vec<Entry> {
        let total = entries.len();
        let mut labeled = Vec::with_capacity(total);
        let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();

        for (index, entry) in entries.iter().enumerate() {
            let category = self.classify(entry).await;
            tracing::debug!(
                target: "processor",
                row = index + 1,
                total,
                name = entry.name(),
                folder = %category,
                "entry categorized"
            );
            *tally.entry(category.label()).or_default() += 1;

            let mut output = entry.clone();
            output.set(FOLDER_FIELD, category.label());
            labeled.push(output);
        }

        tracing::info!(target: "processor", total, summary = ?tally, "categorization finished");
        labeled
    }
}

/// Applies the category policy to a parsed decision. Unknown labels and
/// confidences outside `[0, 1]` are errors. Otherwise the sentinel wins and
/// low confidence falls back to it.
pub fn accept_decision(decision: &ClassificationDecision) -> Result<Category, ClassifyError> {
    let category = Category::from_label(decision.category.trim()).ok_or_else(|| {
        ClassifyError::UnknownCategory {
            category: decision.category.clone(),
        }
    })?;
    if !(0.0..=1.0).contains(&decision.confidence) {
        return Err(ClassifyError::ConfidenceOutOfRange {
            confidence: decision.confidence,
        });
    }

    if category.is_sentinel() || decision.confidence < CONFIDENCE_THRESHOLD {
        return Ok(Category::NoFolder);
    }
    Ok(category)
}

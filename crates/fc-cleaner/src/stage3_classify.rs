//! Stage 3: Classification by declared document type.

use fc_core::config::ClassifierConfig;
use fc_core::DropReason;

/// Classifier verdict for one document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Drop(DropReason),
}

/// Skip types match exactly or as a substring; both checks are case-sensitive.
pub fn classify(doc_type: &str, config: &ClassifierConfig) -> Verdict {
    if let Some(skip) = config.skip_types.iter().find(|t| !t.is_empty() && doc_type.contains(t.as_str())) {
        return Verdict::Drop(DropReason::SkippedType(skip.clone()));
    }
    if !config.technical_prefix.is_empty() && doc_type.starts_with(&config.technical_prefix) {
        return Verdict::Drop(DropReason::TechnicalTagFile);
    }
    Verdict::Keep
}

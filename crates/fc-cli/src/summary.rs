//! Human and JSON summaries printed after a run.

use fc_cleaner::{BatchEntry, CleanedFile};
use fc_core::config::BudgetConfig;
use fc_core::{delivery_mode, estimate_tokens, DeliveryMode, DocumentOutcome};
use serde::Serialize;
use std::path::PathBuf;

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: usize,
    pub cleaned_size: usize,
    pub reduction: f64,
    pub estimated_tokens: usize,
    pub delivery: DeliveryMode,
    pub documents: Vec<DocumentOutcome>,
}

impl FileSummary {
    pub fn new(cleaned: &CleanedFile, budget: &BudgetConfig) -> Self {
        let report = &cleaned.report;
        Self {
            input: cleaned.input.clone(),
            output: cleaned.output.clone(),
            original_size: report.original_size,
            cleaned_size: report.cleaned_size,
            reduction: report.reduction(),
            estimated_tokens: estimate_tokens(&report.text, budget.chars_per_token),
            delivery: delivery_mode(&report.text, budget),
            documents: report.outcomes.clone(),
        }
    }

    pub fn render(&self) -> String {
        [
            format!("Cleaning complete: {}", self.output.display()),
            format!("Original size: {} characters", group_thousands(self.original_size)),
            format!("Cleaned size: {} characters", group_thousands(self.cleaned_size)),
            format!("Compression: {:.1}%", self.reduction * 100.0),
            format!(
                "Estimated tokens: {} ({})",
                group_thousands(self.estimated_tokens),
                self.delivery
            ),
        ]
        .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSummary<'a> {
    pub root: PathBuf,
    pub cleaned: usize,
    pub failed: usize,
    pub files: &'a [BatchEntry],
}

impl<'a> BatchSummary<'a> {
    pub fn new(root: PathBuf, files: &'a [BatchEntry]) -> Self {
        let failed = files.iter().filter(|e| e.is_failed()).count();
        Self { root, cleaned: files.len() - failed, failed, files }
    }

    pub fn render(&self) -> String {
        use fc_cleaner::BatchStatus;

        let mut lines = Vec::with_capacity(self.files.len() + 1);
        for entry in self.files {
            match &entry.status {
                BatchStatus::Cleaned { output, original_size, cleaned_size } => lines.push(format!(
                    "Cleaned {} -> {} ({} -> {} characters)",
                    entry.input.display(),
                    output.display(),
                    group_thousands(*original_size),
                    group_thousands(*cleaned_size)
                )),
                BatchStatus::Failed { error } => {
                    lines.push(format!("Failed {}: {error}", entry.input.display()))
                }
            }
        }
        lines.push(format!(
            "Batch complete: {} cleaned, {} failed under {}",
            self.cleaned,
            self.failed,
            self.root.display()
        ));
        lines.join("\n")
    }
}

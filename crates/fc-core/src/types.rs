use serde::{Deserialize, Serialize};
use std::fmt;

/// The whole input archive, decoded once and never mutated.
#[derive(Debug, Clone)]
pub struct Submission {
    text: String,
}

impl Submission {
    /// Decode raw bytes lossily and normalize line endings to `\n`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let decoded = String::from_utf8_lossy(bytes);
        Self::from_text(&decoded)
    }

    pub fn from_text(text: &str) -> Self {
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.to_string()
        };
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Free-text metadata block preceding the first document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub raw: String,
}

impl Header {
    /// The filer's 10-digit `CENTRAL INDEX KEY`, if the header declares one.
    pub fn central_index_key(&self) -> Option<String> {
        self.raw.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim() != "CENTRAL INDEX KEY" {
                return None;
            }
            let value = value.trim();
            (value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())).then(|| value.to_string())
        })
    }
}

/// One embedded unit of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDocument {
    /// 1-based position in the archive.
    pub index: usize,
    pub doc_type: String,
    pub description: String,
    pub filename: String,
    pub content: String,
}

/// Why a document produced no section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
    /// Declared type is or contains a skipped type.
    SkippedType(String),
    /// Declared type starts with the technical tagging-file prefix.
    TechnicalTagFile,
    /// Nothing left after cleaning.
    EmptyAfterCleaning,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::SkippedType(t) => write!(f, "skipped type {t}"),
            DropReason::TechnicalTagFile => write!(f, "technical tagging file"),
            DropReason::EmptyAfterCleaning => write!(f, "empty after cleaning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Kept { chars: usize },
    Dropped(DropReason),
}

/// Per-document accounting, in archive order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub index: usize,
    pub doc_type: String,
    pub disposition: Disposition,
}

impl DocumentOutcome {
    pub fn is_kept(&self) -> bool {
        matches!(self.disposition, Disposition::Kept { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    Document {
        doc_type: String,
        description: String,
        filename: String,
    },
}

/// One titled block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

/// Final pipeline output. Built once, written once.
#[derive(Debug, Clone)]
pub struct CleaningReport {
    pub sections: Vec<Section>,
    pub outcomes: Vec<DocumentOutcome>,
    pub text: String,
    pub original_size: usize,
    pub cleaned_size: usize,
}

impl CleaningReport {
    /// `1 - cleaned / original`; 0 for an empty original.
    pub fn reduction(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        1.0 - self.cleaned_size as f64 / self.original_size as f64
    }

    pub fn reduction_pct(&self) -> f64 {
        self.reduction() * 100.0
    }

    pub fn kept_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_kept()).count()
    }

    pub fn dropped_count(&self) -> usize {
        self.outcomes.len() - self.kept_count()
    }
}

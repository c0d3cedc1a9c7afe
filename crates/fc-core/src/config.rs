use crate::error::{FcError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn s(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Thresholds and fixed strings for every cleaning stage.
///
/// Each stage receives its own sub-config; nothing in the pipeline reads
/// a global constant. Partial JSON overrides are accepted, missing fields
/// keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub binary: BinaryConfig,
    pub classifier: ClassifierConfig,
    pub metadata: MetadataConfig,
    pub whitespace: WhitespaceConfig,
    pub report: ReportConfig,
    pub budget: BudgetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryConfig {
    /// Shortest base64 run (newlines included) that gets replaced.
    pub min_base64_run: usize,
    pub uuencode_placeholder: String,
    pub base64_placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Document types dropped on exact or substring match (case-sensitive).
    pub skip_types: Vec<String>,
    /// Prefix of technical tagging files (e.g. `EX-101.INS`).
    pub technical_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub reference_fragment: String,
    pub scheme_prefix: String,
    /// A line with more scheme hits than this is tagging noise.
    pub max_reference_hits: usize,
    pub identifier_prefixes: Vec<String>,
    pub identifier_min_suffix_digits: usize,
    /// A line repeating an identifier prefix more often than this is tagging noise.
    pub max_identifier_hits: usize,
    /// Add the filer's CIK from the header to `identifier_prefixes`.
    pub derive_identifier_from_header: bool,
    pub namespace_prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitespaceConfig {
    pub max_blank_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub rule_char: char,
    pub rule_width: usize,
    pub header_title: String,
    pub default_output_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub chars_per_token: usize,
    /// Estimated token count above which the cleaned text is uploaded rather than inlined.
    pub inline_token_threshold: usize,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            min_base64_run: 500,
            uuencode_placeholder: "[BINARY DATA REMOVED]".into(),
            base64_placeholder: "[BASE64 DATA REMOVED]".into(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            skip_types: s(&["GRAPHIC", "ZIP", "JSON", "XBRL", "XML", "XSD"]),
            technical_prefix: "EX-101.".into(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            reference_fragment: "http://fasb.org/us-gaap".into(),
            scheme_prefix: "http://".into(),
            max_reference_hits: 3,
            identifier_prefixes: s(&["0000723125"]),
            identifier_min_suffix_digits: 10,
            max_identifier_hits: 5,
            derive_identifier_from_header: true,
            namespace_prefixes: s(&["iso4217:", "xbrli:"]),
        }
    }
}

impl Default for WhitespaceConfig {
    fn default() -> Self {
        Self { max_blank_lines: 2 }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rule_char: '=',
            rule_width: 60,
            header_title: "SEC FILING HEADER".into(),
            default_output_name: "cleaned.txt".into(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            chars_per_token: 4,
            inline_token_threshold: 80_000,
        }
    }
}

impl CleanerConfig {
    /// Load a (possibly partial) JSON config file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FcError::InputNotFound { path: path.to_path_buf() });
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded cleaner config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.binary.min_base64_run, "binary.min_base64_run"),
            (self.metadata.identifier_min_suffix_digits, "metadata.identifier_min_suffix_digits"),
            (self.report.rule_width, "report.rule_width"),
            (self.budget.chars_per_token, "budget.chars_per_token"),
            (self.budget.inline_token_threshold, "budget.inline_token_threshold"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(FcError::Config(format!("{name} must be greater than zero")));
            }
        }
        if self.metadata.scheme_prefix.is_empty() || self.metadata.reference_fragment.is_empty() {
            return Err(FcError::Config("metadata reference strings must not be empty".into()));
        }
        if self.metadata.identifier_prefixes.iter().any(|p| p.is_empty()) {
            return Err(FcError::Config("metadata.identifier_prefixes must not contain empty prefixes".into()));
        }
        if self.report.default_output_name.trim().is_empty() {
            return Err(FcError::Config("report.default_output_name must not be empty".into()));
        }
        Ok(())
    }
}

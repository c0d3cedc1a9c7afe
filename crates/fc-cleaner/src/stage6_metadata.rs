//! Stage 6: Metadata filtering of dense machine-tagging lines.
//!
//! Repetition thresholds separate tagging noise from prose that happens to
//! mention an identifier or URL once or twice.

use fc_core::config::MetadataConfig;

/// Line filter built from [`MetadataConfig`], optionally extended with
/// identifiers discovered at run time.
#[derive(Debug, Clone)]
pub struct MetadataFilter {
    reference_fragment: String,
    scheme_prefix: String,
    max_reference_hits: usize,
    identifier_prefixes: Vec<String>,
    identifier_min_suffix_digits: usize,
    max_identifier_hits: usize,
    namespace_prefixes: Vec<String>,
}

impl MetadataFilter {
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            reference_fragment: config.reference_fragment.clone(),
            scheme_prefix: config.scheme_prefix.clone(),
            max_reference_hits: config.max_reference_hits,
            identifier_prefixes: config.identifier_prefixes.iter().filter(|p| !p.is_empty()).cloned().collect(),
            identifier_min_suffix_digits: config.identifier_min_suffix_digits,
            max_identifier_hits: config.max_identifier_hits,
            namespace_prefixes: config.namespace_prefixes.iter().filter(|p| !p.is_empty()).cloned().collect(),
        }
    }

    /// Also treat `prefix` as a tagging identifier.
    pub fn with_identifier(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() && !self.identifier_prefixes.contains(&prefix) {
            self.identifier_prefixes.push(prefix);
        }
        self
    }

    pub fn identifier_prefixes(&self) -> &[String] {
        &self.identifier_prefixes
    }

    fn is_reference_noise(&self, line: &str) -> bool {
        !self.reference_fragment.is_empty()
            && line.contains(self.reference_fragment.as_str())
            && line.matches(self.scheme_prefix.as_str()).count() > self.max_reference_hits
    }

    fn is_identifier_noise(&self, line: &str) -> bool {
        self.identifier_prefixes.iter().any(|prefix| {
            has_long_identifier(line, prefix, self.identifier_min_suffix_digits)
                && line.matches(prefix.as_str()).count() > self.max_identifier_hits
        })
    }

    fn is_namespace_line(&self, line: &str) -> bool {
        let line = line.trim_start();
        self.namespace_prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.is_reference_noise(line) || self.is_identifier_noise(line) || self.is_namespace_line(line)
    }

    /// Drop noise lines, keep everything else in order.
    pub fn filter(&self, text: &str) -> String {
        text.split('\n').filter(|line| !self.is_noise(line)).collect::<Vec<_>>().join("\n")
    }
}

/// `prefix` followed by at least `min_digits` ASCII digits somewhere in `line`.
fn has_long_identifier(line: &str, prefix: &str, min_digits: usize) -> bool {
    line.match_indices(prefix).any(|(at, _)| {
        line[at + prefix.len()..].bytes().take_while(u8::is_ascii_digit).count() >= min_digits
    })
}

/// Filter with the configured identifiers only.
pub fn filter(text: &str, config: &MetadataConfig) -> String {
    MetadataFilter::new(config).filter(text)
}

//! Cleaning pipeline: runs every stage over one archive.

use crate::stage3_classify::Verdict;
use crate::stage6_metadata::MetadataFilter;
use crate::{
    stage1_binary, stage2_segment, stage3_classify, stage4_markup, stage5_sanitize, stage7_whitespace,
    stage8_report,
};
use fc_core::error::{FcError, Result};
use fc_core::{
    CleanerConfig, CleaningReport, Disposition, DocumentOutcome, DropReason, Header, Section, SectionKind,
    SubDocument, Submission,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processed {
    Kept(String),
    Dropped(DropReason),
}

/// A cleaned file on disk.
#[derive(Debug, Clone)]
pub struct CleanedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: CleaningReport,
}

/// The filing cleaner.
#[derive(Debug, Clone, Default)]
pub struct FilingCleaner {
    pub config: CleanerConfig,
}

impl FilingCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Clean archive text held in memory.
    pub fn clean_text(&self, raw: &str) -> CleaningReport {
        self.clean_submission(&Submission::from_text(raw))
    }

    pub fn clean_submission(&self, submission: &Submission) -> CleaningReport {
        let original_size = submission.char_len();
        let stripped = stage1_binary::strip(submission.text(), &self.config.binary);
        let segmented = stage2_segment::segment(&stripped);
        let metadata = self.metadata_filter(segmented.header.as_ref());

        let mut sections = Vec::with_capacity(segmented.documents.len() + 1);
        if let Some(header) = &segmented.header {
            let body = stage7_whitespace::normalize(
                &stage4_markup::strip_tags(&header.raw),
                self.config.whitespace.max_blank_lines,
            );
            sections.push(Section { kind: SectionKind::Header, body: body.trim_matches('\n').to_string() });
        }

        let mut outcomes = Vec::with_capacity(segmented.documents.len());
        for doc in segmented.documents {
            let disposition = match self.process_document(&doc, &metadata) {
                Processed::Kept(body) => {
                    let chars = body.chars().count();
                    debug!(index = doc.index, doc_type = %doc.doc_type, chars, "kept document");
                    sections.push(Section {
                        kind: SectionKind::Document {
                            doc_type: doc.doc_type.clone(),
                            description: doc.description,
                            filename: doc.filename,
                        },
                        body,
                    });
                    Disposition::Kept { chars }
                }
                Processed::Dropped(reason) => {
                    debug!(index = doc.index, doc_type = %doc.doc_type, %reason, "dropped document");
                    Disposition::Dropped(reason)
                }
            };
            outcomes.push(DocumentOutcome { index: doc.index, doc_type: doc.doc_type, disposition });
        }

        let assembled = stage8_report::assemble(&sections, &self.config.report);
        let text = self.finish(&assembled, &metadata);
        let cleaned_size = text.chars().count();

        CleaningReport { sections, outcomes, text, original_size, cleaned_size }
    }

    /// Classify, extract and clean one document.
    pub fn process_document(&self, doc: &SubDocument, metadata: &MetadataFilter) -> Processed {
        if let Verdict::Drop(reason) = stage3_classify::classify(&doc.doc_type, &self.config.classifier) {
            return Processed::Dropped(reason);
        }
        let text = stage4_markup::extract(&doc.content);
        let body = self.finish(&text, metadata);
        let body = body.trim_matches('\n');
        if body.is_empty() {
            return Processed::Dropped(DropReason::EmptyAfterCleaning);
        }
        Processed::Kept(body.to_string())
    }

    /// Whitespace, sanitize, metadata filter, whitespace again.
    fn finish(&self, text: &str, metadata: &MetadataFilter) -> String {
        let max_blank = self.config.whitespace.max_blank_lines;
        let text = stage7_whitespace::normalize(text, max_blank);
        let text = stage5_sanitize::sanitize(&text);
        let text = metadata.filter(&text);
        stage7_whitespace::normalize(&text, max_blank)
    }

    fn metadata_filter(&self, header: Option<&Header>) -> MetadataFilter {
        let filter = MetadataFilter::new(&self.config.metadata);
        if !self.config.metadata.derive_identifier_from_header {
            return filter;
        }
        match header.and_then(Header::central_index_key) {
            Some(cik) => {
                debug!(%cik, "using filer CIK as tagging identifier");
                filter.with_identifier(cik)
            }
            None => filter,
        }
    }

    /// Default output location: `default_output_name` beside the input.
    pub fn default_output_path(&self, input: &Path) -> PathBuf {
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.config.report.default_output_name)
    }

    /// Read `input`, clean it and write the report to `output` (or the
    /// default location). Nothing is written when reading fails.
    pub fn clean_file(&self, input: &Path, output: Option<&Path>) -> Result<CleanedFile> {
        if !input.exists() {
            return Err(FcError::InputNotFound { path: input.to_path_buf() });
        }
        if input.is_dir() {
            return Err(FcError::InvalidInput(format!("{} is a directory", input.display())));
        }

        info!(input = %input.display(), "reading filing");
        let bytes = std::fs::read(input)?;
        let report = self.clean_submission(&Submission::from_bytes(&bytes));

        let output = output.map(Path::to_path_buf).unwrap_or_else(|| self.default_output_path(input));
        stage8_report::write(&output, &report.text)?;
        info!(
            output = %output.display(),
            original = report.original_size,
            cleaned = report.cleaned_size,
            kept = report.kept_count(),
            dropped = report.dropped_count(),
            "cleaning complete"
        );

        Ok(CleanedFile { input: input.to_path_buf(), output, report })
    }
}

/// Clean `input` with the default configuration and return the cleaned text.
pub fn clean(input: impl AsRef<Path>, output: Option<&Path>) -> Result<String> {
    FilingCleaner::default()
        .clean_file(input.as_ref(), output)
        .map(|cleaned| cleaned.report.text)
}

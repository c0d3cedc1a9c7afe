//! Filing cleaner: 8-stage pipeline from raw EDGAR archive to plain text.
//!
//! Stages:
//! 1. Binary stripping (uuencoded blocks, long base64 runs)
//! 2. Segmentation into header and documents
//! 3. Classification by declared document type
//! 4. Markup extraction (HTML to text, entity decoding)
//! 5. Character sanitization
//! 6. Metadata filtering (inline tagging noise)
//! 7. Whitespace normalization
//! 8. Report assembly with size accounting

pub mod batch;
pub mod entities;
pub mod pipeline;
pub mod scanner;
pub mod stage1_binary;
pub mod stage2_segment;
pub mod stage3_classify;
pub mod stage4_markup;
pub mod stage5_sanitize;
pub mod stage6_metadata;
pub mod stage7_whitespace;
pub mod stage8_report;

pub use batch::{clean_tree, BatchEntry, BatchStatus};
pub use pipeline::{clean, CleanedFile, FilingCleaner, Processed};

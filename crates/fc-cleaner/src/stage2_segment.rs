//! Stage 2: Segmentation of the archive into header and documents.

use crate::scanner::{self, Case};
use fc_core::{Header, SubDocument};

pub const HEADER_OPEN: &str = "<SEC-HEADER>";
pub const HEADER_CLOSE: &str = "</SEC-HEADER>";
pub const DOCUMENT_OPEN: &str = "<DOCUMENT>";
pub const DOCUMENT_CLOSE: &str = "</DOCUMENT>";
pub const TYPE_TAG: &str = "<TYPE>";
pub const DESCRIPTION_TAG: &str = "<DESCRIPTION>";
pub const FILENAME_TAG: &str = "<FILENAME>";

/// Segmentation result.
#[derive(Debug, Clone, Default)]
pub struct Segmented {
    pub header: Option<Header>,
    pub documents: Vec<SubDocument>,
}

/// Extract the first header block and every document block in source order.
pub fn segment(text: &str) -> Segmented {
    let header = scanner::first_block(text, HEADER_OPEN, HEADER_CLOSE, Case::Sensitive)
        .filter(|b| !b.inner.trim().is_empty())
        .map(|b| Header { raw: b.inner.to_string() });

    let documents = scanner::all_blocks(text, DOCUMENT_OPEN, DOCUMENT_CLOSE, Case::Sensitive)
        .into_iter()
        .enumerate()
        .map(|(i, block)| parse_document(i + 1, block.inner))
        .collect();

    Segmented { header, documents }
}

/// Build a document from its block body; `index` is 1-based.
pub fn parse_document(index: usize, body: &str) -> SubDocument {
    SubDocument {
        index,
        doc_type: scanner::field_value(body, TYPE_TAG).unwrap_or_else(|| format!("DOCUMENT_{index}")),
        description: scanner::field_value(body, DESCRIPTION_TAG).unwrap_or_default(),
        filename: scanner::field_value(body, FILENAME_TAG).unwrap_or_default(),
        content: body.to_string(),
    }
}

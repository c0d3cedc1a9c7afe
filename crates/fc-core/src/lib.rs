pub mod budget;
pub mod config;
pub mod error;
pub mod types;

pub use budget::{delivery_mode, estimate_tokens, DeliveryMode};
pub use config::CleanerConfig;
pub use error::{FcError, Result};
pub use types::{
    CleaningReport, DocumentOutcome, Disposition, DropReason, Header, Section, SectionKind,
    SubDocument, Submission,
};

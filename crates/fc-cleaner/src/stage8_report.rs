//! Stage 8: Report assembly and output.

use fc_core::config::ReportConfig;
use fc_core::error::Result;
use fc_core::{Section, SectionKind};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

fn rule(config: &ReportConfig) -> String {
    std::iter::repeat(config.rule_char).take(config.rule_width).collect()
}

/// Title lines shown between the two rules of a section banner.
pub fn banner_titles(kind: &SectionKind, config: &ReportConfig) -> Vec<String> {
    match kind {
        SectionKind::Header => vec![config.header_title.clone()],
        SectionKind::Document { doc_type, description, filename } => {
            let mut titles = vec![format!("DOCUMENT: {doc_type}")];
            if !description.is_empty() {
                titles.push(format!("DESCRIPTION: {description}"));
            }
            if !filename.is_empty() {
                titles.push(format!("FILENAME: {filename}"));
            }
            titles
        }
    }
}

/// Join sections into report text. Document sections are preceded by a
/// blank line; every section is `rule, titles, rule, body`.
pub fn assemble(sections: &[Section], config: &ReportConfig) -> String {
    let rule = rule(config);
    let mut parts: Vec<String> = Vec::new();

    for section in sections {
        if matches!(section.kind, SectionKind::Document { .. }) {
            parts.push(String::new());
        }
        parts.push(rule.clone());
        parts.extend(banner_titles(&section.kind, config));
        parts.push(rule.clone());
        parts.push(section.body.clone());
    }
    parts.join("\n")
}

/// Write `text` to `path`, creating parent directories.
pub fn write(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

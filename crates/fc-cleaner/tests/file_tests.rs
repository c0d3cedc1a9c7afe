//! File-level tests: reading archives, writing reports, batch cleaning.

use fc_cleaner::batch::{self, BatchStatus};
use fc_cleaner::{clean, clean_tree, FilingCleaner};
use fc_core::FcError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = "<SEC-DOCUMENT>0000123456-24-000001.txt : 20240201
<SEC-HEADER>0000123456-24-000001.hdr.sgml : 20240201
CIK: 0000123456
</SEC-HEADER>
<DOCUMENT>
<TYPE>10-K
<SEQUENCE>1
<FILENAME>form10k.htm
<TEXT>
<P>Revenue grew 10%.</P>
</TEXT>
</DOCUMENT>
<DOCUMENT>
<TYPE>GRAPHIC
<SEQUENCE>2
<FILENAME>logo.jpg
<TEXT>
begin 644 logo.jpg
M86QL;&-E(&1A=&$@:&5R90H
`
end
</TEXT>
</DOCUMENT>
</SEC-DOCUMENT>
";

fn write_sample(dir: &Path, rel: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_default_output_beside_input() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "full-submission.txt", SAMPLE.as_bytes());
    let cleaned = FilingCleaner::default().clean_file(&input, None).unwrap();
    assert_eq!(cleaned.output, tmp.path().join("cleaned.txt"));
    let written = fs::read_to_string(&cleaned.output).unwrap();
    assert_eq!(written, cleaned.report.text);
    assert!(written.lines().any(|l| l == "Revenue grew 10%."));
    assert!(!written.contains("GRAPHIC"));
}

#[test]
fn test_output_parent_directories_created() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "in.txt", SAMPLE.as_bytes());
    let output = tmp.path().join("nested/deeper/out.txt");
    FilingCleaner::default().clean_file(&input, Some(&output)).unwrap();
    assert!(output.exists());
}

#[test]
fn test_missing_input_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("out.txt");
    let err = FilingCleaner::default()
        .clean_file(&tmp.path().join("missing.txt"), Some(&output))
        .unwrap_err();
    assert!(matches!(err, FcError::InputNotFound { .. }));
    assert!(err.to_string().contains("missing.txt"));
    assert!(!output.exists());
}

#[test]
fn test_directory_input_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = FilingCleaner::default().clean_file(tmp.path(), None).unwrap_err();
    assert!(matches!(err, FcError::InvalidInput(_)));
}

#[test]
fn test_clean_entry_point_returns_written_text() {
    let tmp = TempDir::new().unwrap();
    let input = write_sample(tmp.path(), "full-submission.txt", SAMPLE.as_bytes());
    let text = clean(&input, None).unwrap();
    assert_eq!(fs::read_to_string(tmp.path().join("cleaned.txt")).unwrap(), text);
}

#[test]
fn test_invalid_utf8_degrades_without_failing() {
    let tmp = TempDir::new().unwrap();
    let mut bytes = SAMPLE.as_bytes().to_vec();
    let at = SAMPLE.find("Revenue").unwrap();
    bytes.splice(at..at, [0xff, 0xfe]);
    let input = write_sample(tmp.path(), "full-submission.txt", &bytes);
    let cleaned = FilingCleaner::default().clean_file(&input, None).unwrap();
    assert!(cleaned.report.text.contains("Revenue grew 10%."));
}

#[test]
fn test_crlf_input() {
    let tmp = TempDir::new().unwrap();
    let crlf = SAMPLE.replace('\n', "\r\n");
    let input = write_sample(tmp.path(), "full-submission.txt", crlf.as_bytes());
    let cleaned = FilingCleaner::default().clean_file(&input, None).unwrap();
    assert!(cleaned.report.text.lines().any(|l| l == "Revenue grew 10%."));
    assert!(!cleaned.report.text.contains('\r'));
    // sizes are taken from the decoded, newline-normalized text
    assert_eq!(cleaned.report.original_size, SAMPLE.chars().count());
}

#[test]
fn test_batch_cleans_every_submission() {
    let tmp = TempDir::new().unwrap();
    write_sample(tmp.path(), "sec-edgar-filings/ACME/10-K/0001/full-submission.txt", SAMPLE.as_bytes());
    write_sample(tmp.path(), "sec-edgar-filings/ACME/10-K/0002/full-submission.txt", SAMPLE.as_bytes());
    write_sample(tmp.path(), "notes.txt", b"not a filing");

    let entries = clean_tree(&FilingCleaner::default(), tmp.path()).unwrap();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        match &entry.status {
            BatchStatus::Cleaned { output, .. } => {
                assert_eq!(output, &entry.input.with_file_name("cleaned.txt"));
                assert!(output.exists());
            }
            BatchStatus::Failed { error } => panic!("unexpected failure: {error}"),
        }
    }
}

#[test]
fn test_batch_fallback_to_txt_files() {
    let tmp = TempDir::new().unwrap();
    write_sample(tmp.path(), "a/filing.txt", SAMPLE.as_bytes());
    write_sample(tmp.path(), "a/cleaned.txt", b"old output");
    write_sample(tmp.path(), "a/readme.md", b"ignored");
    let found = batch::discover(tmp.path(), "cleaned.txt").unwrap();
    assert_eq!(found, vec![tmp.path().join("a/filing.txt")]);
}

#[test]
fn test_batch_failure_is_recorded() {
    let tmp = TempDir::new().unwrap();
    write_sample(tmp.path(), "a/full-submission.txt", SAMPLE.as_bytes());
    write_sample(tmp.path(), "b/full-submission.txt", SAMPLE.as_bytes());
    // output path occupied by a directory
    fs::create_dir_all(tmp.path().join("a/cleaned.txt")).unwrap();

    let entries = clean_tree(&FilingCleaner::default(), tmp.path()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_failed());
    assert!(!entries[1].is_failed());
}

#[test]
fn test_batch_missing_root() {
    let tmp = TempDir::new().unwrap();
    let err = clean_tree(&FilingCleaner::default(), &tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, FcError::InputNotFound { .. }));
}

#[test]
fn test_batch_fallback_files_get_distinct_outputs() {
    let tmp = TempDir::new().unwrap();
    let alpha = SAMPLE.replace("Revenue grew 10%.", "ALPHA results");
    let beta = SAMPLE.replace("Revenue grew 10%.", "BETA results");
    write_sample(tmp.path(), "filings/a.txt", alpha.as_bytes());
    write_sample(tmp.path(), "filings/b.txt", beta.as_bytes());

    let entries = clean_tree(&FilingCleaner::default(), tmp.path()).unwrap();
    let outputs: Vec<_> = entries
        .iter()
        .map(|e| match &e.status {
            BatchStatus::Cleaned { output, .. } => output.clone(),
            BatchStatus::Failed { error } => panic!("unexpected failure: {error}"),
        })
        .collect();
    assert_eq!(
        outputs,
        vec![tmp.path().join("filings/a.cleaned.txt"), tmp.path().join("filings/b.cleaned.txt")]
    );
    assert!(fs::read_to_string(&outputs[0]).unwrap().contains("ALPHA results"));
    assert!(fs::read_to_string(&outputs[1]).unwrap().contains("BETA results"));
    assert!(!tmp.path().join("filings/cleaned.txt").exists());

    // a second run does not pick up its own outputs
    let found = batch::discover(tmp.path(), "cleaned.txt").unwrap();
    assert_eq!(found, vec![tmp.path().join("filings/a.txt"), tmp.path().join("filings/b.txt")]);
}

#[test]
fn test_plan_outputs_single_input_per_directory() {
    let root = Path::new("/data");
    let plan = batch::plan_outputs(
        vec![root.join("x/filing.txt"), root.join("y/one.txt"), root.join("y/two.txt")],
        "cleaned.txt",
    );
    assert_eq!(plan[0].1, root.join("x/cleaned.txt"));
    assert_eq!(plan[1].1, root.join("y/one.cleaned.txt"));
    assert_eq!(plan[2].1, root.join("y/two.cleaned.txt"));
}

//! quizforge-report: Text and PDF output for generated quizzes.

pub mod pdf;
pub mod text;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use quizforge_core::model::ParsedResult;
use quizforge_core::traits::ReportSink;

pub use pdf::{generate_pdf, write_pdf_report, write_pdf_report_with_font};
pub use text::{generate_text, write_text_report};

pub const TEXT_FILE_NAME: &str = "questions.txt";
pub const PDF_FILE_NAME: &str = "questions.pdf";

/// Replace `path` with `contents` via a temp file in the same directory, so
/// readers never see a partially written file.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Writes `questions.txt` and `questions.pdf` into a directory, replacing
/// the previous pair.
pub struct FileReportSink {
    output_dir: PathBuf,
    font: Option<Vec<u8>>,
    /// Held while both files are replaced so the pair always matches.
    write_lock: Mutex<()>,
}

impl FileReportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            font: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Embed this TrueType font in the PDF instead of Helvetica.
    pub fn with_font(mut self, font: Vec<u8>) -> Self {
        self.font = Some(font);
        self
    }
}

impl ReportSink for FileReportSink {
    fn write(&self, result: &ParsedResult) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                self.output_dir.display()
            )
        })?;
        tracing::debug!(
            "writing {} questions to {}",
            result.questions.len(),
            self.output_dir.display()
        );

        let text = generate_text(result);
        let pdf = generate_pdf(result, self.font.as_deref())?;

        let text_path = self.output_dir.join(TEXT_FILE_NAME);
        let pdf_path = self.output_dir.join(PDF_FILE_NAME);

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        write_atomic(&text_path, text.as_bytes())
            .with_context(|| format!("failed to write text report to {}", text_path.display()))?;
        write_atomic(&pdf_path, &pdf)
            .with_context(|| format!("failed to write PDF report to {}", pdf_path.display()))?;

        Ok(vec![text_path, pdf_path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quizforge_core::model::Question;

    fn result_about(subject: &str) -> ParsedResult {
        ParsedResult {
            questions: (1..=30)
                .map(|i| Question {
                    question: format!("{subject} question {i}?"),
                    answers: vec![format!("{subject} A"), format!("{subject} B")],
                    correct_answer_positions: vec![1],
                })
                .collect(),
            request_message: subject.into(),
            response_message: subject.into(),
        }
    }

    #[test]
    fn sink_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let sink = FileReportSink::new(&out);
        let result = ParsedResult {
            questions: vec![Question {
                question: "Capital of France?".into(),
                answers: vec!["Madrid".into(), "Paris".into()],
                correct_answer_positions: vec![1],
            }],
            request_message: "prompt".into(),
            response_message: "reply".into(),
        };

        let files = sink.write(&result).unwrap();
        assert_eq!(files, vec![out.join(TEXT_FILE_NAME), out.join(PDF_FILE_NAME)]);
        assert_eq!(
            std::fs::read_to_string(&files[0]).unwrap(),
            "Question 1: Capital of France?\nOptions: Madrid, Paris\nCorrect Answers: Paris\n"
        );
        assert!(std::fs::read(&files[1]).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn concurrent_writes_never_mix_results() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(FileReportSink::new(dir.path()));
        let subjects = ["history", "chemistry", "music", "geology"];

        let handles: Vec<_> = subjects
            .iter()
            .map(|subject| {
                let sink = Arc::clone(&sink);
                let result = result_about(subject);
                std::thread::spawn(move || {
                    for _ in 0..5 {
                        sink.write(&result).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = std::fs::read_to_string(dir.path().join(TEXT_FILE_NAME)).unwrap();
        assert!(subjects
            .iter()
            .any(|subject| text == generate_text(&result_about(subject))));

        // Only the two reports remain; temp files were renamed into place.
        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec![PDF_FILE_NAME, TEXT_FILE_NAME]);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.txt");
        std::fs::write(&path, "old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}

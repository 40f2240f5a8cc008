//! PDF quiz report.
//!
//! Rendered with `printpdf` on US-Letter pages. The built-in Helvetica only
//! covers Latin-1; pass a TrueType font to render other scripts.

use std::path::Path;

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use quizforge_core::model::ParsedResult;

use crate::text::question_lines;
use crate::write_atomic;

const PAGE_WIDTH: Mm = Mm(215.9);
const PAGE_HEIGHT: Mm = Mm(279.4);
const MARGIN: Mm = Mm(25.4);
const FONT_SIZE: f32 = 12.0;
/// Line height in points.
const LEADING: f32 = 14.0;
const LINES_PER_PAGE: usize = 46;
/// Wrap column for 12pt text inside the margins.
const WRAP_COLUMNS: usize = 80;
/// Blank lines between questions.
const QUESTION_GAP: usize = 2;
const TITLE: &str = "Quiz";
const LAYER: &str = "Text";

/// Word wrap at `columns` characters; longer words are split.
fn wrap(line: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let current_len = current.chars().count();
        let word_len = word.chars().count();
        if current.is_empty() && word_len <= columns {
            current.push_str(word);
            continue;
        }
        if !current.is_empty() && current_len + 1 + word_len <= columns {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            if current.chars().count() == columns {
                lines.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
    }
    lines.push(current);
    lines
}

/// All physical lines of the report; empty strings are blank lines.
fn layout(result: &ParsedResult) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, q) in result.questions.iter().enumerate() {
        for line in question_lines(i + 1, q) {
            lines.extend(wrap(&line, WRAP_COLUMNS));
        }
        lines.extend(std::iter::repeat(String::new()).take(QUESTION_GAP));
    }
    lines
}

/// Split lines into pages. There is always at least one page.
fn paginate(lines: &[String]) -> Vec<&[String]> {
    let mut pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    if pages.is_empty() {
        pages.push(&[]);
    }
    pages
}

/// True if some text falls outside what the built-in Helvetica can show.
pub fn needs_unicode_font(result: &ParsedResult) -> bool {
    result
        .questions
        .iter()
        .flat_map(|q| std::iter::once(&q.question).chain(&q.answers))
        .any(|s| s.chars().any(|c| c > '\u{ff}'))
}

fn load_font(doc: &PdfDocumentReference, font: Option<&[u8]>) -> Result<IndirectFontRef> {
    match font {
        Some(bytes) => doc
            .add_external_font(bytes)
            .map_err(|e| anyhow::anyhow!("failed to load PDF font: {e}")),
        None => doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow::anyhow!("failed to load Helvetica: {e}")),
    }
}

/// Render the result as a PDF document.
///
/// `font` is the raw contents of a TrueType font to embed; `None` uses
/// Helvetica.
pub fn generate_pdf(result: &ParsedResult, font: Option<&[u8]>) -> Result<Vec<u8>> {
    if font.is_none() && needs_unicode_font(result) {
        tracing::warn!("quiz contains characters Helvetica cannot show; configure pdf_font");
    }

    let lines = layout(result);
    let pages = paginate(&lines);

    let (doc, first_page, first_layer) = PdfDocument::new(TITLE, PAGE_WIDTH, PAGE_HEIGHT, LAYER);
    let font = load_font(&doc, font)?;

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..pages.len() {
        targets.push(doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER));
    }

    for ((page, layer), page_lines) in targets.into_iter().zip(&pages) {
        let layer = doc.get_page(page).get_layer(layer);
        layer.begin_text_section();
        layer.set_font(&font, FONT_SIZE);
        layer.set_line_height(LEADING);
        layer.set_text_cursor(MARGIN, Mm(PAGE_HEIGHT.0 - MARGIN.0));
        for line in page_lines.iter() {
            if !line.is_empty() {
                layer.write_text(line.as_str(), &font);
            }
            layer.add_line_break();
        }
        layer.end_text_section();
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("failed to render PDF: {e}"))
}

/// Write the PDF report to `path` using Helvetica.
pub fn write_pdf_report(result: &ParsedResult, path: &Path) -> Result<()> {
    write_pdf_report_with_font(result, path, None)
}

/// Write the PDF report to `path`, embedding `font` when given.
pub fn write_pdf_report_with_font(
    result: &ParsedResult,
    path: &Path,
    font: Option<&[u8]>,
) -> Result<()> {
    let bytes = generate_pdf(result, font)?;
    write_atomic(path, &bytes)
        .with_context(|| format!("failed to write PDF report to {}", path.display()))
}

//! Parser for the model's quiz reply.
//!
//! The model is asked to answer one question per line in the form
//! `$<n>. <question>|<answer>|<answer>#|...`, where `#` marks a correct
//! answer. Replies drift from that format often enough that parsing never
//! fails: lines that don't look like questions are skipped, and malformed
//! question lines degrade to whatever can be recovered from them.

use rand::Rng;

use crate::model::Question;

/// Marks a correct answer inside an answer field.
const CORRECT_MARKER: char = '#';

/// Source of the random indices used to shuffle answers.
///
/// Implemented for every [`rand::Rng`]; tests implement it directly to pin
/// down the exact swap sequence.
pub trait ShuffleSource {
    /// Pick an index uniformly from `0..=upper`.
    fn pick(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> ShuffleSource for R {
    fn pick(&mut self, upper: usize) -> usize {
        self.gen_range(0..=upper)
    }
}

/// Parse a full reply into questions, shuffling each question's answers.
pub fn parse_response<S: ShuffleSource + ?Sized>(raw: &str, rng: &mut S) -> Vec<Question> {
    raw.split('\n')
        .filter_map(|line| parse_line(line, rng))
        .collect()
}

/// Whether a line is eligible for parsing as a question.
pub fn is_candidate_line(line: &str) -> bool {
    line.starts_with('$') || line.starts_with(|c: char| c.is_ascii_digit())
}

/// Parse a single line, or `None` if it isn't a candidate question line.
pub fn parse_line<S: ShuffleSource + ?Sized>(line: &str, rng: &mut S) -> Option<Question> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if !is_candidate_line(line) {
        return None;
    }

    let mut fields = line.split('|');
    let header = fields.next().unwrap_or_default();
    let question = question_text(header);

    let mut answers = Vec::new();
    let mut correct_answer_positions = Vec::new();
    for (index, field) in fields.enumerate() {
        let field = field.trim();
        if field.contains(CORRECT_MARKER) {
            correct_answer_positions.push(index);
        }
        answers.push(field.replace(CORRECT_MARKER, ""));
    }

    shuffle_tracking(&mut answers, &mut correct_answer_positions, rng);

    Some(Question {
        question,
        answers,
        correct_answer_positions,
    })
}

/// Strip the `$<n>.` prefix from a header and trim what remains.
fn question_text(header: &str) -> String {
    match header.split_once(". ") {
        Some((_, rest)) => rest.trim().to_string(),
        None => header
            .trim_start_matches(|c: char| c == '$' || c.is_ascii_digit())
            .trim_start_matches('.')
            .trim()
            .to_string(),
    }
}

/// Fisher–Yates shuffle that relabels tracked positions on every swap, so
/// each one keeps pointing at the same answer.
fn shuffle_tracking<T, S: ShuffleSource + ?Sized>(
    items: &mut [T],
    positions: &mut [usize],
    rng: &mut S,
) {
    for i in (1..items.len()).rev() {
        let j = rng.pick(i).min(i);
        if i == j {
            continue;
        }
        items.swap(i, j);
        for pos in positions.iter_mut() {
            if *pos == i {
                *pos = j;
            } else if *pos == j {
                *pos = i;
            }
        }
    }
}

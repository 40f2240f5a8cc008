//! Prompt construction for quiz generation.

use crate::model::QuizForm;

/// Answers requested per question.
pub const ANSWERS_PER_QUESTION: u32 = 4;
/// Maximum question length the model is asked to respect.
pub const MAX_QUESTION_CHARS: u32 = 120;
/// Maximum answer length the model is asked to respect.
pub const MAX_ANSWER_CHARS: u32 = 75;

const FORMAT_EXAMPLE: &str = "\"$1. What is the capital of France?|Paris#|London|Berlin|Madrid
$2. How many letters are in the english alphabet?|30|24|28|26#\"";

/// Build the user message asking the model for a quiz in the line format
/// understood by [`crate::parser`].
pub fn build_prompt(form: &QuizForm) -> String {
    format!(
        "I want to make a quiz about {subject}.
I want {amount} questions, with {ANSWERS_PER_QUESTION} answers per question.
The questions should be in {language}.
Please give me 1 correct answer for each question.
The question can not be longer than {MAX_QUESTION_CHARS} characters, and the answers can not be longer than {MAX_ANSWER_CHARS} characters.
Format: Question|Answer1|Answer2|Answer3|Answer4
A # mark indicates the correct answer.
Each question and its answers should be on a single line.
Before each question, please write the question number with a $ sign in front.
Example response:
{FORMAT_EXAMPLE}",
        subject = form.subject,
        amount = form.amount_of_questions,
        language = form.language.display_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_response, ShuffleSource};

    struct NoSwap;

    impl ShuffleSource for NoSwap {
        fn pick(&mut self, upper: usize) -> usize {
            upper
        }
    }

    #[test]
    fn prompt_mentions_form_fields() {
        let form = QuizForm::new("the Roman Empire", 7, "Italian - Italiano");
        let prompt = build_prompt(&form);
        assert!(prompt.starts_with("I want to make a quiz about the Roman Empire."));
        assert!(prompt.contains("I want 7 questions, with 4 answers per question."));
        assert!(prompt.contains("The questions should be in Italian."));
        assert!(!prompt.contains("Italiano"));
        assert!(prompt.contains("longer than 120 characters"));
        assert!(prompt.contains("longer than 75 characters"));
    }

    #[test]
    fn embedded_example_parses() {
        let prompt = build_prompt(&QuizForm::new("geography", 2, "English"));
        let example = prompt
            .split("Example response:\n\"")
            .nth(1)
            .unwrap()
            .trim_end_matches('"');
        let questions = parse_response(example, &mut NoSwap);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answers(), vec!["Paris"]);
        assert_eq!(questions[1].correct_answers(), vec!["26"]);
    }
}

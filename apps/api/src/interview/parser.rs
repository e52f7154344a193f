//! Response parser: turns a free-text completion into `QaRecord`s.
//!
//! Lexical convention:
//! ```text
//! 1. <question>
//! Answer: <answer, possibly spanning lines>
//! 2. <question>
//! ...
//! ```
//! A numbered line opens a new block. Anything before the first numbered
//! line (model preamble) ends up in the first block; that block still yields
//! a record if a numbered question and an `Answer:` follow the chatter inline.

use std::sync::OnceLock;

use regex::Regex;

use crate::interview::models::QaRecord;

/// `<digits>.` followed by whitespace, at the start of a line.
fn item_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s").expect("valid item regex"))
}

/// Question text runs from after the first `<digits>.` marker to the next
/// line break. Unanchored: the first block may carry leading chatter.
fn question_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.\s*(.+?)\n").expect("valid question regex"))
}

/// Everything after the first `Answer:`, across lines.
fn answer_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Answer:\s*(.*)").expect("valid answer regex"))
}

/// Splits `text` before every line that starts a numbered item.
/// The line break at each boundary belongs to neither block.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for (newline, _) in text.match_indices('\n') {
        let next = newline + 1;
        if item_start().is_match(&text[next..]) {
            blocks.push(&text[start..newline]);
            start = next;
        }
    }
    blocks.push(&text[start..]);
    blocks
}

/// Extracts one record from a block, or `None` if the block lacks a
/// numbered question line or an `Answer:` marker.
pub fn parse_block(block: &str) -> Option<QaRecord> {
    let question = question_pattern().captures(block)?.get(1)?.as_str().trim();
    let answer = answer_pattern().captures(block)?.get(1)?.as_str().trim();

    if question.is_empty() || answer.is_empty() {
        return None;
    }

    Some(QaRecord {
        question: question.to_string(),
        answer: answer.to_string(),
    })
}

/// Parses a completion into records in document order. The count is not
/// checked against the number of questions requested.
pub fn parse_completion(text: &str) -> Vec<QaRecord> {
    split_blocks(text)
        .into_iter()
        .filter_map(parse_block)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa(question: &str, answer: &str) -> QaRecord {
        QaRecord {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_two_item_example() {
        let text = "1. What is a closure?\nAnswer: A function bundled with its lexical scope.\n2. Describe REST.\nAnswer: An architectural style for networked APIs.";
        assert_eq!(
            parse_completion(text),
            vec![
                qa("What is a closure?", "A function bundled with its lexical scope."),
                qa("Describe REST.", "An architectural style for networked APIs."),
            ]
        );
    }

    #[test]
    fn test_preamble_is_discarded() {
        let text = "Sure! Here are your questions:\n\n1. What is Rust?\nAnswer: A systems language.\n";
        assert_eq!(
            parse_completion(text),
            vec![qa("What is Rust?", "A systems language.")]
        );
    }

    #[test]
    fn test_multiline_answer_is_kept_whole() {
        let text = "1. Explain ownership.\nAnswer: Each value has one owner.\nWhen the owner goes out of scope,\nthe value is dropped.\n\n2. Next?\nAnswer: Yes.";
        let records = parse_completion(text);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].answer,
            "Each value has one owner.\nWhen the owner goes out of scope,\nthe value is dropped."
        );
    }

    #[test]
    fn test_second_answer_marker_stays_in_answer() {
        let text = "1. Tricky?\nAnswer: first part\nAnswer: second part";
        assert_eq!(
            parse_completion(text),
            vec![qa("Tricky?", "first part\nAnswer: second part")]
        );
    }

    #[test]
    fn test_block_without_answer_is_dropped() {
        let text = "1. Orphan question\nNo marker here.\n2. Good question\nAnswer: Good answer.";
        assert_eq!(
            parse_completion(text),
            vec![qa("Good question", "Good answer.")]
        );
    }

    #[test]
    fn test_no_numbered_items_yields_nothing() {
        assert!(parse_completion("I cannot help with that request.").is_empty());
        assert!(parse_completion("").is_empty());
    }

    #[test]
    fn test_all_blocks_missing_answers_yields_nothing() {
        let text = "1. First?\n2. Second?\n3. Third?\n";
        assert!(parse_completion(text).is_empty());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let text = "1.    Padded question?   \r\nAnswer:    padded answer  \n\n";
        assert_eq!(
            parse_completion(text),
            vec![qa("Padded question?", "padded answer")]
        );
    }

    #[test]
    fn test_double_digit_numbers_and_order() {
        let text: String = (1..=12)
            .map(|n| format!("{n}. Question {n}\nAnswer: Answer {n}\n"))
            .collect();
        let records = parse_completion(&text);
        assert_eq!(records.len(), 12);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.question, format!("Question {}", i + 1));
            assert_eq!(record.answer, format!("Answer {}", i + 1));
        }
    }

    #[test]
    fn test_numbered_list_inside_answer_starts_new_block() {
        let text = "1. Name two tools.\nAnswer: Two tools:\n2. cargo\n3. rustc";
        // "2. cargo" and "3. rustc" open their own blocks and carry no Answer marker.
        assert_eq!(parse_completion(text), vec![qa("Name two tools.", "Two tools:")]);
    }

    #[test]
    fn test_question_without_line_break_is_dropped() {
        assert!(parse_completion("1. Only a question").is_empty());
    }

    #[test]
    fn test_empty_answer_is_dropped() {
        let text = "1. Question?\nAnswer:   \n2. Other?\nAnswer: Fine.";
        assert_eq!(parse_completion(text), vec![qa("Other?", "Fine.")]);
    }

    #[test]
    fn test_leading_whitespace_before_first_item_is_kept() {
        let text = "  1. What is Rust?\nAnswer: A language.\n2. Describe REST.\nAnswer: A style.";
        assert_eq!(
            parse_completion(text),
            vec![
                qa("What is Rust?", "A language."),
                qa("Describe REST.", "A style."),
            ]
        );
    }

    #[test]
    fn test_inline_chatter_before_first_item_is_kept() {
        let text = "Here you go: 1. What is Rust?\nAnswer: A language.";
        assert_eq!(parse_completion(text), vec![qa("What is Rust?", "A language.")]);
    }

    #[test]
    fn test_preamble_with_number_but_no_answer_is_dropped() {
        let text = "Version 2. Here they are:\n1. Q?\nAnswer: A.";
        assert_eq!(parse_completion(text), vec![qa("Q?", "A.")]);
    }

    #[test]
    fn test_split_blocks_keeps_preamble_as_first_block() {
        let blocks = split_blocks("intro\n1. a\nAnswer: b\n2. c\nAnswer: d");
        assert_eq!(blocks, vec!["intro", "1. a\nAnswer: b", "2. c\nAnswer: d"]);
    }

    #[test]
    fn test_split_requires_whitespace_after_period() {
        let blocks = split_blocks("1. a\nAnswer: version\n1.2 is out");
        assert_eq!(blocks.len(), 1);
    }
}

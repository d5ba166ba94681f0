// src/pipeline/aggregate.rs

//! Quiz digest aggregation.
//!
//! Accepted answers are collected over a run and published as one text card:
//! one `"<category> : <answer>"` line per category.

use std::collections::HashSet;

use crate::models::{LinkPayload, QuizAnswer, QuizCategory};

/// Answers accepted during the current run.
#[derive(Debug, Default, Clone)]
pub struct Digest {
    answers: Vec<QuizAnswer>,
    satisfied: HashSet<QuizCategory>,
}

impl Digest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an answer for `category` was already accepted.
    pub fn is_satisfied(&self, category: QuizCategory) -> bool {
        self.satisfied.contains(&category)
    }

    /// Accept `answer` unless its category is already satisfied.
    pub fn accept(&mut self, answer: QuizAnswer) -> bool {
        if !self.satisfied.insert(answer.category) {
            return false;
        }
        self.answers.push(answer);
        true
    }

    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Digest text, one line per accepted answer in acceptance order.
    pub fn render(&self) -> String {
        self.answers
            .iter()
            .map(|a| format!("{} : {}", a.category, a.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Registration payload for the digest; the text travels in `url`.
    pub fn payload(&self, tag: &str) -> Option<LinkPayload> {
        if self.is_empty() {
            return None;
        }
        Some(LinkPayload {
            url: self.render().trim().to_string(),
            tags: vec![tag.to_string()],
            ..LinkPayload::default()
        })
    }

    /// Post links behind the accepted answers.
    pub fn post_links(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(|a| a.post_link.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(category: QuizCategory, answer: &str, link: &str) -> QuizAnswer {
        QuizAnswer {
            category,
            answer: answer.to_string(),
            original_title: format!("[{}] 퀴즈", category),
            post_link: link.to_string(),
        }
    }

    #[test]
    fn test_first_answer_per_category_wins() {
        let mut digest = Digest::new();
        assert!(digest.accept(answer(QuizCategory::Hpoint, "사과", "l1")));
        assert!(!digest.accept(answer(QuizCategory::Hpoint, "배", "l2")));
        assert!(digest.is_satisfied(QuizCategory::Hpoint));
        assert_eq!(digest.len(), 1);
        assert_eq!(digest.answers()[0].answer, "사과");
    }

    #[test]
    fn test_render_and_payload() {
        let mut digest = Digest::new();
        digest.accept(answer(QuizCategory::KbPay, "3번", "l1"));
        digest.accept(answer(QuizCategory::Hpoint, "사과", "l2"));

        assert_eq!(digest.render(), "KB Pay : 3번\nHpoint : 사과");
        let payload = digest.payload("퀴즈").unwrap();
        assert_eq!(payload.url, "KB Pay : 3번\nHpoint : 사과");
        assert_eq!(payload.tags, vec!["퀴즈".to_string()]);
        assert!(payload.title.is_none());
        assert_eq!(digest.post_links().collect::<Vec<_>>(), vec!["l1", "l2"]);
    }

    #[test]
    fn test_empty_digest_has_no_payload() {
        assert!(Digest::new().payload("퀴즈").is_none());
    }
}

// src/extract/quiz.rs

//! Daily quiz answers.
//!
//! A title must name one of the known quiz categories and carry today's date
//! (`M/D` or `M월D일`). The answer is read from the post body with
//! [`AnswerRules`].

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::extract::{AnswerRules, Extraction, Extractor};
use crate::models::{CandidatePost, ExtractedItem, QuizAnswer, QuizCategory, QuizConfig, Target};
use crate::pipeline::{Digest, Disposition};
use crate::services::Fetcher;

static TITLE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})/(\d{1,2})|(\d{1,2})\s*월\s*(\d{1,2})\s*일").expect("static regex")
});

/// Month and day written in a title, if any.
pub fn title_date(title: &str) -> Option<(u32, u32)> {
    let caps = TITLE_DATE.captures(title)?;
    let (month, day) = match (caps.get(1), caps.get(2)) {
        (Some(m), Some(d)) => (m, d),
        _ => (caps.get(3)?, caps.get(4)?),
    };
    Some((month.as_str().parse().ok()?, day.as_str().parse().ok()?))
}

pub struct QuizExtractor {
    body_selectors: Vec<String>,
    rules: AnswerRules,
    today: NaiveDate,
    allow_undated: bool,
}

impl QuizExtractor {
    /// `today` is the run date in the configured offset.
    pub fn new(config: &QuizConfig, today: NaiveDate) -> Self {
        Self {
            body_selectors: config.body_selectors.clone(),
            rules: AnswerRules::default(),
            today,
            allow_undated: config.allow_undated_titles,
        }
    }

    pub fn with_rules(mut self, rules: AnswerRules) -> Self {
        self.rules = rules;
        self
    }

    fn is_today(&self, title: &str) -> bool {
        match title_date(title) {
            Some((month, day)) => month == self.today.month() && day == self.today.day(),
            None => self.allow_undated,
        }
    }
}

#[async_trait]
impl Extractor for QuizExtractor {
    fn name(&self) -> &'static str {
        "quiz"
    }

    fn screen(&self, post: &CandidatePost) -> Option<Disposition> {
        match QuizCategory::classify(&post.title) {
            Some(_) => None,
            None => Some(Disposition::CategoryUnmatched),
        }
    }

    fn gate(&self, post: &CandidatePost, digest: &Digest) -> Option<Disposition> {
        let category = QuizCategory::classify(&post.title)?;
        if digest.is_satisfied(category) {
            log::debug!("{} already answered, skipping '{}'", category, post.short_title());
            return Some(Disposition::CategorySatisfied);
        }
        if !self.is_today(&post.title) {
            log::info!(
                "Date mismatch '{}' (today {})",
                post.short_title(),
                self.today.format("%-m/%-d")
            );
            return Some(Disposition::DateMismatched);
        }
        None
    }

    async fn extract(&self, _target: &Target, post: &CandidatePost, fetcher: &Fetcher) -> Extraction {
        let Some(category) = QuizCategory::classify(&post.title) else {
            return Extraction::Unavailable;
        };
        let Some(body) = fetcher.fetch_body(&post.link, &self.body_selectors).await else {
            return Extraction::Unavailable;
        };
        let Some(answer) = self.rules.extract(&body.text) else {
            log::info!("No answer in '{}'", post.short_title());
            return Extraction::Unavailable;
        };

        log::info!("[{}] answer found: {}", category, answer);
        Extraction::Items(vec![ExtractedItem::Quiz(QuizAnswer {
            category,
            answer,
            original_title: post.title.clone(),
            post_link: post.link.clone(),
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()
    }

    fn post(title: &str) -> CandidatePost {
        CandidatePost::new(title, "https://www.ppomppu.co.kr/zboard/view.php?id=coupon&no=1")
    }

    #[test]
    fn test_title_date_formats() {
        assert_eq!(title_date("[Hpoint] 8/10 퀴즈"), Some((8, 10)));
        assert_eq!(title_date("KB Pay 8월 10일 퀴즈"), Some((8, 10)));
        assert_eq!(title_date("KB Pay 12월3일"), Some((12, 3)));
        assert_eq!(title_date("오늘의 퀴즈"), None);
    }

    #[test]
    fn test_gate_by_date() {
        let extractor = QuizExtractor::new(&QuizConfig::default(), today());
        let digest = Digest::new();

        assert_eq!(
            extractor.gate(&post("[Hpoint] 8/9 퀴즈"), &digest),
            Some(Disposition::DateMismatched)
        );
        assert_eq!(extractor.gate(&post("[Hpoint] 8/10 퀴즈"), &digest), None);
    }

    #[test]
    fn test_undated_titles() {
        let digest = Digest::new();
        let strict = QuizExtractor::new(&QuizConfig::default(), today());
        assert_eq!(
            strict.gate(&post("[Hpoint] 퀴즈"), &digest),
            Some(Disposition::DateMismatched)
        );

        let config = QuizConfig {
            allow_undated_titles: true,
            ..QuizConfig::default()
        };
        let lenient = QuizExtractor::new(&config, today());
        assert_eq!(lenient.gate(&post("[Hpoint] 퀴즈"), &digest), None);
    }

    #[test]
    fn test_gate_satisfied_category() {
        let extractor = QuizExtractor::new(&QuizConfig::default(), today());
        let mut digest = Digest::new();
        digest.accept(QuizAnswer {
            category: QuizCategory::Hpoint,
            answer: "사과".to_string(),
            original_title: "[Hpoint] 8/10 퀴즈".to_string(),
            post_link: "l".to_string(),
        });

        assert_eq!(
            extractor.gate(&post("[Hpoint] 8/10 퀴즈"), &digest),
            Some(Disposition::CategorySatisfied)
        );
    }

    #[test]
    fn test_screen_category() {
        let extractor = QuizExtractor::new(&QuizConfig::default(), today());
        assert_eq!(extractor.screen(&post("[K B Pay] 8/10 퀴즈")), None);
        assert_eq!(
            extractor.screen(&post("[네이버페이] 10원")),
            Some(Disposition::CategoryUnmatched)
        );
    }
}

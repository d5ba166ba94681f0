// src/extract/answer.rs

//! Quiz answer extraction rules.
//!
//! Rules are tried in order and the first one that yields a non-empty answer
//! wins. Each rule captures the text after an "정답" marker; the capture is
//! cut at the first line break and a trailing copula ("입니다") or period is
//! dropped.

use std::sync::LazyLock;

use regex::Regex;

static COPULA_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:입니다\.?|\.)$").expect("static regex"));

/// One answer pattern. The first capture group holds the raw answer.
#[derive(Debug, Clone)]
pub struct AnswerRule {
    pub name: &'static str,
    pattern: Regex,
}

impl AnswerRule {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Apply the rule to body text.
    pub fn apply(&self, text: &str) -> Option<String> {
        let raw = self.pattern.captures(text)?.get(1)?.as_str();
        clean_answer(raw)
    }
}

/// Ordered list of answer rules.
#[derive(Debug, Clone)]
pub struct AnswerRules {
    rules: Vec<AnswerRule>,
}

impl AnswerRules {
    pub fn new(rules: Vec<AnswerRule>) -> Self {
        Self { rules }
    }

    /// Extract an answer with the first matching rule.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            let answer = rule.apply(text)?;
            log::debug!("Answer matched by rule '{}'", rule.name);
            Some(answer)
        })
    }
}

impl Default for AnswerRules {
    fn default() -> Self {
        static DEFAULT: LazyLock<AnswerRules> = LazyLock::new(|| {
            AnswerRules::new(vec![
                // "정답입니다" confirmation followed by "정답: ..."
                AnswerRule::new(
                    "confirmed",
                    r"(?is)정답\s*입니다.*?정답\s*:?\s*([^\n\r]+?)\s*(?:[.!?]|[\n\r]|$)",
                )
                .expect("static regex"),
                AnswerRule::new("bare", r"(?i)정답\s*:?\s*([^\n\r]+?)\s*(?:[.!?]|[\n\r]|$)")
                    .expect("static regex"),
            ])
        });
        DEFAULT.clone()
    }
}

/// Cut at the first line break, drop a trailing copula and trim.
pub fn clean_answer(raw: &str) -> Option<String> {
    let first_line = raw.split(['\n', '\r']).next().unwrap_or_default().trim();
    let answer = COPULA_SUFFIX.replace(first_line, "");
    let answer = answer.trim();
    if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    }
}

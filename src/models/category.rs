// src/models/category.rs

//! Quiz categories and their title keywords.

use std::fmt;

/// The six daily quizzes tracked by the quiz crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuizCategory {
    KbPay,
    KbStarBanking,
    ShinhanSuperSol,
    ShinhanSolBaseball,
    ShinhanPlayQuiz,
    Hpoint,
}

impl QuizCategory {
    /// All categories in classification order.
    pub const ALL: [QuizCategory; 6] = [
        QuizCategory::KbPay,
        QuizCategory::KbStarBanking,
        QuizCategory::ShinhanSuperSol,
        QuizCategory::ShinhanSolBaseball,
        QuizCategory::ShinhanPlayQuiz,
        QuizCategory::Hpoint,
    ];

    /// Label used in the published digest.
    pub fn label(self) -> &'static str {
        match self {
            QuizCategory::KbPay => "KB Pay",
            QuizCategory::KbStarBanking => "KB스타뱅킹",
            QuizCategory::ShinhanSuperSol => "신한슈퍼SOL",
            QuizCategory::ShinhanSolBaseball => "신한쏠야구",
            QuizCategory::ShinhanPlayQuiz => "신한SOL퀴즈팡팡",
            QuizCategory::Hpoint => "Hpoint",
        }
    }

    /// Title keywords, already stripped of whitespace.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            QuizCategory::KbPay => &["[KBPay]"],
            QuizCategory::KbStarBanking => &["[KB스타뱅킹]스타퀴즈"],
            QuizCategory::ShinhanSuperSol => &["[신한슈퍼SOL]"],
            QuizCategory::ShinhanSolBaseball => &["[신한쏠]야구상식"],
            QuizCategory::ShinhanPlayQuiz => &["[신한플레이]퀴즈팡팡"],
            QuizCategory::Hpoint => &["[Hpoint]", "[h.point]", "[H.point]"],
        }
    }

    /// Classify a post title, ignoring whitespace. First category in
    /// [`QuizCategory::ALL`] order wins.
    pub fn classify(title: &str) -> Option<Self> {
        let normalized: String = title.chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL.into_iter().find(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| normalized.contains(keyword))
        })
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// src/pipeline/state.rs

//! Per-candidate outcomes and run counters.

use std::fmt;

/// Terminal state of one candidate within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Link matched the blocklist; dropped before any dedup work
    Blocklisted,
    /// Key was already in the local snapshot
    LocallyDuplicate,
    /// Title did not match the crawler's category rules
    CategoryUnmatched,
    /// Category already has an accepted answer this run
    CategorySatisfied,
    /// Title date is not today
    DateMismatched,
    /// Registration API already knows the key
    RemoteDuplicate,
    /// Body missing or nothing could be extracted from it
    ExtractionUnavailable,
    /// Every registration call for the candidate was accepted
    Registered,
    /// At least one registration call failed
    RegistrationFailed,
}

impl Disposition {
    /// Whether the candidate's key is recorded as seen.
    ///
    /// Candidates that were filtered by title, date, or missing content stay
    /// eligible for a later run.
    pub fn marks_seen(self) -> bool {
        matches!(
            self,
            Self::LocallyDuplicate | Self::RemoteDuplicate | Self::Registered | Self::RegistrationFailed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocklisted => "blocklisted",
            Self::LocallyDuplicate => "local-skip",
            Self::CategoryUnmatched => "category-unmatched",
            Self::CategorySatisfied => "category-satisfied",
            Self::DateMismatched => "date-mismatched",
            Self::RemoteDuplicate => "remote-skip",
            Self::ExtractionUnavailable => "extraction-unavailable",
            Self::Registered => "new",
            Self::RegistrationFailed => "failed",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub candidates: usize,
    pub blocklisted: usize,
    pub locally_duplicate: usize,
    pub category_unmatched: usize,
    pub category_satisfied: usize,
    pub date_mismatched: usize,
    pub remote_duplicate: usize,
    pub extraction_unavailable: usize,
    pub registered: usize,
    pub registration_failed: usize,
    /// Individual `POST /links` calls made
    pub api_calls: usize,
    /// Calls answered with 409
    pub duplicates_rejected: usize,
    /// Whether the snapshot was written at the end of the run
    pub persisted: bool,
}

impl RunStats {
    pub fn record(&mut self, disposition: Disposition) {
        let counter = match disposition {
            Disposition::Blocklisted => &mut self.blocklisted,
            Disposition::LocallyDuplicate => &mut self.locally_duplicate,
            Disposition::CategoryUnmatched => &mut self.category_unmatched,
            Disposition::CategorySatisfied => &mut self.category_satisfied,
            Disposition::DateMismatched => &mut self.date_mismatched,
            Disposition::RemoteDuplicate => &mut self.remote_duplicate,
            Disposition::ExtractionUnavailable => &mut self.extraction_unavailable,
            Disposition::Registered => &mut self.registered,
            Disposition::RegistrationFailed => &mut self.registration_failed,
        };
        *counter += 1;
    }

    /// Candidates skipped as already known, locally or remotely.
    pub fn skipped(&self) -> usize {
        self.locally_duplicate + self.remote_duplicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_seen() {
        let seen = [
            Disposition::LocallyDuplicate,
            Disposition::RemoteDuplicate,
            Disposition::Registered,
            Disposition::RegistrationFailed,
        ];
        let retry = [
            Disposition::Blocklisted,
            Disposition::CategoryUnmatched,
            Disposition::CategorySatisfied,
            Disposition::DateMismatched,
            Disposition::ExtractionUnavailable,
        ];
        assert!(seen.iter().all(|d| d.marks_seen()));
        assert!(retry.iter().all(|d| !d.marks_seen()));
    }

    #[test]
    fn test_record_and_skipped() {
        let mut stats = RunStats::default();
        stats.record(Disposition::Registered);
        stats.record(Disposition::Registered);
        stats.record(Disposition::LocallyDuplicate);
        stats.record(Disposition::RemoteDuplicate);

        assert_eq!(stats.registered, 2);
        assert_eq!(stats.skipped(), 2);
        assert_eq!(stats.date_mismatched, 0);
    }
}

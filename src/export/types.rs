/// Counts collected over one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Issues returned by the API (first page only)
    pub issues_fetched: usize,
    /// Issue documents written
    pub issues_written: usize,
    /// Issues skipped because their document could not be written
    pub issues_failed: usize,
    /// Images saved locally
    pub images_downloaded: usize,
    /// Image references left pointing at the remote URL
    pub images_failed: usize,
}

impl RunSummary {
    /// True when every issue and image made it to disk.
    pub fn is_clean(&self) -> bool {
        self.issues_failed == 0 && self.images_failed == 0
    }

    pub fn record(&mut self, outcome: &IssueOutcome) {
        self.images_downloaded += outcome.images_downloaded;
        self.images_failed += outcome.images_failed;
        if outcome.written {
            self.issues_written += 1;
        } else {
            self.issues_failed += 1;
        }
    }
}

/// What happened to a single issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOutcome {
    pub images_downloaded: usize,
    pub images_failed: usize,
    pub written: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut summary = RunSummary {
            issues_fetched: 2,
            ..Default::default()
        };
        summary.record(&IssueOutcome {
            images_downloaded: 2,
            images_failed: 1,
            written: true,
        });
        summary.record(&IssueOutcome::default());

        assert_eq!(summary.issues_written, 1);
        assert_eq!(summary.issues_failed, 1);
        assert_eq!(summary.images_downloaded, 2);
        assert_eq!(summary.images_failed, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_empty_summary_is_clean() {
        assert!(RunSummary::default().is_clean());
    }
}

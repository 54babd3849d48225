use std::collections::HashMap;

use super::{is_editable, ModerationMode, Verdict};
use crate::commands::GuidelineReport;
use crate::errors::{FetchError, MutationError};

type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
struct Pending<T> {
    request: RequestId,
    value: T,
    settled: bool,
}

/// Guideline report for one app plus the moderator's not-yet-confirmed edits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewBoard {
    report: Option<Result<GuidelineReport, FetchError>>,
    verdicts: HashMap<String, Pending<Verdict>>,
    fullscreen: Option<Pending<bool>>,
    next_request: RequestId,
    error: Option<MutationError>,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.report.is_none()
    }

    pub fn report(&self) -> Option<&GuidelineReport> {
        self.report.as_ref().and_then(|r| r.as_ref().ok())
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        self.report.as_ref().and_then(|r| r.as_ref().err())
    }

    /// Take a fresh report. Edits whose write already succeeded give way to it;
    /// edits still in flight stay visible.
    pub fn load(&mut self, result: Result<GuidelineReport, String>) {
        match result {
            Ok(report) => {
                self.report = Some(Ok(report));
                self.verdicts.retain(|_, p| !p.settled);
                if self.fullscreen.as_ref().is_some_and(|p| p.settled) {
                    self.fullscreen = None;
                }
            }
            // A failed refetch keeps the last good report on screen.
            Err(e) => {
                if self.report().is_none() {
                    self.report = Some(Err(FetchError(e)));
                }
            }
        }
    }

    pub fn verdict(&self, guideline_id: &str) -> Verdict {
        if let Some(p) = self.verdicts.get(guideline_id) {
            return p.value;
        }
        self.report()
            .and_then(|r| r.guidelines.iter().find(|g| g.guideline_id == guideline_id))
            .map(|g| Verdict::from(g.passed))
            .unwrap_or(Verdict::Unset)
    }

    pub fn is_fullscreen(&self) -> bool {
        match &self.fullscreen {
            Some(p) => p.value,
            None => self.report().is_some_and(|r| r.is_fullscreen_app),
        }
    }

    pub fn review_requested(&self) -> bool {
        self.report().is_some_and(|r| r.review_requested_at.is_some())
    }

    fn next_id(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    /// Show `passed` for a guideline right away. Returns the request id to
    /// settle later, or `None` if the guideline cannot be edited in `mode`.
    pub fn set_verdict(&mut self, guideline_id: &str, passed: bool, mode: ModerationMode) -> Option<RequestId> {
        let editable = self
            .report()
            .and_then(|r| r.guidelines.iter().find(|g| g.guideline_id == guideline_id))
            .is_some_and(|g| is_editable(g, mode));
        if !editable {
            return None;
        }
        let request = self.next_id();
        self.verdicts.insert(
            guideline_id.to_string(),
            Pending {
                request,
                value: Verdict::from(passed),
                settled: false,
            },
        );
        self.error = None;
        Some(request)
    }

    /// Returns true when the write went through and the report should be refetched.
    pub fn settle_verdict(&mut self, guideline_id: &str, request: RequestId, result: Result<(), String>) -> bool {
        let Some(p) = self.verdicts.get_mut(guideline_id) else {
            return result.is_ok();
        };
        if p.request != request {
            return result.is_ok();
        }
        match result {
            Ok(()) => {
                p.settled = true;
                true
            }
            Err(e) => {
                self.verdicts.remove(guideline_id);
                self.error = Some(MutationError::new(super::humanize(guideline_id), e));
                false
            }
        }
    }

    pub fn set_fullscreen(&mut self, value: bool, mode: ModerationMode) -> Option<RequestId> {
        if mode != ModerationMode::Moderator || self.report().is_none() {
            return None;
        }
        let request = self.next_id();
        self.fullscreen = Some(Pending {
            request,
            value,
            settled: false,
        });
        self.error = None;
        Some(request)
    }

    pub fn settle_fullscreen(&mut self, request: RequestId, result: Result<(), String>) -> bool {
        let current = self.fullscreen.as_ref().is_some_and(|p| p.request == request);
        match result {
            Ok(()) => {
                if let Some(p) = self.fullscreen.as_mut().filter(|_| current) {
                    p.settled = true;
                }
                true
            }
            Err(e) => {
                if current {
                    self.fullscreen = None;
                    self.error = Some(MutationError::new("screenshot type", e));
                }
                false
            }
        }
    }

    /// Record a failed board-wide action (pass all, dismiss review).
    pub fn action_failed(&mut self, action: &str, message: String) {
        self.error = Some(MutationError::new(action, message));
    }

    pub fn mutation_error(&self) -> Option<&MutationError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GuidelineStatus;

    fn report(passed: &[(&str, Option<bool>, bool)]) -> GuidelineReport {
        GuidelineReport {
            guidelines: passed
                .iter()
                .map(|(id, p, ro)| GuidelineStatus {
                    guideline_id: id.to_string(),
                    category: "general".to_string(),
                    url: None,
                    read_only: *ro,
                    passed: *p,
                })
                .collect(),
            review_requested_at: Some("2026-10-18T09:00:00Z".to_string()),
            is_fullscreen_app: false,
            branding: None,
        }
    }

    fn loaded() -> ReviewBoard {
        let mut board = ReviewBoard::new();
        board.load(Ok(report(&[
            ("general-name", None, false),
            ("general-summary", Some(false), false),
            ("general-license", Some(true), true),
        ])));
        board
    }

    #[test]
    fn test_loading_then_loaded() {
        let mut board = ReviewBoard::new();
        assert!(board.is_loading());
        board.load(Ok(report(&[])));
        assert!(!board.is_loading());
        assert!(board.review_requested());
    }

    #[test]
    fn test_initial_fetch_failure() {
        let mut board = ReviewBoard::new();
        board.load(Err("500".to_string()));
        assert_eq!(board.fetch_error(), Some(&FetchError("500".to_string())));
        assert!(board.report().is_none());
    }

    #[test]
    fn test_verdicts_come_from_report() {
        let board = loaded();
        assert_eq!(board.verdict("general-name"), Verdict::Unset);
        assert_eq!(board.verdict("general-summary"), Verdict::Rejected);
        assert_eq!(board.verdict("general-license"), Verdict::Approved);
        assert_eq!(board.verdict("unknown"), Verdict::Unset);
    }

    #[test]
    fn test_developer_and_read_only_cannot_edit() {
        let mut board = loaded();
        assert!(board.set_verdict("general-name", true, ModerationMode::Developer).is_none());
        assert!(board.set_verdict("general-license", false, ModerationMode::Moderator).is_none());
        assert!(board.set_fullscreen(true, ModerationMode::Developer).is_none());
        assert_eq!(board.verdict("general-license"), Verdict::Approved);
    }

    #[test]
    fn test_toggle_shows_immediately_and_survives_refetch() {
        let mut board = loaded();
        let req = board.set_verdict("general-name", true, ModerationMode::Moderator).unwrap();
        assert_eq!(board.verdict("general-name"), Verdict::Approved);

        assert!(board.settle_verdict("general-name", req, Ok(())));
        board.load(Ok(report(&[("general-name", Some(true), false)])));
        assert_eq!(board.verdict("general-name"), Verdict::Approved);
    }

    #[test]
    fn test_failed_toggle_rolls_back() {
        let mut board = loaded();
        let req = board.set_verdict("general-summary", true, ModerationMode::Moderator).unwrap();
        assert!(!board.settle_verdict("general-summary", req, Err("401".to_string())));

        assert_eq!(board.verdict("general-summary"), Verdict::Rejected);
        let err = board.mutation_error().unwrap();
        assert_eq!(err.target, "General summary");
        board.dismiss_error();
        assert!(board.mutation_error().is_none());
    }

    #[test]
    fn test_in_flight_toggle_survives_unrelated_refetch() {
        let mut board = loaded();
        board.set_verdict("general-name", false, ModerationMode::Moderator).unwrap();
        board.load(Ok(report(&[("general-name", None, false)])));
        assert_eq!(board.verdict("general-name"), Verdict::Rejected);
    }

    #[test]
    fn test_fullscreen_toggle_and_rollback() {
        let mut board = loaded();
        assert!(!board.is_fullscreen());

        let req = board.set_fullscreen(true, ModerationMode::Moderator).unwrap();
        assert!(board.is_fullscreen());
        assert!(!board.settle_fullscreen(req, Err("boom".to_string())));
        assert!(!board.is_fullscreen());
        assert!(board.mutation_error().is_some());
    }

    #[test]
    fn test_failed_refetch_keeps_last_report() {
        let mut board = loaded();
        board.load(Err("timeout".to_string()));
        assert!(board.fetch_error().is_none());
        assert_eq!(board.verdict("general-summary"), Verdict::Rejected);
    }
}

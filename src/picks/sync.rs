//! Drives a weekly selection session against the catalog service.
//!
//! The controller performs no I/O itself. Every operation returns the
//! [`Request`]s the view layer has to run, and every response is fed back in
//! through one of the `*_loaded` / `persisted` methods. Responses are tagged
//! with the week epoch they were issued under, so anything that lands after a
//! week change is dropped.

use super::session::{SessionPhase, WeeklySelectionSession};
use super::slot::{PersistRequest, RequestId, Settled, SlotKey};
use super::week::IsoWeek;
use crate::commands::{AppSummary, WeekPicks};
use crate::errors::{FetchError, MutationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FetchWeek { epoch: u64, week: IsoWeek },
    FetchEligible,
    Persist {
        epoch: u64,
        week: IsoWeek,
        request: PersistRequest,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Eligible {
    Idle,
    Pending,
    Loaded(Vec<AppSummary>),
    Failed(FetchError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncController {
    session: WeeklySelectionSession,
    epoch: u64,
    eligible: Eligible,
    next_request: RequestId,
    mutation_error: Option<MutationError>,
    last_saved: Option<SlotKey>,
}

impl SyncController {
    pub fn new(week: IsoWeek) -> Self {
        Self {
            session: WeeklySelectionSession::new(week),
            epoch: 0,
            eligible: Eligible::Idle,
            next_request: 1,
            mutation_error: None,
            last_saved: None,
        }
    }

    pub fn week(&self) -> IsoWeek {
        self.session.week()
    }

    pub fn current(&self, key: SlotKey) -> Option<AppSummary> {
        self.session.slot(key).and_then(|s| s.current()).cloned()
    }

    /// Last position whose save went through, for highlighting in the preview.
    pub fn last_saved(&self) -> Option<SlotKey> {
        self.last_saved
    }

    pub fn mutation_error(&self) -> Option<&MutationError> {
        self.mutation_error.as_ref()
    }

    pub fn dismiss_mutation_error(&mut self) {
        self.mutation_error = None;
    }

    /// Initial load: the week's picks and the eligible apps, in parallel.
    pub fn mount(&mut self) -> Vec<Request> {
        let mut requests = vec![self.fetch_week()];
        requests.extend(self.fetch_eligible_if_needed());
        requests
    }

    /// Discard the current session and load `week` from scratch. Eligible
    /// apps are kept unless their last fetch failed.
    pub fn change_week(&mut self, week: IsoWeek) -> Vec<Request> {
        self.epoch += 1;
        self.session = WeeklySelectionSession::new(week);
        self.mutation_error = None;
        self.last_saved = None;
        self.mount()
    }

    fn fetch_week(&mut self) -> Request {
        self.session.fetch_started();
        Request::FetchWeek {
            epoch: self.epoch,
            week: self.session.week(),
        }
    }

    fn fetch_eligible_if_needed(&mut self) -> Option<Request> {
        match self.eligible {
            Eligible::Idle | Eligible::Failed(_) => {
                self.eligible = Eligible::Pending;
                Some(Request::FetchEligible)
            }
            Eligible::Pending | Eligible::Loaded(_) => None,
        }
    }

    pub fn week_loaded(&mut self, epoch: u64, result: Result<WeekPicks, String>) {
        if epoch != self.epoch {
            return;
        }
        match result {
            Ok(picks) => {
                self.session.hydrate(&picks);
                self.session.fetch_finished(None);
            }
            Err(e) => self.session.fetch_finished(Some(FetchError(e))),
        }
    }

    pub fn eligible_loaded(&mut self, result: Result<Vec<AppSummary>, String>) {
        self.eligible = match result {
            Ok(apps) => Eligible::Loaded(apps),
            Err(e) => Eligible::Failed(FetchError(e)),
        };
    }

    /// Optimistically put `app` into `key` and return the write to send.
    /// Ignored until the session has been hydrated, and after a fetch error.
    pub fn select(&mut self, key: SlotKey, app: AppSummary) -> Vec<Request> {
        if !matches!(self.phase(), SessionPhase::Ready | SessionPhase::Saving) {
            return vec![];
        }
        if !self.session.is_available(key, &app.id) {
            return vec![];
        }
        let id = self.next_request;
        let Some(slot) = self.session.slot_mut(key) else {
            return vec![];
        };
        if slot.current().is_some_and(|current| current.same_app(&app)) {
            return vec![];
        }
        self.next_request += 1;
        let request = slot.select(app, id);
        self.session.persist_started();
        self.mutation_error = None;
        vec![Request::Persist {
            epoch: self.epoch,
            week: self.session.week(),
            request,
        }]
    }

    pub fn clear(&mut self, key: SlotKey) {
        if let Some(slot) = self.session.slot_mut(key) {
            slot.clear();
        }
    }

    /// Apply a write's outcome. A success always triggers one full refetch of
    /// the week; a failure rolls the slot back and records a [`MutationError`].
    pub fn persisted(
        &mut self,
        epoch: u64,
        request: &PersistRequest,
        result: Result<(), String>,
    ) -> Vec<Request> {
        if epoch != self.epoch {
            return vec![];
        }
        self.session.persist_finished();
        let settled = match self.session.slot_mut(request.slot) {
            Some(slot) => slot.settle(request.id, result.is_ok()),
            None => Settled::Superseded,
        };
        match result {
            Ok(()) => {
                self.last_saved = Some(request.slot);
                vec![self.fetch_week()]
            }
            Err(e) => {
                if settled == Settled::RolledBack {
                    self.mutation_error = Some(MutationError::new(request.slot.label(), e));
                }
                vec![]
            }
        }
    }

    /// Apps still available to any slot of this week.
    pub fn pool(&self) -> Vec<AppSummary> {
        match &self.eligible {
            Eligible::Loaded(apps) => self.session.pool(apps),
            _ => vec![],
        }
    }

    /// Week and eligible fetches combined: either one loading means loading,
    /// either one failing means error.
    pub fn phase(&self) -> SessionPhase {
        match (&self.eligible, self.session.phase()) {
            (_, SessionPhase::Error(e)) => SessionPhase::Error(e),
            (Eligible::Failed(e), _) => SessionPhase::Error(e.clone()),
            (Eligible::Idle | Eligible::Pending, _) => SessionPhase::Loading,
            (Eligible::Loaded(_), phase) => phase,
        }
    }
}

use std::collections::HashSet;

use super::pool;
use super::slot::{AssignmentSlot, SlotKey, DAYS_PER_WEEK, WEEK_POSITIONS};
use super::week::IsoWeek;
use crate::commands::{AppSummary, WeekPicks};
use crate::errors::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    /// A write or its follow-up refetch is in flight. Content stays interactive.
    Saving,
    Error(FetchError),
}

/// The coarse shape of the picks page. Ready and Saving map to the same
/// value so a save never rebuilds the pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    Loading,
    Failed(FetchError),
    Interactive,
}

impl SessionPhase {
    pub fn view(&self) -> SessionView {
        match self {
            SessionPhase::Loading => SessionView::Loading,
            SessionPhase::Error(e) => SessionView::Failed(e.clone()),
            SessionPhase::Ready | SessionPhase::Saving => SessionView::Interactive,
        }
    }
}

/// The twelve slots of one ISO week. Dropped wholesale when the week changes.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySelectionSession {
    week: IsoWeek,
    week_slots: Vec<AssignmentSlot>,
    day_slots: Vec<AssignmentSlot>,
    hydrated: bool,
    fetches_in_flight: usize,
    persists_in_flight: usize,
    fetch_error: Option<FetchError>,
}

impl WeeklySelectionSession {
    pub fn new(week: IsoWeek) -> Self {
        Self {
            week,
            week_slots: (1..=WEEK_POSITIONS)
                .map(|p| AssignmentSlot::new(SlotKey::Week(p)))
                .collect(),
            day_slots: (0..DAYS_PER_WEEK)
                .map(|d| AssignmentSlot::new(SlotKey::Day(d)))
                .collect(),
            hydrated: false,
            fetches_in_flight: 0,
            persists_in_flight: 0,
            fetch_error: None,
        }
    }

    pub fn week(&self) -> IsoWeek {
        self.week
    }

    pub fn slot(&self, key: SlotKey) -> Option<&AssignmentSlot> {
        match key {
            SlotKey::Week(p) => self.week_slots.get((p as usize).checked_sub(1)?),
            SlotKey::Day(d) => self.day_slots.get(d as usize),
        }
    }

    pub fn slot_mut(&mut self, key: SlotKey) -> Option<&mut AssignmentSlot> {
        match key {
            SlotKey::Week(p) => self.week_slots.get_mut((p as usize).checked_sub(1)?),
            SlotKey::Day(d) => self.day_slots.get_mut(d as usize),
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = &AssignmentSlot> {
        self.week_slots.iter().chain(self.day_slots.iter())
    }

    /// Ids held by any slot. A locally cleared slot keeps its server value
    /// (and any write in flight) out of the pool until the server releases it.
    pub fn assigned_ids(&self) -> HashSet<String> {
        self.slots()
            .flat_map(|s| s.held_ids())
            .map(str::to_string)
            .collect()
    }

    /// Whether `app_id` may go into `key`, i.e. no other slot holds it.
    pub fn is_available(&self, key: SlotKey, app_id: &str) -> bool {
        self.slots()
            .filter(|s| s.key() != key)
            .all(|s| !s.held_ids().contains(&app_id))
    }

    pub fn pool(&self, eligible: &[AppSummary]) -> Vec<AppSummary> {
        pool::resolve(eligible, &self.assigned_ids())
    }

    /// Replace every slot's server value. Positions the server did not
    /// mention become empty.
    pub fn hydrate(&mut self, picks: &WeekPicks) {
        for slot in self.week_slots.iter_mut() {
            let server = match slot.key() {
                SlotKey::Week(p) => picks
                    .apps_of_the_week
                    .iter()
                    .find(|pick| pick.position == p)
                    .map(|pick| pick.app.clone()),
                SlotKey::Day(_) => None,
            };
            slot.hydrate(server);
        }
        for slot in self.day_slots.iter_mut() {
            let server = match slot.key() {
                SlotKey::Day(d) => picks
                    .apps_of_the_day
                    .iter()
                    .find(|pick| pick.day == d)
                    .map(|pick| pick.app.clone()),
                SlotKey::Week(_) => None,
            };
            slot.hydrate(server);
        }
        self.hydrated = true;
    }

    pub fn fetch_started(&mut self) {
        self.fetches_in_flight += 1;
    }

    pub fn fetch_finished(&mut self, error: Option<FetchError>) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        // The first failure sticks until the week is reloaded.
        if self.fetch_error.is_none() {
            self.fetch_error = error;
        }
    }

    pub fn persist_started(&mut self) {
        self.persists_in_flight += 1;
    }

    pub fn persist_finished(&mut self) {
        self.persists_in_flight = self.persists_in_flight.saturating_sub(1);
    }

    pub fn phase(&self) -> SessionPhase {
        if let Some(e) = &self.fetch_error {
            return SessionPhase::Error(e.clone());
        }
        if !self.hydrated {
            SessionPhase::Loading
        } else if self.fetches_in_flight + self.persists_in_flight > 0 {
            SessionPhase::Saving
        } else {
            SessionPhase::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{DayPick, WeekPick};
    use chrono::NaiveDate;

    fn app(id: &str) -> AppSummary {
        AppSummary {
            id: id.to_string(),
            name: id.to_string(),
            subtitle: None,
            icon: None,
        }
    }

    fn week() -> IsoWeek {
        IsoWeek::containing(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn picks(week_apps: &[(u8, &str)], day_apps: &[(u8, &str)]) -> WeekPicks {
        WeekPicks {
            year: 2026,
            week: 43,
            apps_of_the_week: week_apps
                .iter()
                .map(|(p, id)| WeekPick {
                    position: *p,
                    app: app(id),
                })
                .collect(),
            apps_of_the_day: day_apps
                .iter()
                .map(|(d, id)| DayPick {
                    day: *d,
                    date: String::new(),
                    app: app(id),
                })
                .collect(),
        }
    }

    #[test]
    fn test_new_session_has_twelve_empty_slots() {
        let session = WeeklySelectionSession::new(week());
        assert_eq!(session.slots().count(), 12);
        assert!(session.slots().all(|s| s.current().is_none()));
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert!(session.slot(SlotKey::Week(0)).is_none());
        assert!(session.slot(SlotKey::Day(7)).is_none());
    }

    #[test]
    fn test_hydrate_maps_positions_and_days() {
        let mut session = WeeklySelectionSession::new(week());
        session.hydrate(&picks(&[(1, "A"), (4, "D")], &[(0, "M"), (6, "S")]));

        let shown = |k| session.slot(k).and_then(|s| s.current()).map(|a| a.id.clone());
        assert_eq!(shown(SlotKey::Week(1)), Some("A".to_string()));
        assert_eq!(shown(SlotKey::Week(2)), None);
        assert_eq!(shown(SlotKey::Week(4)), Some("D".to_string()));
        assert_eq!(shown(SlotKey::Day(0)), Some("M".to_string()));
        assert_eq!(shown(SlotKey::Day(3)), None);
        assert_eq!(shown(SlotKey::Day(6)), Some("S".to_string()));
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_pool_excludes_week_and_day_picks() {
        let mut session = WeeklySelectionSession::new(week());
        session.hydrate(&picks(&[(1, "A")], &[(2, "B")]));
        let eligible = vec![app("A"), app("B"), app("C")];

        let pool: Vec<String> = session.pool(&eligible).into_iter().map(|a| a.id).collect();
        assert_eq!(pool, vec!["C"]);
    }

    #[test]
    fn test_cleared_slot_keeps_server_value_out_of_pool() {
        let mut session = WeeklySelectionSession::new(week());
        session.hydrate(&picks(&[(1, "A"), (2, "B")], &[]));
        if let Some(slot) = session.slot_mut(SlotKey::Week(2)) {
            slot.clear();
        }
        let eligible = vec![app("A"), app("B"), app("C")];

        let pool: Vec<String> = session.pool(&eligible).into_iter().map(|a| a.id).collect();
        assert_eq!(pool, vec!["C"]);
        assert!(!session.is_available(SlotKey::Week(3), "B"));
        assert!(session.is_available(SlotKey::Week(2), "B"));
    }

    #[test]
    fn test_saving_shares_the_ready_view() {
        assert_eq!(SessionPhase::Ready.view(), SessionPhase::Saving.view());
        assert_eq!(SessionPhase::Loading.view(), SessionView::Loading);
        assert_eq!(
            SessionPhase::Error(FetchError("x".to_string())).view(),
            SessionView::Failed(FetchError("x".to_string()))
        );
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = WeeklySelectionSession::new(week());
        session.fetch_started();
        assert_eq!(session.phase(), SessionPhase::Loading);

        session.hydrate(&WeekPicks::default());
        session.fetch_finished(None);
        assert_eq!(session.phase(), SessionPhase::Ready);

        session.persist_started();
        assert_eq!(session.phase(), SessionPhase::Saving);
        session.persist_finished();
        session.fetch_started();
        assert_eq!(session.phase(), SessionPhase::Saving);

        session.fetch_finished(Some(FetchError("boom".to_string())));
        assert_eq!(session.phase(), SessionPhase::Error(FetchError("boom".to_string())));
    }
}

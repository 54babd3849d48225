use crate::commands::AppSummary;

pub const WEEK_POSITIONS: u8 = 5;
pub const DAYS_PER_WEEK: u8 = 7;

/// Where a pick lives: a featured position of the week (1-5) or a day
/// offset from the week's Monday (0-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    Week(u8),
    Day(u8),
}

impl SlotKey {
    /// All twelve keys of a week, featured positions first.
    #[cfg(test)]
    pub fn all() -> impl Iterator<Item = SlotKey> {
        (1..=WEEK_POSITIONS)
            .map(SlotKey::Week)
            .chain((0..DAYS_PER_WEEK).map(SlotKey::Day))
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        match *self {
            SlotKey::Week(p) => (1..=WEEK_POSITIONS).contains(&p),
            SlotKey::Day(d) => d < DAYS_PER_WEEK,
        }
    }

    pub fn label(&self) -> String {
        match self {
            SlotKey::Week(p) => format!("position {}", p),
            SlotKey::Day(d) => format!("day {}", d),
        }
    }
}

pub type RequestId = u64;

/// A write the view layer must send for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistRequest {
    pub id: RequestId,
    pub slot: SlotKey,
    pub app_id: String,
}

/// What happened when a persist response reached its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Confirmed,
    RolledBack,
    /// A newer selection replaced this request; the slot was left alone.
    Superseded,
}

/// One pick slot. `confirmed` is the last value the server reported,
/// `optimistic` is what the picker shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSlot {
    key: SlotKey,
    confirmed: Option<AppSummary>,
    optimistic: Option<AppSummary>,
    pending: Option<PersistRequest>,
}

impl AssignmentSlot {
    pub fn new(key: SlotKey) -> Self {
        Self {
            key,
            confirmed: None,
            optimistic: None,
            pending: None,
        }
    }

    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn current(&self) -> Option<&AppSummary> {
        self.optimistic.as_ref()
    }

    #[cfg(test)]
    pub fn confirmed(&self) -> Option<&AppSummary> {
        self.confirmed.as_ref()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ids this slot keeps out of the pool. Normally just what it shows; a
    /// cleared slot still holds whatever the server has or is about to have.
    pub fn held_ids(&self) -> Vec<&str> {
        match &self.optimistic {
            Some(app) => vec![app.id.as_str()],
            None => self
                .confirmed
                .iter()
                .map(|a| a.id.as_str())
                .chain(self.pending.iter().map(|p| p.app_id.as_str()))
                .collect(),
        }
    }

    pub fn select(&mut self, app: AppSummary, request: RequestId) -> PersistRequest {
        let persist = PersistRequest {
            id: request,
            slot: self.key,
            app_id: app.id.clone(),
        };
        self.optimistic = Some(app);
        self.pending = Some(persist.clone());
        persist
    }

    /// Local-only: the service cannot remove an assignment, so the next
    /// hydration brings the server's value back. A write already in flight
    /// stays tracked and still settles against this slot.
    pub fn clear(&mut self) {
        self.optimistic = None;
    }

    /// Take the server's value. A slot with a write in flight keeps showing
    /// its optimistic value until that write settles.
    pub fn hydrate(&mut self, server: Option<AppSummary>) {
        self.confirmed = server;
        if self.pending.is_none() {
            self.optimistic = self.confirmed.clone();
        }
    }

    pub fn settle(&mut self, request: RequestId, succeeded: bool) -> Settled {
        if self.pending.as_ref().map(|p| p.id) != Some(request) {
            return Settled::Superseded;
        }
        self.pending = None;
        if succeeded {
            Settled::Confirmed
        } else {
            self.optimistic = self.confirmed.clone();
            Settled::RolledBack
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str) -> AppSummary {
        AppSummary {
            id: id.to_string(),
            name: format!("{} app", id),
            subtitle: None,
            icon: None,
        }
    }

    #[test]
    fn test_twelve_valid_keys() {
        let keys: Vec<SlotKey> = SlotKey::all().collect();
        assert_eq!(keys.len(), 12);
        assert!(keys.iter().all(|k| k.is_valid()));
        assert_eq!(keys[0], SlotKey::Week(1));
        assert_eq!(keys[11], SlotKey::Day(6));
        assert!(!SlotKey::Week(0).is_valid());
        assert!(!SlotKey::Week(6).is_valid());
        assert!(!SlotKey::Day(7).is_valid());
    }

    #[test]
    fn test_select_is_optimistic() {
        let mut slot = AssignmentSlot::new(SlotKey::Week(3));
        let req = slot.select(app("C"), 1);

        assert_eq!(req.slot, SlotKey::Week(3));
        assert_eq!(req.app_id, "C");
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("C"));
        assert!(slot.confirmed().is_none());
        assert!(slot.is_pending());
    }

    #[test]
    fn test_failure_rolls_back_to_confirmed() {
        let mut slot = AssignmentSlot::new(SlotKey::Day(0));
        slot.hydrate(Some(app("A")));
        slot.select(app("B"), 7);

        assert_eq!(slot.settle(7, false), Settled::RolledBack);
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("A"));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_stale_response_does_not_roll_back_newer_choice() {
        let mut slot = AssignmentSlot::new(SlotKey::Week(1));
        slot.select(app("A"), 1);
        slot.select(app("B"), 2);

        assert_eq!(slot.settle(1, false), Settled::Superseded);
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("B"));
        assert!(slot.is_pending());

        assert_eq!(slot.settle(2, true), Settled::Confirmed);
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("B"));
    }

    #[test]
    fn test_hydrate_keeps_in_flight_choice() {
        let mut slot = AssignmentSlot::new(SlotKey::Week(2));
        slot.select(app("B"), 4);
        slot.hydrate(Some(app("A")));
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("B"));
        assert_eq!(slot.confirmed().map(|a| a.id.as_str()), Some("A"));

        slot.settle(4, true);
        slot.hydrate(Some(app("B")));
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("B"));
    }

    #[test]
    fn test_hydrate_empty_clears_slot() {
        let mut slot = AssignmentSlot::new(SlotKey::Day(4));
        slot.hydrate(Some(app("A")));
        slot.hydrate(None);
        assert!(slot.current().is_none());
        assert!(slot.confirmed().is_none());
    }

    #[test]
    fn test_clear_is_restored_by_hydration() {
        let mut slot = AssignmentSlot::new(SlotKey::Week(5));
        slot.hydrate(Some(app("A")));
        slot.clear();
        assert!(slot.current().is_none());

        slot.hydrate(Some(app("A")));
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("A"));
    }

    #[test]
    fn test_clear_keeps_in_flight_write_tracked() {
        let mut slot = AssignmentSlot::new(SlotKey::Week(1));
        slot.hydrate(Some(app("A")));
        slot.select(app("B"), 9);
        slot.clear();
        assert!(slot.current().is_none());
        assert!(slot.is_pending());
        assert_eq!(slot.held_ids(), vec!["A", "B"]);

        assert_eq!(slot.settle(9, false), Settled::RolledBack);
        assert_eq!(slot.current().map(|a| a.id.as_str()), Some("A"));
    }
}

//! Weekly app picks: five featured positions and seven apps of the day,
//! drawn from one shared pool of quality-passing apps.

pub mod picker;
pub mod pool;
pub mod session;
pub mod slot;
pub mod sync;
pub mod week;

pub use session::{SessionPhase, SessionView};
pub use slot::SlotKey;
pub use sync::{Request, SyncController};
pub use week::IsoWeek;

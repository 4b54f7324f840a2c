//! Request-scoped services shared by the compliance handlers.

pub mod team_snapshot;
pub mod window;

pub use team_snapshot::{resolve_active_items, TeamSnapshot};
pub use window::{date_range_window, day_window, since_day, trailing_window, TimeWindow};

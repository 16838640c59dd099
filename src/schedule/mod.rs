//! Weekly availability component
//!
//! Owns the set of active working days for one schedulable entity (a brand
//! or a worker), each with an open/close window and zero or more breaks.
//! [`ScheduleEditor`] holds in-progress edits and validates them at save
//! time; [`ScheduleHandle`] runs the fetch/save path against a
//! [`ScheduleStore`].

mod actor;
pub mod editor;
mod handle;
pub mod models;
pub mod store;
pub mod time;

pub use editor::{ScheduleEditor, TimeField, ValidationError};
pub use handle::ScheduleHandle;
pub use models::{BreakInterval, BreakRecord, DayRecord, WeeklyAvailability, WorkingDay};
pub use store::{InMemoryStore, ScheduleStore};

use chrono::Weekday;
use thiserror::Error;
use uuid::Uuid;

use super::models::{weekday_name, BreakInterval, WeeklyAvailability, WorkingDay};
use super::time;
use crate::config::ScheduleDefaults;

/// Which bound of a day or break a time edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

/// Save-time validation failures
///
/// `EmptySchedule` is the only failure the product surfaces to the user;
/// the interval failures mean a schedule still violates its ordering or
/// containment invariants after malformed strings have been repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select at least one working day")]
    EmptySchedule,

    #[error(
        "{} closes at {end} which is not after its {start} opening",
        weekday_name(*.day)
    )]
    DayWindowInverted {
        day: Weekday,
        start: String,
        end: String,
    },

    #[error(
        "break {start}-{end} falls outside the {day_start}-{day_end} window on {}",
        weekday_name(*.day)
    )]
    BreakOutOfBounds {
        day: Weekday,
        start: String,
        end: String,
        day_start: String,
        day_end: String,
    },

    #[error(
        "breaks {first_start}-{first_end} and {second_start}-{second_end} overlap on {}",
        weekday_name(*.day)
    )]
    BreaksOverlap {
        day: Weekday,
        first_start: String,
        first_end: String,
        second_start: String,
        second_end: String,
    },
}

/// In-progress edit state for one owning entity's weekly schedule
///
/// Edits are permissive: `set_time` accepts whatever the user typed,
/// including transiently invalid values, and nothing is validated until
/// `normalize_for_save`. Edit operations on a weekday or break that is not
/// present are silent no-ops, never errors.
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    state: WeeklyAvailability,
    defaults: ScheduleDefaults,
}

impl ScheduleEditor {
    /// Wrap an existing availability for editing
    pub fn new(state: WeeklyAvailability, defaults: ScheduleDefaults) -> Self {
        Self { state, defaults }
    }

    /// Start from a schedule with no active days
    pub fn empty(defaults: ScheduleDefaults) -> Self {
        Self::new(WeeklyAvailability::default(), defaults)
    }

    /// The current edit state
    pub fn state(&self) -> &WeeklyAvailability {
        &self.state
    }

    /// Consume the editor, keeping the (possibly unvalidated) state
    pub fn into_state(self) -> WeeklyAvailability {
        self.state
    }

    /// Toggle a weekday between active and inactive
    ///
    /// Toggling off discards the day's breaks; toggling back on starts from
    /// the default window, not the previous one.
    pub fn toggle_day(&mut self, day: Weekday) {
        if self.state.is_active(day) {
            self.state.remove_day(day);
        } else {
            self.state.insert_day(WorkingDay::new(day, &self.defaults));
        }
    }

    /// Overwrite one bound of a day, or of one of its breaks
    ///
    /// The raw string is stored as-is; repair happens at save time.
    pub fn set_time(
        &mut self,
        day: Weekday,
        field: TimeField,
        break_id: Option<Uuid>,
        value: impl Into<String>,
    ) {
        let value = value.into();
        let Some(working_day) = self.state.day_mut(day) else {
            return;
        };

        match break_id {
            Some(id) => {
                let Some(break_interval) = working_day.breaks.iter_mut().find(|b| b.id == id)
                else {
                    return;
                };
                match field {
                    TimeField::Start => break_interval.start_time = value,
                    TimeField::End => break_interval.end_time = value,
                }
            }
            None => match field {
                TimeField::Start => working_day.start_time = value,
                TimeField::End => working_day.end_time = value,
            },
        }
    }

    /// Add a break with the default bounds to an active day
    ///
    /// Returns the new break's id so the caller can target follow-up edits.
    /// Duplicate default bounds are allowed; the user is expected to adjust
    /// them before saving.
    pub fn add_break(&mut self, day: Weekday) -> Option<Uuid> {
        let break_start = self.defaults.break_start.clone();
        let break_end = self.defaults.break_end.clone();
        let working_day = self.state.day_mut(day)?;
        let break_interval = BreakInterval::new(break_start, break_end);
        let id = break_interval.id;
        working_day.breaks.push(break_interval);
        Some(id)
    }

    /// Remove a break by id
    pub fn remove_break(&mut self, day: Weekday, break_id: Uuid) {
        if let Some(working_day) = self.state.day_mut(day) {
            working_day.breaks.retain(|b| b.id != break_id);
        }
    }

    /// Repair and validate the schedule for persistence
    ///
    /// Malformed or missing time strings are repaired to the configured
    /// fallbacks and zero-padded. Well-formed values the user chose are
    /// never second-guessed: a day that closes before it opens, a break
    /// outside its day, or overlapping breaks fail validation instead of
    /// being silently rewritten. Already-valid input comes back unchanged.
    pub fn normalize_for_save(&self) -> Result<WeeklyAvailability, ValidationError> {
        if self.state.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }

        let mut normalized = self.state.clone();

        for day in normalized.days_mut() {
            day.start_time =
                time::normalize_time(Some(day.start_time.as_str()), &self.defaults.day_start);
            day.end_time =
                time::normalize_time(Some(day.end_time.as_str()), &self.defaults.day_end);

            // normalize_time only emits parseable strings, so these hold
            let day_start = time::minutes_of(&day.start_time).unwrap_or(0);
            let day_end = time::minutes_of(&day.end_time).unwrap_or(0);

            if day_start >= day_end {
                return Err(ValidationError::DayWindowInverted {
                    day: day.day,
                    start: day.start_time.clone(),
                    end: day.end_time.clone(),
                });
            }

            for break_interval in &mut day.breaks {
                break_interval.start_time = time::normalize_time(
                    Some(break_interval.start_time.as_str()),
                    &self.defaults.break_start,
                );
                break_interval.end_time = time::normalize_time(
                    Some(break_interval.end_time.as_str()),
                    &self.defaults.break_end,
                );

                let break_start = time::minutes_of(&break_interval.start_time).unwrap_or(0);
                let break_end = time::minutes_of(&break_interval.end_time).unwrap_or(0);

                if break_start >= break_end || break_start < day_start || break_end > day_end {
                    return Err(ValidationError::BreakOutOfBounds {
                        day: day.day,
                        start: break_interval.start_time.clone(),
                        end: break_interval.end_time.clone(),
                        day_start: day.start_time.clone(),
                        day_end: day.end_time.clone(),
                    });
                }
            }

            if let Some((first, second)) = find_overlap(&day.breaks) {
                return Err(ValidationError::BreaksOverlap {
                    day: day.day,
                    first_start: first.start_time.clone(),
                    first_end: first.end_time.clone(),
                    second_start: second.start_time.clone(),
                    second_end: second.end_time.clone(),
                });
            }
        }

        Ok(normalized)
    }
}

/// Find the first pair of breaks whose windows overlap
///
/// Breaks that merely touch (one ends exactly when the next starts) do not
/// overlap. Insertion order is not meaningful, so the check runs over a
/// start-sorted view.
fn find_overlap(breaks: &[BreakInterval]) -> Option<(&BreakInterval, &BreakInterval)> {
    let mut sorted: Vec<&BreakInterval> = breaks.iter().collect();
    sorted.sort_by_key(|b| time::minutes_of(&b.start_time).unwrap_or(0));

    for pair in sorted.windows(2) {
        let first_end = time::minutes_of(&pair[0].end_time).unwrap_or(0);
        let second_start = time::minutes_of(&pair[1].start_time).unwrap_or(0);
        if second_start < first_end {
            return Some((pair[0], pair[1]));
        }
    }

    None
}

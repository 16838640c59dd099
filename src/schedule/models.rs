use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::time;
use crate::config::ScheduleDefaults;

/// A sub-window within a working day during which the owner is unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakInterval {
    /// Editor-local identity, never persisted
    pub id: Uuid,
    pub start_time: String,
    pub end_time: String,
}

impl BreakInterval {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// One day-of-week's open/close window plus optional breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDay {
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub breaks: Vec<BreakInterval>,
}

impl WorkingDay {
    /// Create a new working day with the configured default window
    pub fn new(day: Weekday, defaults: &ScheduleDefaults) -> Self {
        Self {
            day,
            start_time: defaults.day_start.clone(),
            end_time: defaults.day_end.clone(),
            breaks: Vec::new(),
        }
    }
}

/// The complete weekly schedule for one owning entity (a brand or a worker)
///
/// Holds at most one `WorkingDay` per weekday; a day is either present
/// (active) or absent (closed). The list is kept in the product's canonical
/// Monday-first display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyAvailability {
    days: Vec<WorkingDay>,
}

impl WeeklyAvailability {
    /// Active days in Monday-first display order
    pub fn days(&self) -> &[WorkingDay] {
        &self.days
    }

    /// Look up the working day for a weekday, if active
    pub fn day(&self, day: Weekday) -> Option<&WorkingDay> {
        self.days.iter().find(|d| d.day == day)
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> Option<&mut WorkingDay> {
        self.days.iter_mut().find(|d| d.day == day)
    }

    pub(crate) fn days_mut(&mut self) -> impl Iterator<Item = &mut WorkingDay> {
        self.days.iter_mut()
    }

    /// Whether the weekday is currently active
    pub fn is_active(&self, day: Weekday) -> bool {
        self.day(day).is_some()
    }

    /// Whether no day is active
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Insert a working day, replacing any existing entry for the same
    /// weekday, and re-sort into display order
    pub(crate) fn insert_day(&mut self, day: WorkingDay) {
        self.days.retain(|d| d.day != day.day);
        self.days.push(day);
        self.days.sort_by_key(|d| d.day.num_days_from_monday());
    }

    /// Remove a weekday and its breaks
    pub(crate) fn remove_day(&mut self, day: Weekday) {
        self.days.retain(|d| d.day != day);
    }

    /// Build an availability from incoming wire records, repairing them
    ///
    /// Missing or malformed times fall back to the configured defaults,
    /// records with an out-of-range day index are dropped, and later
    /// duplicates of an already-seen weekday are dropped. Every repair is
    /// logged; none is surfaced as an error.
    pub fn from_records(records: &[DayRecord], defaults: &ScheduleDefaults) -> Self {
        let mut availability = Self::default();

        for record in records {
            let Some(day) = weekday_from_index(record.day_of_week) else {
                warn!(
                    "Dropping schedule record with invalid day index {}",
                    record.day_of_week
                );
                continue;
            };

            if availability.is_active(day) {
                warn!("Dropping duplicate schedule record for {}", weekday_name(day));
                continue;
            }

            let start_time =
                time::normalize_time(record.start_time.as_deref(), &defaults.day_start);
            let end_time = time::normalize_time(record.end_time.as_deref(), &defaults.day_end);

            let breaks = record
                .breaks
                .iter()
                .map(|b| {
                    BreakInterval::new(
                        time::normalize_time(b.start_time.as_deref(), &defaults.break_start),
                        time::normalize_time(b.end_time.as_deref(), &defaults.break_end),
                    )
                })
                .collect();

            availability.insert_day(WorkingDay {
                day,
                start_time,
                end_time,
                breaks,
            });
        }

        availability
    }

    /// Convert to the wire records persisted by the store
    ///
    /// Break ids are editor-local and are not round-tripped.
    pub fn to_records(&self) -> Vec<DayRecord> {
        self.days
            .iter()
            .map(|day| DayRecord {
                day_of_week: weekday_index(day.day),
                start_time: Some(day.start_time.clone()),
                end_time: Some(day.end_time.clone()),
                breaks: day
                    .breaks
                    .iter()
                    .map(|b| BreakRecord {
                        start_time: Some(b.start_time.clone()),
                        end_time: Some(b.end_time.clone()),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Wire record for one break, as exchanged with the schedule store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakRecord {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Wire record for one working day, as exchanged with the schedule store
///
/// Times are optional because incoming data may be malformed or missing the
/// same way user input can be; `WeeklyAvailability::from_records` repairs
/// them on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Day of week, Sunday = 0
    pub day_of_week: u8,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub breaks: Vec<BreakRecord>,
}

/// Map a wire day index (Sunday = 0) to a weekday
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Map a weekday to its wire day index (Sunday = 0)
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// English name for a weekday, used in validation messages
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ScheduleDefaults {
        ScheduleDefaults::default()
    }

    #[test]
    fn test_day_record_wire_shape() {
        let record = DayRecord {
            day_of_week: 1,
            start_time: Some("09:00".to_string()),
            end_time: Some("18:00".to_string()),
            breaks: vec![BreakRecord {
                start_time: Some("12:00".to_string()),
                end_time: Some("13:00".to_string()),
            }],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dayOfWeek"], 1);
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "18:00");
        assert_eq!(json["breaks"][0]["startTime"], "12:00");
    }

    #[test]
    fn test_from_records_repairs_missing_times() {
        let records = vec![DayRecord {
            day_of_week: 1,
            start_time: None,
            end_time: Some("17:30".to_string()),
            breaks: vec![BreakRecord {
                start_time: Some("bogus".to_string()),
                end_time: None,
            }],
        }];

        let availability = WeeklyAvailability::from_records(&records, &defaults());
        let monday = availability.day(Weekday::Mon).unwrap();
        assert_eq!(monday.start_time, "09:00");
        assert_eq!(monday.end_time, "17:30");
        assert_eq!(monday.breaks[0].start_time, "12:00");
        assert_eq!(monday.breaks[0].end_time, "13:00");
    }

    #[test]
    fn test_from_records_drops_invalid_and_duplicate_days() {
        let records = vec![
            DayRecord {
                day_of_week: 7,
                start_time: None,
                end_time: None,
                breaks: Vec::new(),
            },
            DayRecord {
                day_of_week: 2,
                start_time: Some("08:00".to_string()),
                end_time: Some("16:00".to_string()),
                breaks: Vec::new(),
            },
            DayRecord {
                day_of_week: 2,
                start_time: Some("10:00".to_string()),
                end_time: Some("20:00".to_string()),
                breaks: Vec::new(),
            },
        ];

        let availability = WeeklyAvailability::from_records(&records, &defaults());
        assert_eq!(availability.days().len(), 1);
        // The first record for a weekday wins
        assert_eq!(availability.day(Weekday::Tue).unwrap().start_time, "08:00");
    }

    #[test]
    fn test_display_order_is_monday_first() {
        let mut availability = WeeklyAvailability::default();
        availability.insert_day(WorkingDay::new(Weekday::Sun, &defaults()));
        availability.insert_day(WorkingDay::new(Weekday::Wed, &defaults()));
        availability.insert_day(WorkingDay::new(Weekday::Mon, &defaults()));

        let order: Vec<Weekday> = availability.days().iter().map(|d| d.day).collect();
        assert_eq!(order, vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]);
    }

    #[test]
    fn test_weekday_index_round_trip() {
        for index in 0..7u8 {
            let day = weekday_from_index(index).unwrap();
            assert_eq!(weekday_index(day), index);
        }
        assert_eq!(weekday_from_index(7), None);
    }
}

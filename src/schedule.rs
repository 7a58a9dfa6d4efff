//! Compiled schedule types.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// How far ahead [`Schedule::next_after`] searches before giving up.
///
/// Eight years, the longest gap between two leap days (2096 to 2104).
const MAX_SEARCH_DAYS: u32 = 8 * 366;

/// One of the five time fields of a cron string, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    /// Inclusive bounds of the values the field accepts.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            FieldKind::Minute => (0, 59),
            FieldKind::Hour => (0, 23),
            FieldKind::DayOfMonth => (1, 31),
            FieldKind::Month => (1, 12),
            // 0 = Sunday
            FieldKind::DayOfWeek => (0, 6),
        }
    }

    /// Number of distinct values in the field's domain.
    pub fn size(self) -> usize {
        let (min, max) = self.bounds();
        (max - min + 1) as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day of month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day of week",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully expanded cron schedule.
///
/// Every value list is sorted ascending and free of duplicates. The command is
/// kept exactly as written.
///
/// # Examples
///
/// ```rust
/// use cron_compiler::compile;
///
/// let schedule = compile("*/15 0 1,15 * 1-5 /usr/bin/find").unwrap();
/// assert_eq!(schedule.minutes, vec![0, 15, 30, 45]);
/// assert_eq!(schedule.days_of_week, vec![1, 2, 3, 4, 5]);
/// assert_eq!(schedule.command, "/usr/bin/find");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub minutes: Vec<u32>,
    pub hours: Vec<u32>,
    pub days_of_month: Vec<u32>,
    pub months: Vec<u32>,
    pub days_of_week: Vec<u32>,
    pub command: String,
}

impl Schedule {
    /// The expanded values of one field.
    pub fn values(&self, field: FieldKind) -> &[u32] {
        match field {
            FieldKind::Minute => &self.minutes,
            FieldKind::Hour => &self.hours,
            FieldKind::DayOfMonth => &self.days_of_month,
            FieldKind::Month => &self.months,
            FieldKind::DayOfWeek => &self.days_of_week,
        }
    }

    fn contains(&self, field: FieldKind, value: u32) -> bool {
        self.values(field).binary_search(&value).is_ok()
    }

    fn matches_date(&self, date: NaiveDate) -> bool {
        self.contains(FieldKind::DayOfMonth, date.day())
            && self.contains(FieldKind::Month, date.month())
            && self.contains(FieldKind::DayOfWeek, date.weekday().num_days_from_sunday())
    }

    /// Checks whether the schedule fires at the minute of `dt`.
    ///
    /// All five fields must match; seconds are ignored.
    pub fn matches(&self, dt: &NaiveDateTime) -> bool {
        self.matches_date(dt.date())
            && self.contains(FieldKind::Hour, dt.hour())
            && self.contains(FieldKind::Minute, dt.minute())
    }

    /// Earliest `(hour, minute)` of the schedule at or after the given time of day.
    fn first_time_from(&self, hour: u32, minute: u32) -> Option<(u32, u32)> {
        self.hours
            .iter()
            .filter(|&&h| h >= hour)
            .find_map(|&h| {
                let floor = if h == hour { minute } else { 0 };
                self.minutes.iter().find(|&&m| m >= floor).map(|&m| (h, m))
            })
    }

    /// Finds the first matching minute strictly after `after`.
    ///
    /// Returns `None` if nothing matches within the next eight years, which is
    /// the case for impossible dates such as the 30th of February, or if the
    /// search would run past the last representable date.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use cron_compiler::compile;
    ///
    /// let schedule = compile("30 14 * * * backup").unwrap();
    /// let now = NaiveDate::from_ymd_opt(2026, 2, 5)
    ///     .unwrap()
    ///     .and_hms_opt(15, 0, 0)
    ///     .unwrap();
    /// let next = schedule.next_after(now).unwrap();
    /// assert_eq!(next.to_string(), "2026-02-06 14:30:00");
    /// ```
    pub fn next_after(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        let start = after
            .with_second(0)?
            .with_nanosecond(0)?
            .checked_add_signed(Duration::minutes(1))?;
        let mut date = start.date();
        let (mut hour, mut minute) = (start.hour(), start.minute());

        for _ in 0..MAX_SEARCH_DAYS {
            if self.matches_date(date) {
                if let Some((h, m)) = self.first_time_from(hour, minute) {
                    return date.and_hms_opt(h, m, 0);
                }
            }
            date = date.succ_opt()?;
            hour = 0;
            minute = 0;
        }
        None
    }

    /// Iterates over the matching minutes after `after`, in order.
    pub fn upcoming(&self, after: NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> + '_ {
        std::iter::successors(self.next_after(after), move |&last| self.next_after(last))
    }
}

fn join_values(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the schedule as a table, one row per field followed by the command.
impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in FieldKind::ALL {
            writeln!(f, "{:<14} {}", field.label(), join_values(self.values(field)))?;
        }
        writeln!(f, "{:<14} {}", "command", self.command)
    }
}

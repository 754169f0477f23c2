//! Day boundary utilities.
//!
//! Everything the tracker resets is keyed to a single "current day", so this
//! module owns the one place where wall-clock time turns into a [`DayKey`].
//! The clock sits behind a trait so tests can move time forward by hand.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Local calendar date identifying one tracking day. Serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from year/month/day, `None` for impossible dates.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the persisted `YYYY-MM-DD` form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .ok()
            .map(Self)
    }

    /// The underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Weekday of this day.
    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// The key `days` calendar days earlier, saturating at the earliest date.
    #[must_use]
    pub fn days_before(self, days: u32) -> Self {
        Self(
            self.0
                .checked_sub_days(chrono::Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Source of "now" for the tracker.
pub trait Clock: Send + Sync {
    /// Today's key in local time.
    fn today(&self) -> DayKey;

    /// Short wall-clock label (`HH:MM`) stamped on water entries.
    fn time_label(&self) -> String;
}

/// Clock backed by the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        DayKey(Local::now().date_naive())
    }

    fn time_label(&self) -> String {
        Local::now().format("%H:%M").to_string()
    }
}

/// Today's key according to `clock`.
pub fn current_day_key(clock: &impl Clock) -> DayKey {
    clock.today()
}

/// True iff the day has changed since `last`.
#[must_use]
pub fn has_rolled_over(last: DayKey, now: DayKey) -> bool {
    last != now
}

/// Position of `weekday` in the Monday-first menu week (Mon = 0 .. Sun = 6).
///
/// The native numbering counts from Sunday = 0, so Sunday wraps to the end.
#[must_use]
pub fn menu_day_index(weekday: Weekday) -> usize {
    match weekday.num_days_from_sunday() {
        0 => 6,
        native => native as usize - 1,
    }
}

/// Inverse of [`menu_day_index`]; indices past 6 wrap.
#[must_use]
pub fn weekday_from_menu_index(index: usize) -> Weekday {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    WEEK[index % 7]
}

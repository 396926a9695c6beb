//! The scheduling ledger: which platforms have a post queued on which day.
//!
//! Days are keyed by a structured `(year, month, day)` key rather than a
//! concatenated string, so January 3 can never collide with February 3 or
//! with a prior year's March 3. The ledger itself is a pure data structure:
//! lookups never mutate, entries are only removed by an explicit caller
//! action, and storage sees it as one opaque serialized value.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use jiff::civil;
use serde::{Deserialize, Serialize};

use crate::model::{CalendarEvent, Platform};

/// Year range supported by the calendar, matching `jiff`'s civil dates.
/// Boundaries (CLI args, parsed dates) validate against it before any
/// key or day-count computation.
pub const MIN_YEAR: i16 = -9999;
pub const MAX_YEAR: i16 = 9999;

/// A composite calendar-day key with `(year, month, day)` ordering.
///
/// Months are 1–12. Construction does not validate; callers parse user
/// input through [`FromStr`], which does.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct DayKey {
    pub year: i16,
    pub month: i8,
    pub day: i8,
}

impl DayKey {
    pub fn new(year: i16, month: i8, day: i8) -> Self {
        DayKey { year, month, day }
    }
}

impl From<civil::Date> for DayKey {
    fn from(date: civil::Date) -> Self {
        DayKey::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DayKey {
    /// Formats as `YYYY-MM-DD`, switching to the six-digit signed form
    /// (`±YYYYYY-MM-DD`) for years outside 0..=9999 so every key's text
    /// form re-parses. Plain `{:04}` would render year -1 as
    /// `-001-01-03`, which nothing accepts back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..=9999).contains(&self.year) {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:+07}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl FromStr for DayKey {
    type Err = String;

    /// Parses `YYYY-MM-DD`, validating against the proleptic Gregorian
    /// calendar (so `2023-02-29` is rejected, `2024-02-29` is not).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date: civil::Date = s
            .parse()
            .map_err(|_| format!("invalid date '{s}' — expected YYYY-MM-DD"))?;
        Ok(date.into())
    }
}

impl TryFrom<String> for DayKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Days in the given month of the given year, per the proleptic
/// Gregorian calendar.
///
/// Computed by rolling the first of the month to its last day, never
/// from a hand-written leap-year table.
///
/// Precondition: `month` is in 1–12 and `year` is in
/// [`MIN_YEAR`]..=[`MAX_YEAR`]. Callers validate before building keys;
/// this is not re-checked here.
pub fn days_in_month(year: i16, month: i8) -> i8 {
    civil::date(year, month, 1).last_of_month().day()
}

/// The scheduling ledger: ordered events per calendar day.
///
/// Each day holds a sequence, not a single event — several platforms
/// may be scheduled on the same day, and insertion order is display
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: BTreeMap<DayKey, Vec<CalendarEvent>>,
}

impl Ledger {
    /// The events scheduled for a day, in insertion order.
    ///
    /// An unseeded day is normal, not an error: the result is an empty
    /// slice, so every calendar query is renderable.
    pub fn events_for_day(&self, key: DayKey) -> &[CalendarEvent] {
        self.days.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Appends an event to a day's sequence.
    pub fn schedule(&mut self, key: DayKey, event: CalendarEvent) {
        self.days.entry(key).or_default().push(event);
    }

    /// The first event for `platform` on the given day, for mutation.
    pub fn event_mut(&mut self, key: DayKey, platform: &Platform) -> Option<&mut CalendarEvent> {
        self.days
            .get_mut(&key)?
            .iter_mut()
            .find(|e| e.platform == *platform)
    }

    /// Removes the first event for `platform` on the given day.
    ///
    /// The ledger never deletes entries on its own; this is the one
    /// explicit removal path. Returns whether anything was removed.
    pub fn remove(&mut self, key: DayKey, platform: &Platform) -> bool {
        let Some(events) = self.days.get_mut(&key) else {
            return false;
        };
        let Some(pos) = events.iter().position(|e| e.platform == *platform) else {
            return false;
        };
        events.remove(pos);
        if events.is_empty() {
            self.days.remove(&key);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Platform;

    fn queued(platform: &str) -> CalendarEvent {
        CalendarEvent::queued(Platform::new(platform))
    }

    #[test]
    fn days_in_month_matches_gregorian_calendar() {
        // Leap year, common year, century rules.
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn days_in_month_for_a_full_year() {
        let lengths = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, expected) in lengths.iter().enumerate() {
            let month = i8::try_from(i).unwrap() + 1;
            assert_eq!(days_in_month(2023, month), *expected, "month {month}");
        }
    }

    #[test]
    fn empty_ledger_returns_empty_for_any_day() {
        let ledger = Ledger::default();
        assert!(ledger.events_for_day(DayKey::new(2026, 8, 24)).is_empty());
    }

    #[test]
    fn unseeded_day_returns_empty() {
        let mut ledger = Ledger::default();
        ledger.schedule(DayKey::new(2026, 8, 24), queued("x"));
        assert!(ledger.events_for_day(DayKey::new(2026, 8, 25)).is_empty());
    }

    #[test]
    fn same_day_number_in_different_months_never_collides() {
        let mut ledger = Ledger::default();
        ledger.schedule(DayKey::new(2026, 1, 3), queued("x"));
        ledger.schedule(DayKey::new(2026, 2, 3), queued("instagram"));
        ledger.schedule(DayKey::new(2025, 3, 3), queued("tiktok"));

        assert_eq!(
            ledger.events_for_day(DayKey::new(2026, 1, 3))[0].platform,
            Platform::new("x")
        );
        assert_eq!(
            ledger.events_for_day(DayKey::new(2026, 2, 3))[0].platform,
            Platform::new("instagram")
        );
        assert_eq!(
            ledger.events_for_day(DayKey::new(2025, 3, 3))[0].platform,
            Platform::new("tiktok")
        );
    }

    #[test]
    fn multiple_platforms_keep_insertion_order() {
        let key = DayKey::new(2026, 8, 24);
        let mut ledger = Ledger::default();
        ledger.schedule(key, queued("instagram"));
        ledger.schedule(key, queued("x"));
        ledger.schedule(key, queued("bluesky"));

        let ids: Vec<_> = ledger
            .events_for_day(key)
            .iter()
            .map(|e| e.platform.id().to_string())
            .collect();
        assert_eq!(ids, ["instagram", "x", "bluesky"]);
    }

    #[test]
    fn remove_is_explicit_and_targets_one_platform() {
        let key = DayKey::new(2026, 8, 24);
        let mut ledger = Ledger::default();
        ledger.schedule(key, queued("x"));
        ledger.schedule(key, queued("instagram"));

        assert!(ledger.remove(key, &Platform::new("x")));
        assert_eq!(ledger.events_for_day(key).len(), 1);

        // Removing again is a no-op, not an error.
        assert!(!ledger.remove(key, &Platform::new("x")));

        assert!(ledger.remove(key, &Platform::new("instagram")));
        assert!(ledger.is_empty());
    }

    #[test]
    fn event_mut_finds_the_platform_entry() {
        let key = DayKey::new(2026, 8, 24);
        let mut ledger = Ledger::default();
        ledger.schedule(key, queued("x"));

        ledger
            .event_mut(key, &Platform::new("x"))
            .unwrap()
            .mark_published();
        assert!(ledger.events_for_day(key)[0].published);

        assert!(ledger.event_mut(key, &Platform::new("tiktok")).is_none());
    }

    #[test]
    fn day_keys_order_by_year_then_month_then_day() {
        let mut keys = vec![
            DayKey::new(2026, 2, 1),
            DayKey::new(2025, 12, 31),
            DayKey::new(2026, 1, 15),
        ];
        keys.sort();
        assert_eq!(
            keys,
            [
                DayKey::new(2025, 12, 31),
                DayKey::new(2026, 1, 15),
                DayKey::new(2026, 2, 1),
            ]
        );
    }

    #[test]
    fn day_key_parses_and_formats() {
        let key: DayKey = "2026-08-03".parse().unwrap();
        assert_eq!(key, DayKey::new(2026, 8, 3));
        assert_eq!(key.to_string(), "2026-08-03");

        assert!("2023-02-29".parse::<DayKey>().is_err());
        assert!("2026-13-01".parse::<DayKey>().is_err());
        assert!("yesterday".parse::<DayKey>().is_err());
    }

    #[test]
    fn bce_year_keys_round_trip() {
        // Year -1 must not render as `-001-01-03`, which nothing
        // accepts back.
        let key = DayKey::new(-1, 1, 3);
        assert_eq!(key.to_string(), "-000001-01-03");
        assert_eq!(key.to_string().parse::<DayKey>().unwrap(), key);

        let json = serde_json::to_string(&key).unwrap();
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn ledger_with_bce_key_survives_serialization() {
        let key = DayKey::new(-44, 3, 15);
        let mut ledger = Ledger::default();
        ledger.schedule(key, queued("x"));

        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events_for_day(key).len(), 1);
    }

    #[test]
    fn extended_iso_dates_parse_to_bce_keys() {
        let key: DayKey = "-000001-01-03".parse().unwrap();
        assert_eq!(key, DayKey::new(-1, 1, 3));
    }
}

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};

use crate::service::enrichment::EnrichedTraining;

/// Fallback customer name for calendar titles: an unresolved customer
/// leaves the title as the bare activity, with no suffix.
pub const FALLBACK_CUSTOMER_NAME: &str = "";

/// A timed event ready for calendar display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tooltip: String,
}

/// Project enriched trainings into calendar events. The end instant is
/// always start + duration minutes. Rows without a date have nothing to
/// place on a calendar and are skipped.
pub fn build_events(trainings: &[EnrichedTraining]) -> Vec<CalendarEvent> {
    trainings
        .iter()
        .filter_map(|enriched| {
            let start = enriched.training.date?;
            let end = start + Duration::minutes(i64::from(enriched.training.duration));
            let title = if enriched.customer_name.is_empty() {
                enriched.training.activity.clone()
            } else {
                format!("{} - {}", enriched.training.activity, enriched.customer_name)
            };
            let tooltip = format!(
                "{} ({} min) {}",
                enriched.training.activity, enriched.training.duration, enriched.customer_name
            );
            Some(CalendarEvent {
                title,
                start,
                end,
                tooltip,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

/// Calendar view state: a granularity and an anchor date, held apart
/// from the event list. Navigation and granularity switches only change
/// which events are visible; they never refetch anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub granularity: Granularity,
    pub anchor: NaiveDate,
}

impl CalendarView {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            granularity: Granularity::Week,
            anchor,
        }
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.anchor = date;
    }

    pub fn next(&mut self) {
        self.anchor = match self.granularity {
            Granularity::Day => self.anchor.checked_add_days(Days::new(1)),
            Granularity::Week => self.anchor.checked_add_days(Days::new(7)),
            Granularity::Month => self.anchor.checked_add_months(Months::new(1)),
        }
        .unwrap_or(self.anchor);
    }

    pub fn previous(&mut self) {
        self.anchor = match self.granularity {
            Granularity::Day => self.anchor.checked_sub_days(Days::new(1)),
            Granularity::Week => self.anchor.checked_sub_days(Days::new(7)),
            Granularity::Month => self.anchor.checked_sub_months(Months::new(1)),
        }
        .unwrap_or(self.anchor);
    }

    /// The displayed date range as a half-open `[start, end)` pair.
    /// Weeks start on Monday.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        match self.granularity {
            Granularity::Day => {
                let end = self.anchor.checked_add_days(Days::new(1)).unwrap_or(self.anchor);
                (self.anchor, end)
            }
            Granularity::Week => {
                let start = self.anchor.week(Weekday::Mon).first_day();
                let end = start.checked_add_days(Days::new(7)).unwrap_or(start);
                (start, end)
            }
            Granularity::Month => {
                let start = self.anchor.with_day(1).unwrap_or(self.anchor);
                let end = start.checked_add_months(Months::new(1)).unwrap_or(start);
                (start, end)
            }
        }
    }

    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = self.window();
        (
            start.and_time(NaiveTime::MIN).and_utc(),
            end.and_time(NaiveTime::MIN).and_utc(),
        )
    }

    /// Events overlapping the current window, in input order.
    pub fn visible<'a>(&self, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        let (start, end) = self.bounds();
        events
            .iter()
            .filter(|event| event.start < end && event.end >= start)
            .collect()
    }
}

use std::error::Error;

use chrono::{Days, Utc};
use inquire::{Select, Text};

use crate::clients::rest_client::RestClient;
use crate::handlers::forms;
use crate::service::calendar::{self, CalendarEvent, CalendarView, Granularity};
use crate::service::enrichment::enrich_trainings;

#[derive(Clone, Copy)]
enum NavAction {
    Next,
    Previous,
    Today,
    GoToDate,
    DayView,
    WeekView,
    MonthView,
    Quit,
}

impl std::fmt::Display for NavAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NavAction::Next => "Next",
            NavAction::Previous => "Previous",
            NavAction::Today => "Today",
            NavAction::GoToDate => "Go to date",
            NavAction::DayView => "Day view",
            NavAction::WeekView => "Week view",
            NavAction::MonthView => "Month view",
            NavAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Interactive calendar. Trainings are fetched and enriched once on
/// entry; navigating and switching the granularity only re-window the
/// events already in memory.
pub async fn run_calendar(client: &RestClient) -> Result<(), Box<dyn Error>> {
    let trainings = client.fetch_trainings().await?;
    let enriched = enrich_trainings(client, trainings, calendar::FALLBACK_CUSTOMER_NAME).await;
    let events = calendar::build_events(&enriched);

    let mut view = CalendarView::new(Utc::now().date_naive());
    loop {
        println!("{}", render_window(&view, &events));
        let actions = vec![
            NavAction::Next,
            NavAction::Previous,
            NavAction::Today,
            NavAction::GoToDate,
            NavAction::DayView,
            NavAction::WeekView,
            NavAction::MonthView,
            NavAction::Quit,
        ];
        match Select::new("Navigate", actions).prompt()? {
            NavAction::Next => view.next(),
            NavAction::Previous => view.previous(),
            NavAction::Today => view.go_to(Utc::now().date_naive()),
            NavAction::GoToDate => {
                let input = Text::new("Date (YYYY-MM-DD)").prompt()?;
                match forms::parse_plain_date(&input) {
                    Some(date) => view.go_to(date),
                    None => println!("Not a date: {input}"),
                }
            }
            NavAction::DayView => view.set_granularity(Granularity::Day),
            NavAction::WeekView => view.set_granularity(Granularity::Week),
            NavAction::MonthView => view.set_granularity(Granularity::Month),
            NavAction::Quit => break,
        }
    }
    Ok(())
}

/// Text rendering of the current window: one block per day, events
/// listed under the day they start on. Month views skip empty days.
pub fn render_window(view: &CalendarView, events: &[CalendarEvent]) -> String {
    let (start, end) = view.window();
    let last = end.pred_opt().unwrap_or(end);
    let visible = view.visible(events);

    let mut out = format!(
        "[{}] {} - {}",
        view.granularity.label(),
        start.format("%d.%m.%Y"),
        last.format("%d.%m.%Y")
    );

    let skip_empty_days = view.granularity == Granularity::Month;
    let mut shown = 0;
    let mut day = start;
    while day < end {
        let day_events: Vec<&&CalendarEvent> = visible
            .iter()
            .filter(|event| event.start.date_naive() == day)
            .collect();
        if !(day_events.is_empty() && skip_empty_days) {
            out.push_str(&format!("\n{} {}", day.format("%a"), day.format("%d.%m.%Y")));
            for event in day_events {
                out.push_str(&format!(
                    "\n  {}-{}  {}",
                    event.start.format("%H:%M"),
                    event.end.format("%H:%M"),
                    event.title
                ));
                shown += 1;
            }
        }
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    if shown == 0 {
        out.push_str("\n  (no trainings in this window)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn window_lists_events_under_their_start_day() {
        let events = vec![CalendarEvent {
            title: "Running - Ann Lee".to_string(),
            start: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 1, 10, 45, 0).unwrap(),
            tooltip: "Running (45 min) Ann Lee".to_string(),
        }];
        let view = CalendarView::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let rendered = render_window(&view, &events);
        assert!(rendered.starts_with("[week] 29.04.2024 - 05.05.2024"));
        assert!(rendered.contains("Wed 01.05.2024"));
        assert!(rendered.contains("10:00-10:45  Running - Ann Lee"));
    }

    #[test]
    fn empty_window_says_so() {
        let view = CalendarView::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let rendered = render_window(&view, &[]);
        assert!(rendered.contains("(no trainings in this window)"));
    }
}

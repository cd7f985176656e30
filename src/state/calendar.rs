use chrono::{Datelike, Duration, NaiveDate};

use super::fetch::{FetchGate, Generation};
use crate::core::event::{CalendarEvent, EventFilters, EventId};

/// One cell of the month grid. Leading and trailing cells belong to the
/// neighboring months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub in_month: bool,
}

/// The weeks covering `month`, from the Sunday on or before the first of the
/// month through the Saturday on or after the last. Always a whole number of
/// weeks.
pub fn month_grid(month: NaiveDate) -> Vec<GridDay> {
    let first = month.with_day(1).unwrap_or(month);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days((6 - last.weekday().num_days_from_sunday()) as i64);

    let mut days = Vec::new();
    let mut cursor = start;
    loop {
        days.push(GridDay {
            date: cursor,
            in_month: cursor.month() == first.month() && cursor.year() == first.year(),
        });
        if cursor == end {
            break;
        }
        match cursor.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    days
}

/// Calendar-date key, e.g. "2025-03-05". Built from the date alone so no
/// timezone math can shift the day.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The month the calendar shows, the events loaded for it, and the fence
/// that keeps a slow fetch for a previous month from landing on this one.
#[derive(Debug, Clone)]
pub struct MonthView {
    /// First day of the displayed month.
    displayed_month: NaiveDate,
    events: Vec<CalendarEvent>,
    gate: FetchGate,
}

impl Default for MonthView {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            displayed_month: NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap(),
            events: Vec::new(),
            gate: FetchGate::default(),
        }
    }
}

impl MonthView {
    pub fn showing(month: NaiveDate) -> Self {
        Self {
            displayed_month: month.with_day(1).unwrap_or(month),
            events: Vec::new(),
            gate: FetchGate::default(),
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Header label, e.g. "March 2025".
    pub fn month_title(&self) -> String {
        self.displayed_month.format("%B %Y").to_string()
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.gate.invalidate();
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.gate.invalidate();
    }

    /// Listing window for the displayed month, first day through last.
    pub fn fetch_window(&self) -> EventFilters {
        let first = self.displayed_month;
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        EventFilters::window(first, last)
    }

    pub fn begin_fetch(&self) -> (EventFilters, Generation) {
        (self.fetch_window(), self.gate.begin())
    }

    /// Applies a fetched window unless the month changed underneath it.
    pub fn accept(&mut self, generation: Generation, events: Vec<CalendarEvent>) -> bool {
        if !self.gate.is_current(generation) {
            return false;
        }
        self.events = events;
        true
    }

    pub fn grid(&self) -> Vec<GridDay> {
        month_grid(self.displayed_month)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn todays_events(&self, today: NaiveDate) -> Vec<&CalendarEvent> {
        self.events_on(today)
    }

    /// Events on or after `today`, soonest first, untimed entries ahead of
    /// timed ones on the same day.
    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&CalendarEvent> {
        let mut future: Vec<&CalendarEvent> =
            self.events.iter().filter(|e| e.date >= today).collect();
        future.sort_by_key(|e| e.sort_key());
        future.truncate(limit);
        future
    }

    pub fn add_event(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn replace_event(&mut self, event: CalendarEvent) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event,
            None => self.events.push(event),
        }
    }

    pub fn remove_event(&mut self, event_id: EventId) {
        self.events.retain(|e| e.id != event_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_pads_to_whole_weeks() {
        // February 2025 starts on a Saturday and ends on a Friday.
        let grid = month_grid(date(2025, 2, 1));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].date, date(2025, 1, 26));
        assert!(!grid[0].in_month);
        assert_eq!(grid.last().unwrap().date, date(2025, 3, 1));
        assert_eq!(grid.iter().filter(|d| d.in_month).count(), 28);
    }

    #[test]
    fn grid_rows_run_sunday_through_saturday() {
        for month in [date(2025, 2, 1), date(2025, 6, 1), date(2024, 12, 15)] {
            let grid = month_grid(month);
            assert_eq!(grid.len() % 7, 0);
            assert_eq!(grid[0].date.weekday(), Weekday::Sun);
            assert_eq!(grid.last().unwrap().date.weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn month_starting_sunday_gets_no_leading_cells() {
        let grid = month_grid(date(2025, 6, 1));
        assert_eq!(grid[0].date, date(2025, 6, 1));
        assert!(grid[0].in_month);
    }

    #[test]
    fn exact_four_week_february_needs_no_padding() {
        // February 2026 runs Sunday the 1st through Saturday the 28th.
        let grid = month_grid(date(2026, 2, 1));
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|d| d.in_month));
    }

    #[test]
    fn in_month_cells_cover_the_month_contiguously() {
        let grid = month_grid(date(2025, 3, 14));
        let in_month: Vec<u32> = grid
            .iter()
            .filter(|d| d.in_month)
            .map(|d| d.date.day())
            .collect();
        assert_eq!(in_month, (1..=31).collect::<Vec<u32>>());
    }

    #[test]
    fn iso_date_zero_pads_without_shifting() {
        assert_eq!(iso_date(date(2025, 3, 5)), "2025-03-05");
        assert_eq!(iso_date(date(2024, 12, 31)), "2024-12-31");
    }

    #[test]
    fn navigation_moves_by_first_of_month_and_fences_fetches() {
        let mut view = MonthView::showing(date(2025, 3, 14));
        assert_eq!(view.displayed_month(), date(2025, 3, 1));
        assert_eq!(view.month_title(), "March 2025");

        let (filters, generation) = view.begin_fetch();
        assert_eq!(filters.start, Some(date(2025, 3, 1)));
        assert_eq!(filters.end, Some(date(2025, 3, 31)));

        view.next_month();
        assert_eq!(view.displayed_month(), date(2025, 4, 1));
        assert!(!view.accept(generation, vec![CalendarEvent::new(1, "Late", date(2025, 3, 2))]));
        assert!(view.events().is_empty());

        view.prev_month();
        assert_eq!(view.displayed_month(), date(2025, 3, 1));
    }

    #[test]
    fn upcoming_skips_past_days_and_limits() {
        let mut view = MonthView::showing(date(2025, 3, 1));
        let (_, generation) = view.begin_fetch();
        view.accept(
            generation,
            vec![
                CalendarEvent::new(1, "Yesterday", date(2025, 3, 9)),
                CalendarEvent::new(2, "Next week", date(2025, 3, 17)),
                CalendarEvent::new(3, "Today", date(2025, 3, 10)),
                CalendarEvent::new(4, "Tomorrow", date(2025, 3, 11)),
            ],
        );

        let upcoming = view.upcoming(date(2025, 3, 10), 2);
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].title, "Today");
        assert_eq!(upcoming[1].title, "Tomorrow");
    }

    #[test]
    fn created_events_append_in_arrival_order() {
        let mut view = MonthView::showing(date(2025, 3, 1));
        view.add_event(CalendarEvent::new(1, "First", date(2025, 3, 4)));
        view.add_event(CalendarEvent::new(2, "Second", date(2025, 3, 4)));
        assert_eq!(view.events()[1].title, "Second");

        let mut renamed = CalendarEvent::new(1, "First, renamed", date(2025, 3, 4));
        renamed.color = crate::core::event::EventColor::Rose;
        view.replace_event(renamed);
        assert_eq!(view.events()[0].title, "First, renamed");

        view.remove_event(2);
        assert_eq!(view.events_on(date(2025, 3, 4)).len(), 1);
    }
}

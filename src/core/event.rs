use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub type EventId = i64;

/// Accent color the calendar uses for an event chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Teal,
    Violet,
    Rose,
    Amber,
    Blue,
}

impl EventColor {
    pub const ALL: [EventColor; 5] = [
        EventColor::Teal,
        EventColor::Violet,
        EventColor::Rose,
        EventColor::Amber,
        EventColor::Blue,
    ];

    pub fn as_keyword(&self) -> &'static str {
        match self {
            EventColor::Teal => "teal",
            EventColor::Violet => "violet",
            EventColor::Rose => "rose",
            EventColor::Amber => "amber",
            EventColor::Blue => "blue",
        }
    }

    pub fn from_keyword(s: &str) -> Option<EventColor> {
        match s {
            "teal" => Some(EventColor::Teal),
            "violet" => Some(EventColor::Violet),
            "rose" => Some(EventColor::Rose),
            "amber" => Some(EventColor::Amber),
            "blue" => Some(EventColor::Blue),
            _ => None,
        }
    }
}

/// A scheduled entry on the shared calendar. All-day entries carry no times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: EventColor,
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn new(id: EventId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            start_time: None,
            end_time: None,
            color: EventColor::Teal,
            description: None,
        }
    }

    /// Untimed entries sort ahead of timed ones on the same day.
    pub fn sort_key(&self) -> (NaiveDate, Option<NaiveTime>) {
        (self.date, self.start_time)
    }
}

/// Server-side filters for the calendar listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub search: Option<String>,
}

impl EventFilters {
    pub fn window(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            search: None,
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start {
            query.push(("start", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            query.push(("end", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(search) = &self.search {
            if !search.trim().is_empty() {
                query.push(("search", search.trim().to_string()));
            }
        }
        query
    }
}

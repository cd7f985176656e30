use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use super::{ApiClient, ApiError};
use crate::core::event::{CalendarEvent, EventColor, EventFilters, EventId};
use crate::wire::decode::{RawDeleted, RawEvent};

/// The backend expects "HH:MM"; chrono's default carries seconds.
fn hhmm_opt<S: Serializer>(time: &Option<NaiveTime>, ser: S) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => ser.serialize_str(&t.format("%H:%M").to_string()),
        None => ser.serialize_none(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    pub title: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "hhmm_opt")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "hhmm_opt")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "hhmm_opt")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "hhmm_opt")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct CalendarApi {
    client: ApiClient,
}

impl CalendarApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &EventFilters) -> Result<Vec<CalendarEvent>, ApiError> {
        let query = filters.to_query();
        let raw: Vec<RawEvent> = self.client.get("/calendar/events", &query).await?;
        Ok(raw.into_iter().map(CalendarEvent::from).collect())
    }

    pub async fn create(&self, payload: &CreateEventPayload) -> Result<CalendarEvent, ApiError> {
        let raw: RawEvent = self.client.post("/calendar/events", payload).await?;
        Ok(raw.into())
    }

    pub async fn update(
        &self,
        id: EventId,
        payload: &UpdateEventPayload,
    ) -> Result<CalendarEvent, ApiError> {
        let raw: RawEvent = self
            .client
            .patch(&format!("/calendar/events/{}", id), payload)
            .await?;
        Ok(raw.into())
    }

    pub async fn remove(&self, id: EventId) -> Result<EventId, ApiError> {
        let ack: RawDeleted = self
            .client
            .delete(&format!("/calendar/events/{}", id))
            .await?;
        Ok(ack.id)
    }
}

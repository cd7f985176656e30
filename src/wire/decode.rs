use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::event::{CalendarEvent, EventColor};
use crate::core::invitation::{Invitation, InvitationStatus};
use crate::core::notification::{Notification, NotificationKind};
use crate::core::project::{AssigneeOption, Project, ProjectMember, ProjectStatus};
use crate::core::settings::UserProfile;
use crate::core::task::{Task, TaskPriority, TaskStatus, clamp_progress};
use crate::core::team::{Presence, TeamMember};
use crate::core::user::SessionUser;

/// Ids arrive as numbers or numeric strings depending on the backend build.
pub(crate) fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| serde::de::Error::custom("expected a numeric id"))
}

fn flexible_id_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

/// Calendar dates are `YYYY-MM-DD`; a full datetime prefix is tolerated.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn date_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Times-of-day are `HH:MM`, occasionally with seconds.
pub(crate) fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .ok()
        .or_else(|| NaiveTime::parse_from_str(s, "%H:%M:%S").ok())
}

fn time_opt<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_time))
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// A person reference that may be a nested object (`{id}` or `{userId}`,
/// with any of the name spellings) or a bare id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPersonRef {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl RawPersonRef {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let id = map
                    .get("id")
                    .and_then(id_from_value)
                    .or_else(|| map.get("userId").and_then(id_from_value));
                let name = ["fullName", "full_name", "name"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str))
                    .map(str::to_string);
                Self { id, name }
            }
            other => Self {
                id: id_from_value(other),
                name: None,
            },
        }
    }
}

impl<'de> Deserialize<'de> for RawPersonRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(RawPersonRef::from_value(&value))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "date_opt")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id_opt")]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, alias = "assignedToId", deserialize_with = "flexible_id_opt")]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub assignee_name: Option<String>,
    #[serde(default)]
    pub assignee_initials: Option<String>,
    #[serde(default)]
    pub assignee: Option<RawPersonRef>,
    #[serde(default, alias = "creatorId", deserialize_with = "flexible_id_opt")]
    pub created_by_id: Option<i64>,
    #[serde(default)]
    pub created_by: Option<RawPersonRef>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        let assignee_id = raw
            .assignee_id
            .or_else(|| raw.assignee.as_ref().and_then(|person| person.id));
        let assignee_name = raw
            .assignee_name
            .or_else(|| raw.assignee.as_ref().and_then(|person| person.name.clone()));
        let creator_id = raw
            .created_by_id
            .or_else(|| raw.created_by.as_ref().and_then(|person| person.id));
        Task {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            status: raw.status,
            priority: raw.priority,
            due_date: raw.due_date,
            progress: raw.progress.map(clamp_progress),
            project_id: raw.project_id,
            project_name: raw.project_name,
            assignee_id,
            assignee_name,
            assignee_initials: raw.assignee_initials,
            creator_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default, deserialize_with = "date_opt")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub team_initials: Vec<String>,
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        Project {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            status: raw.status.unwrap_or(ProjectStatus::Active),
            progress: raw.progress.map(clamp_progress),
            due_date: raw.due_date,
            team: raw.team_initials,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMember {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    #[serde(deserialize_with = "flexible_id_opt")]
    pub user_id: Option<i64>,
    #[serde(alias = "full_name")]
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl From<RawMember> for ProjectMember {
    fn from(raw: RawMember) -> Self {
        ProjectMember {
            id: raw.id,
            user_id: raw.user_id,
            name: raw.full_name.or(raw.name),
            email: raw.email,
            role: raw.role,
            status: raw
                .status
                .as_deref()
                .and_then(InvitationStatus::from_keyword),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssignee {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    #[serde(default, alias = "full_name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<RawAssignee> for AssigneeOption {
    fn from(raw: RawAssignee) -> Self {
        let name = raw
            .full_name
            .or(raw.name)
            .or_else(|| raw.email.clone())
            .unwrap_or_else(|| format!("User {}", raw.id));
        AssigneeOption {
            id: raw.id,
            name,
            email: raw.email,
            role: raw.role,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "time_opt")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "time_opt")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<RawEvent> for CalendarEvent {
    fn from(raw: RawEvent) -> Self {
        let color = raw
            .color
            .as_deref()
            .and_then(EventColor::from_keyword)
            .unwrap_or_default();
        CalendarEvent {
            id: raw.id,
            title: raw.title,
            date: raw.date,
            start_time: raw.start_time,
            end_time: raw.end_time,
            color,
            description: raw.description,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInvitation {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    #[serde(deserialize_with = "flexible_id")]
    pub project_id: i64,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_opt")]
    pub inviter_id: Option<i64>,
    #[serde(default)]
    pub inviter_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_opt")]
    pub invited_user_id: Option<i64>,
    #[serde(default)]
    pub invited_user_name: Option<String>,
    #[serde(default)]
    pub invited_user_email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub status: InvitationStatus,
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RawInvitation> for Invitation {
    fn from(raw: RawInvitation) -> Self {
        Invitation {
            id: raw.id,
            project_id: raw.project_id,
            project_name: raw.project_name.unwrap_or_default(),
            inviter_id: raw.inviter_id,
            inviter_name: raw.inviter_name,
            invited_user_id: raw.invited_user_id,
            invited_user_name: raw.invited_user_name,
            invited_user_email: raw.invited_user_email,
            role: raw.role,
            status: raw.status,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotification {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actor_name: Option<String>,
}

impl From<RawNotification> for Notification {
    fn from(raw: RawNotification) -> Self {
        Notification {
            id: raw.id,
            kind: raw.kind,
            title: raw.title,
            message: raw.message,
            read: raw.read,
            created_at: raw.created_at,
            actor_name: raw.actor_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeamMember {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "status")]
    pub presence: Presence,
    #[serde(default)]
    pub tasks_count: u32,
    #[serde(default)]
    pub projects_count: u32,
    #[serde(default)]
    pub completion_rate: i64,
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<RawTeamMember> for TeamMember {
    fn from(raw: RawTeamMember) -> Self {
        TeamMember {
            id: raw.id,
            name: raw.name,
            role: raw.role,
            presence: raw.presence,
            task_count: raw.tasks_count,
            project_count: raw.projects_count,
            completion_rate: clamp_progress(raw.completion_rate),
            initials: raw.initials,
            avatar_url: raw.avatar_url,
        }
    }
}

/// Profile payloads spell the account fields several ways; all spellings
/// funnel through here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUser {
    #[serde(deserialize_with = "flexible_id_opt")]
    pub id: Option<i64>,
    #[serde(alias = "full_name")]
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "avatar_url")]
    pub avatar_url: Option<String>,
}

/// A payload with none of the name spellings and no email is not a usable
/// account.
pub fn session_user(raw: RawUser) -> Option<SessionUser> {
    let name = raw.full_name.or(raw.name).or_else(|| raw.email.clone())?;
    Some(SessionUser {
        id: raw.id,
        name,
        email: raw.email,
        role: raw.role,
        avatar_url: raw.avatar_url,
    })
}

/// Resolve the account object out of a profile response. The backend has
/// served it as `data.user`, as `data`, and as the bare body.
pub fn profile_user(body: &Value) -> Option<SessionUser> {
    let candidates = [body.pointer("/data/user"), body.pointer("/data"), Some(body)];
    for candidate in candidates.into_iter().flatten() {
        if !candidate.is_object() {
            continue;
        }
        if let Ok(raw) = serde_json::from_value::<RawUser>(candidate.clone()) {
            if let Some(user) = session_user(raw) {
                return Some(user);
            }
        }
    }
    None
}

/// Token and (when included) account from a login or register response.
pub fn login_session(body: &Value) -> (Option<String>, Option<SessionUser>) {
    let token = body
        .pointer("/data/token")
        .and_then(Value::as_str)
        .map(str::to_string);
    (token, profile_user(body))
}

fn first_string(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Settings-screen profile out of a /users/me response, tolerating the same
/// nesting and key drift `profile_user` does plus the role/avatar synonyms.
pub fn profile_details(body: &Value) -> UserProfile {
    let candidates = [body.pointer("/data/user"), body.pointer("/data"), Some(body)];
    for candidate in candidates.into_iter().flatten() {
        if !candidate.is_object() {
            continue;
        }
        let full_name = first_string(candidate, &["fullName", "full_name", "name"]);
        let email = first_string(candidate, &["email"]);
        if full_name.is_none() && email.is_none() {
            continue;
        }
        return UserProfile {
            full_name: full_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            role_title: first_string(candidate, &["roleTitle", "role"]).unwrap_or_default(),
            avatar_url: first_string(
                candidate,
                &["avatarUrl", "avatar_url", "avatar", "profile_image"],
            ),
        };
    }
    UserProfile::default()
}

/// Delete endpoints acknowledge with `{id}`.
#[derive(Debug, Deserialize)]
pub struct RawDeleted {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCount {
    #[serde(default)]
    pub count: u32,
}

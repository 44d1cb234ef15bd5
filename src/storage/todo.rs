use super::TodoId;
use bincode::{Decode, Encode};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Current UTC time at the precision records are stored with.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[schema(value_type = String)]
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub(crate) fn new(id: TodoId, title: &str, description: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.to_owned(),
            description: description.unwrap_or_default().to_owned(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `patch` and refreshes `updated_at`.
    ///
    /// `updated_at` never moves backwards, so it stays `>= created_at` even if
    /// the wall clock does.
    pub(crate) fn apply(&mut self, patch: &UpdateTodo, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl From<&crate::handlers::UpdateTodo> for UpdateTodo {
    fn from(value: &crate::handlers::UpdateTodo) -> Self {
        Self {
            title: value.title.clone(),
            description: value.description.clone(),
            completed: value.completed,
        }
    }
}

#[derive(Error, Debug)]
#[error("Stored timestamp out of range: {0}")]
pub struct TimestampOutOfRange(pub i64);

#[derive(Encode, Decode, Debug)]
pub(crate) enum TodoVersion {
    V1 {
        id: TodoId,
        title: String,
        description: String,
        completed: bool,
        created_at_micros: i64,
        updated_at_micros: i64,
    },
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>, TimestampOutOfRange> {
    DateTime::from_timestamp_micros(micros).ok_or(TimestampOutOfRange(micros))
}

impl TryFrom<TodoVersion> for Todo {
    type Error = TimestampOutOfRange;

    fn try_from(value: TodoVersion) -> Result<Self, Self::Error> {
        match value {
            TodoVersion::V1 {
                id,
                title,
                description,
                completed,
                created_at_micros,
                updated_at_micros,
            } => Ok(Self {
                id,
                title,
                description,
                completed,
                created_at: from_micros(created_at_micros)?,
                updated_at: from_micros(updated_at_micros)?,
            }),
        }
    }
}

impl From<Todo> for TodoVersion {
    fn from(value: Todo) -> Self {
        Self::V1 {
            id: value.id,
            title: value.title,
            description: value.description,
            completed: value.completed,
            created_at_micros: value.created_at.timestamp_micros(),
            updated_at_micros: value.updated_at.timestamp_micros(),
        }
    }
}

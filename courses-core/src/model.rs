use crate::id::CourseId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A course that is about to be persisted. `created_at` is stamped when this is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewCourse {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self::with_created_at(name, description, Utc::now())
    }

    pub fn with_created_at(
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            description,
            created_at,
        }
    }
}

/// Replacement values for an existing course.
/// A `None` description leaves the stored description as it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseUpdate {
    pub name: String,
    pub description: Option<String>,
}

impl CourseUpdate {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self { name, description }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn create(id: CourseId, new_course: NewCourse) -> Self {
        Self::new(
            id,
            new_course.name,
            new_course.description,
            new_course.created_at,
        )
    }

    pub fn new(
        id: CourseId,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            created_at,
        }
    }

    /// Applies `update`, leaving `id` and `created_at` untouched.
    pub fn apply(&mut self, update: CourseUpdate) {
        self.name = update.name;
        if let Some(description) = update.description {
            self.description = Some(description);
        }
    }
}

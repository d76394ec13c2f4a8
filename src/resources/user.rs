use crate::{
    endpoints, loose::null_as_default, resources::Enrollment, ApiError, Client,
    Loose,
};
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// A Canvas user.
///
/// Most fields are only filled in when the caller has permission to see
/// them (e.g. `email` or `sis_user_id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct User {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sortable_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_name: String,
    pub sis_user_id: Option<String>,
    pub sis_import_id: Option<u64>,
    pub sis_login_id: Option<Loose<String>>,
    pub integration_id: Option<String>,
    pub login_id: Option<String>,
    pub avatar_url: Option<String>,
    pub enrollments: Option<Loose<Vec<Enrollment>>>,
    pub email: Option<String>,
    pub locale: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub time_zone: Option<String>,
    pub bio: Option<String>,
}

impl Client {
    /// Get a user by their id.
    pub async fn user(&self, id: u64) -> Result<User, ApiError> {
        self.get(&endpoints::user(id)).await
    }

    /// Get the user the access token belongs to.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(&endpoints::user("self")).await
    }

    /// List the users enrolled in a course.
    pub async fn users_for_course(
        &self,
        course_id: u64,
    ) -> Result<Vec<User>, ApiError> {
        self.get(&endpoints::users_for_course(course_id)).await
    }
}

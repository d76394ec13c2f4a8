use crate::{endpoints, loose::null_as_default, ApiError, Client, Loose};
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// A course.
///
/// Canvas sometimes sends `null` where a value is expected. Those fields fall
/// back to their defaults instead of failing the whole course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Course {
    pub id: u64,
    pub sis_course_id: Option<Loose<String>>,
    pub integration_id: Option<Loose<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub course_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub workflow_state: String,
    pub account_id: Option<u64>,
    pub root_account_id: Option<u64>,
    pub enrollment_term_id: Option<u64>,
    pub grading_standard_id: Option<u64>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub locale: Option<String>,
    /// Only present when asked for with `include[]=enrollments`.
    pub enrollments: Option<Loose<Vec<Enrollment>>>,
    pub total_students: Option<u64>,
    pub calendar: Option<Loose<Calendar>>,
    pub default_view: Option<String>,
    pub syllabus_body: Option<String>,
    pub needs_grading_count: Option<u64>,
    pub term: Option<Loose<Term>>,
    pub course_progress: Option<Loose<CourseProgress>>,
    #[serde(deserialize_with = "null_as_default")]
    pub apply_assignment_group_weights: bool,
    pub permissions: Option<CoursePermissions>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_public: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_public_to_auth_users: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub public_syllabus: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub public_syllabus_to_auth: bool,
    pub public_description: Option<String>,
    pub storage_quota_mb: Option<u64>,
    pub storage_quota_used_mb: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub hide_final_grades: bool,
    pub license: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_student_assignment_edits: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_wiki_comments: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_student_forum_attachments: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub open_enrollment: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub self_enrollment: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub restrict_enrollments_to_course_dates: bool,
    pub course_format: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub access_restricted_by_date: bool,
    pub time_zone: Option<String>,
}

/// A user's enrollment in a course, as embedded in a [`Course`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Enrollment {
    #[serde(rename = "type")]
    pub enrollment_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    pub role_id: Option<u64>,
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enrollment_state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit_privileges_to_course_section: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Calendar {
    /// A link to the course's calendar in iCalendar format.
    pub ics: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Term {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

/// How far the current user has got through a course's modules.
///
/// Canvas answers with an `{"error": ...}` object instead when the course
/// doesn't track completion, which ends up as [`Loose::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CourseProgress {
    pub requirement_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirement_completed_count: u64,
    pub next_requirement_url: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// What the current user may do in a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct CoursePermissions {
    #[serde(deserialize_with = "null_as_default")]
    pub create_discussion_topic: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub create_announcement: bool,
}

#[derive(Debug, Serialize)]
struct PreviewHtml<'a> {
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct PreviewHtmlResponse {
    html: String,
}

impl Client {
    /// List the active courses for the current user.
    pub async fn courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get(&endpoints::courses()).await
    }

    /// Get a single course.
    pub async fn course(&self, id: u64) -> Result<Course, ApiError> {
        self.get(&endpoints::course(id)).await
    }

    /// List the active courses for another user.
    pub async fn courses_for_user(
        &self,
        user_id: u64,
    ) -> Result<Vec<Course>, ApiError> {
        self.get(&endpoints::courses_for_user(user_id)).await
    }

    /// Ask Canvas to sanitize a chunk of HTML the way it would if it were
    /// saved in this course.
    pub async fn preview_html(
        &self,
        course_id: u64,
        html: &str,
    ) -> Result<String, ApiError> {
        let form = PreviewHtml { html };
        let response: PreviewHtmlResponse = self
            .post_form(&endpoints::course_preview_html(course_id), &form)
            .await?;

        Ok(response.html)
    }
}

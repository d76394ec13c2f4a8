use crate::{endpoints, loose::null_as_default, ApiError, Client, Loose};
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

/// An assignment within a course.
///
/// As with [`crate::Course`], a `null` where a plain value is expected
/// reads as that value's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Assignment {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub lock_at: Option<DateTime<Utc>>,
    pub unlock_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_overrides: bool,
    /// Only present when asked for with `include[]=all_dates`.
    pub all_dates: Option<Loose<Vec<AssignmentDate>>>,
    #[serde(deserialize_with = "null_as_default")]
    pub course_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    pub submissions_download_url: Option<String>,
    pub assignment_group_id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub due_date_required: bool,
    pub allowed_extensions: Option<Vec<String>>,
    pub max_name_length: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub turnitin_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub vericite_enabled: bool,
    /// Free-form, it depends entirely on the plagiarism service.
    pub turnitin_settings: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub grade_group_students_individually: bool,
    pub external_tool_tag_attributes: Option<Loose<ExternalToolTagAttributes>>,
    #[serde(deserialize_with = "null_as_default")]
    pub peer_reviews: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub automatic_peer_reviews: bool,
    pub peer_review_count: Option<u64>,
    pub peer_reviews_assign_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub intra_group_peer_reviews: bool,
    pub group_category_id: Option<u64>,
    pub needs_grading_count: Option<u64>,
    pub needs_grading_count_by_section: Option<Vec<SectionGradingCount>>,
    pub position: Option<u64>,
    pub post_to_sis: Option<bool>,
    pub integration_id: Option<String>,
    pub integration_data: Option<Value>,
    pub muted: Option<Loose<bool>>,
    pub points_possible: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub submission_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub grading_type: String,
    pub grading_standard_id: Option<Loose<u64>>,
    #[serde(deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub unpublishable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub only_visible_to_overrides: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub locked_for_user: bool,
    pub lock_info: Option<Loose<LockInfo>>,
    pub lock_explanation: Option<String>,
    pub quiz_id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub anonymous_submissions: bool,
    pub discussion_topic: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub freeze_on_copy: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub frozen: bool,
    pub frozen_attributes: Option<Vec<String>>,
    pub submission: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub use_rubric_for_grading: bool,
    pub rubric_settings: Option<Loose<RubricSettings>>,
    pub rubric: Option<Loose<Vec<RubricCriterion>>>,
    pub assignment_visibility: Option<Vec<u64>>,
    pub overrides: Option<Loose<Vec<AssignmentOverride>>>,
    #[serde(deserialize_with = "null_as_default")]
    pub omit_from_final_grade: bool,
}

/// One of the due dates an assignment has once overrides are applied.
///
/// Canvas only sends `id` for overrides and `base` for the assignment's own
/// date, so every field is optional here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct AssignmentDate {
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub base: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub due_at: Option<DateTime<Utc>>,
    pub unlock_at: Option<DateTime<Utc>>,
    pub lock_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ExternalToolTagAttributes {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_tab: bool,
    pub resource_link_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct SectionGradingCount {
    pub section_id: String,
    pub needs_grading_count: u64,
}

/// Why an assignment is locked for the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct LockInfo {
    pub asset_string: String,
    pub unlock_at: Option<DateTime<Utc>>,
    pub lock_at: Option<DateTime<Utc>>,
    pub context_module: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manually_locked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RubricSettings {
    pub points_possible: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RubricCriterion {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub long_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AssignmentOverride {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignment_id: u64,
    pub student_ids: Option<Vec<u64>>,
    pub group_id: Option<u64>,
    pub course_section_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub due_at: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub unlock_at: Option<DateTime<Utc>>,
    pub lock_at: Option<DateTime<Utc>>,
}

/// The details needed to create a new [`Assignment`]. Anything left as `None`
/// gets Canvas' default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewAssignment {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub submission_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl NewAssignment {
    pub fn new<S: Into<String>>(name: S) -> Self {
        NewAssignment {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateAssignment<'a> {
    assignment: &'a NewAssignment,
}

impl Client {
    /// List the assignments in a course.
    pub async fn assignments(
        &self,
        course_id: u64,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get(&endpoints::assignments_for_course(course_id)).await
    }

    /// List a course's assignments as seen by a particular user.
    pub async fn assignments_for_user(
        &self,
        user_id: u64,
        course_id: u64,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get(&endpoints::course_assignments_for_user(user_id, course_id))
            .await
    }

    /// Create a new assignment in a course.
    pub async fn create_assignment(
        &self,
        course_id: u64,
        assignment: &NewAssignment,
    ) -> Result<Assignment, ApiError> {
        let body = CreateAssignment { assignment };

        self.post_json(&endpoints::assignments_for_course(course_id), &body)
            .await
    }
}

//! Paths for the Canvas REST API's endpoints.
//!
//! Every function here is a plain string template. Ids are anything that
//! implements [`Display`], so numeric ids, `self` and SIS ids
//! (`sis_course_id:ABC123`) all work. Nothing is validated; a bogus id just
//! produces a request the server will reject.

use std::fmt::Display;

const PREFIX: &str = "api/v1";

const COURSES: &str = "courses";
const USERS: &str = "users";
const SEARCH_USERS: &str = "search_users";
const ACCOUNTS: &str = "accounts";
const STUDENTS: &str = "students";
const FILES: &str = "files";
const ASSIGNMENTS: &str = "assignments";
const RECENT_STUDENTS: &str = "recent_students";
const PREVIEW_HTML: &str = "preview_html";

/// Where users are sent to authorize an OAuth2 application.
pub fn auth_path() -> &'static str { "login/oauth2/auth" }

/// Where authorization codes and refresh tokens are exchanged for access
/// tokens.
pub fn token_path() -> &'static str { "login/oauth2/token" }

/// `api/v1/courses`
pub fn courses() -> String { format!("{}/{}", PREFIX, COURSES) }

/// `api/v1/courses/:id`
pub fn course(id: impl Display) -> String { format!("{}/{}", courses(), id) }

/// `api/v1/users`
pub fn users() -> String { format!("{}/{}", PREFIX, USERS) }

/// `api/v1/users/:id`
pub fn user(id: impl Display) -> String { format!("{}/{}", users(), id) }

/// `api/v1/accounts`
pub fn accounts() -> String { format!("{}/{}", PREFIX, ACCOUNTS) }

/// `api/v1/accounts/:id`
pub fn account(id: impl Display) -> String {
    format!("{}/{}", accounts(), id)
}

/// `api/v1/users/:user_id/courses`
pub fn courses_for_user(user_id: impl Display) -> String {
    format!("{}/{}", user(user_id), COURSES)
}

/// `api/v1/accounts/:account_id/courses`
pub fn courses_for_account(account_id: impl Display) -> String {
    format!("{}/{}", account(account_id), COURSES)
}

/// `api/v1/courses/:course_id/files`
pub fn files_for_course(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), FILES)
}

/// `api/v1/courses/:course_id/students`
pub fn students_for_course(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), STUDENTS)
}

/// `api/v1/courses/:course_id/users`
pub fn users_for_course(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), USERS)
}

/// `api/v1/courses/:course_id/search_users`
pub fn search_users_for_course(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), SEARCH_USERS)
}

/// `api/v1/courses/:course_id/recent_students`
pub fn recent_students_for_course(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), RECENT_STUDENTS)
}

/// `api/v1/courses/:course_id/users/:id`
pub fn user_for_course(
    course_id: impl Display,
    user_id: impl Display,
) -> String {
    format!("{}/{}", users_for_course(course_id), user_id)
}

/// `api/v1/courses/:course_id/assignments`
pub fn assignments_for_course(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), ASSIGNMENTS)
}

/// `api/v1/users/:user_id/courses/:course_id`
pub fn course_for_user(
    user_id: impl Display,
    course_id: impl Display,
) -> String {
    format!("{}/{}", courses_for_user(user_id), course_id)
}

/// `api/v1/users/:user_id/courses/:course_id/assignments`
pub fn course_assignments_for_user(
    user_id: impl Display,
    course_id: impl Display,
) -> String {
    format!("{}/{}", course_for_user(user_id, course_id), ASSIGNMENTS)
}

/// `api/v1/courses/:course_id/preview_html`
pub fn course_preview_html(course_id: impl Display) -> String {
    format!("{}/{}", course(course_id), PREVIEW_HTML)
}

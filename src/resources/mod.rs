//! Canvas resources and the [`Client`](crate::Client) methods which fetch
//! them.
//!
//! Records mirror the JSON Canvas sends back. Every field may be missing and
//! unknown fields are ignored, so a record from an older (or newer) Canvas
//! still decodes.

mod assignment;
mod course;
mod user;

pub use assignment::{
    Assignment, AssignmentDate, AssignmentOverride, ExternalToolTagAttributes,
    LockInfo, NewAssignment, RubricCriterion, RubricSettings,
    SectionGradingCount,
};
pub use course::{
    Calendar, Course, CoursePermissions, CourseProgress, Enrollment, Term,
};
pub use user::User;

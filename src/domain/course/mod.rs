//! Course Context - 在线课程

mod content;
mod errors;
mod online_course;

pub use content::{CourseClass, CourseContent, CourseSection};
pub use errors::CourseError;
pub use online_course::OnlineCourse;

//! Entity structs for all SMART-TDAH domain objects.
//!
//! Field names are Rust-side English; `#[serde(rename)]` keeps the JSON shape
//! the frontend already consumes.

mod exercise;
mod link;
mod principal;
mod student;

pub use exercise::{ExerciseRecord, NewExercise};
pub use link::OwnershipLink;
pub use principal::{NewPrincipal, Principal, PrincipalAccount, Profile, TeacherSummary};
pub use student::{NewStudent, Student, StudentStatsRow};

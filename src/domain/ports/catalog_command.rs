//! Driving port for catalog write operations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Course, CourseDraft, CourseId, Error};

/// Driving port for catalog write operations.
///
/// Implementations enforce the business rules: update and discount require
/// the course to exist, and discount percentages must fall in `(0, 100]`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogCommand: Send + Sync {
    /// Persist a new course and return it with its assigned identifier.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Replace name, price, and description of an existing course.
    /// Fails with `NotFound` when the id is unknown; never changes the id.
    async fn update_course(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error>;

    /// Remove a course. Returns `false` when the id is unknown; removal of
    /// an absent course is not an error at this layer.
    async fn delete_course(&self, id: CourseId) -> Result<bool, Error>;

    /// Apply a percentage discount in `(0, 100]` and persist the result.
    /// Fails with `NotFound` for unknown ids and `InvalidArgument` for
    /// out-of-range percentages.
    async fn apply_discount(&self, id: CourseId, percentage: Decimal) -> Result<Course, Error>;
}

/// Fixture implementation that accepts creates and reports everything else
/// as missing. Useful where command behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCatalogCommand;

#[async_trait]
impl CourseCatalogCommand for FixtureCourseCatalogCommand {
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        Ok(Course::from_draft(draft).with_id(CourseId::new(1)))
    }

    async fn update_course(&self, id: CourseId, _draft: CourseDraft) -> Result<Course, Error> {
        Err(Error::not_found(format!("course {id} not found")))
    }

    async fn delete_course(&self, _id: CourseId) -> Result<bool, Error> {
        Ok(false)
    }

    async fn apply_discount(&self, id: CourseId, _percentage: Decimal) -> Result<Course, Error> {
        Err(Error::not_found(format!("course {id} not found")))
    }
}

//! Driven port for course persistence.
//!
//! The [`CourseRepository`] trait is the single storage contract the catalog
//! service depends on. Adapters implement it for their backend; the reference
//! implementation is the in-memory adapter in `outbound::persistence`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Course, CourseId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Storage backend could not be reached.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
    }
}

/// Port for course storage and retrieval.
///
/// # Atomicity
///
/// `save` and `delete_by_id` never partially apply: each call either fully
/// succeeds or leaves prior state untouched.
///
/// # Identifier assignment
///
/// `save` of a course without an id inserts it and assigns a fresh
/// identifier, monotonic within a process lifetime and never reused after a
/// deletion. `save` of a course whose id is set fully replaces the stored
/// record; if no record with that id exists, the course is inserted under
/// its id and the sequence advances past it (relational upsert semantics).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a course and return its stored state, id assigned.
    async fn save(&self, course: &Course) -> Result<Course, CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Snapshot of every stored course, in insertion order.
    async fn find_all(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Whether a course with this identifier exists.
    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;

    /// Remove a course. Returns `true` iff a record was removed.
    async fn delete_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;

    /// Courses whose name contains `needle`, case-insensitively.
    async fn find_by_name_containing(
        &self,
        needle: &str,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Courses priced within `[min, max]` inclusive.
    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Total number of stored courses.
    async fn count(&self) -> Result<u64, CourseRepositoryError>;
}

//! Driving port for catalog read operations.
//!
//! Inbound adapters use this port to read courses without depending on
//! repository details.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Course, CourseId, Error};

/// Optional pass-through filters for listing courses.
///
/// These carry no business meaning; they map directly onto the repository's
/// query helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Case-insensitive name substring.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl CourseFilter {
    /// Whether no filter criterion is set.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }
}

/// Driving port for catalog read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogQuery: Send + Sync {
    /// List stored courses, optionally filtered.
    async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, Error>;

    /// Fetch one course. Absence is not an error at this layer; the inbound
    /// adapter decides how to surface `None`.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, Error>;
}

/// Fixture implementation backed by no storage; every lookup is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCatalogQuery;

#[async_trait]
impl CourseCatalogQuery for FixtureCourseCatalogQuery {
    async fn list_courses(&self, _filter: CourseFilter) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }

    async fn get_course(&self, _id: CourseId) -> Result<Option<Course>, Error> {
        Ok(None)
    }
}

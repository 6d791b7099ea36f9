//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCatalogCommand, CourseCatalogQuery, FixtureCourseCatalogCommand,
    FixtureCourseCatalogQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CourseCatalogCommand>,
    pub courses_query: Arc<dyn CourseCatalogQuery>,
}

impl HttpState {
    /// Construct state from the catalog ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use course_catalog::domain::ports::{
    ///     FixtureCourseCatalogCommand, FixtureCourseCatalogQuery,
    /// };
    /// use course_catalog::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureCourseCatalogCommand),
    ///     Arc::new(FixtureCourseCatalogQuery),
    /// );
    /// let _courses = state.courses.clone();
    /// ```
    pub fn new(
        courses: Arc<dyn CourseCatalogCommand>,
        courses_query: Arc<dyn CourseCatalogQuery>,
    ) -> Self {
        Self {
            courses,
            courses_query,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            courses: Arc::new(FixtureCourseCatalogCommand),
            courses_query: Arc::new(FixtureCourseCatalogQuery),
        }
    }
}

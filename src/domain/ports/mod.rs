//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`CourseCatalogCommand`], [`CourseCatalogQuery`]) are what
//! inbound adapters call; the driven port ([`CourseRepository`]) is what the
//! catalog service calls into storage adapters. Port errors are strongly
//! typed so adapters map their failures into predictable variants instead of
//! returning `anyhow::Result`.

mod catalog_command;
mod catalog_query;
mod course_repository;
mod macros;

pub(crate) use macros::define_port_error;

pub use catalog_command::{CourseCatalogCommand, FixtureCourseCatalogCommand};
pub use catalog_query::{CourseCatalogQuery, CourseFilter, FixtureCourseCatalogQuery};
pub use course_repository::{CourseRepository, CourseRepositoryError};

#[cfg(test)]
pub use catalog_command::MockCourseCatalogCommand;
#[cfg(test)]
pub use catalog_query::MockCourseCatalogQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;

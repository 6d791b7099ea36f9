//! Domain layer for the course catalog.
//!
//! Holds the course entity and its validation rules, the ports crossing the
//! hexagon boundary, the catalog service implementing those ports, and the
//! structured error payload shared with inbound adapters. Nothing in here
//! depends on HTTP or on a concrete storage backend.

pub mod course;
pub mod course_service;
pub mod error;
pub mod ports;

pub use course::{
    Course, CourseDraft, CourseFieldError, CourseId, CourseValidationError, InvalidDiscountError,
};
pub use course_service::CourseCatalogService;
pub use error::{Error, ErrorCode};

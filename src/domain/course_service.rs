//! Catalog use-case orchestration.
//!
//! [`CourseCatalogService`] implements the driving ports on top of the
//! repository port. It owns the business rules (existence checks, discount
//! range) and maps repository failures into the domain [`Error`] payload.
//! HTTP concerns never appear here.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domain::ports::{
    CourseCatalogCommand, CourseCatalogQuery, CourseFilter, CourseRepository,
    CourseRepositoryError,
};
use crate::domain::{Course, CourseDraft, CourseId, Error};

/// Course catalog service implementing the driving ports.
#[derive(Clone)]
pub struct CourseCatalogService<R> {
    repository: Arc<R>,
}

impl<R> CourseCatalogService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CourseCatalogService<R>
where
    R: CourseRepository,
{
    fn map_repository_error(error: CourseRepositoryError) -> Error {
        Error::internal(format!("course repository error: {error}"))
    }

    async fn load_or_not_found(&self, id: CourseId) -> Result<Course, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| {
                warn!(%id, "course not found");
                Error::not_found(format!("course {id} not found"))
            })
    }

    fn within_bounds(course: &Course, min: Option<Decimal>, max: Option<Decimal>) -> bool {
        min.is_none_or(|min| course.price() >= min)
            && max.is_none_or(|max| course.price() <= max)
    }
}

#[async_trait]
impl<R> CourseCatalogQuery for CourseCatalogService<R>
where
    R: CourseRepository,
{
    #[instrument(skip(self, filter))]
    async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<Course>, Error> {
        let CourseFilter {
            name,
            min_price,
            max_price,
        } = filter;

        let courses = if let Some(needle) = name {
            let mut matched = self
                .repository
                .find_by_name_containing(&needle)
                .await
                .map_err(Self::map_repository_error)?;
            matched.retain(|course| Self::within_bounds(course, min_price, max_price));
            matched
        } else if min_price.is_some() || max_price.is_some() {
            self.repository
                .find_by_price_between(
                    min_price.unwrap_or(Decimal::ZERO),
                    max_price.unwrap_or(Decimal::MAX),
                )
                .await
                .map_err(Self::map_repository_error)?
        } else {
            self.repository
                .find_all()
                .await
                .map_err(Self::map_repository_error)?
        };

        info!(count = courses.len(), "listed courses");
        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> CourseCatalogCommand for CourseCatalogService<R>
where
    R: CourseRepository,
{
    #[instrument(skip(self, draft))]
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        let course = Course::from_draft(draft);
        let saved = self
            .repository
            .save(&course)
            .await
            .map_err(Self::map_repository_error)?;
        info!(id = ?saved.id(), name = saved.name(), "created course");
        Ok(saved)
    }

    #[instrument(skip(self, draft))]
    async fn update_course(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error> {
        let mut course = self.load_or_not_found(id).await?;
        course.replace_fields(draft);
        let saved = self
            .repository
            .save(&course)
            .await
            .map_err(Self::map_repository_error)?;
        info!(%id, "updated course");
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: CourseId) -> Result<bool, Error> {
        let removed = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;
        if removed {
            info!(%id, "deleted course");
        } else {
            warn!(%id, "course not found for deletion");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn apply_discount(&self, id: CourseId, percentage: Decimal) -> Result<Course, Error> {
        let mut course = self.load_or_not_found(id).await?;
        let original = course.price();
        course.apply_discount(percentage).map_err(|err| {
            Error::invalid_argument(err.to_string()).with_details(json!({
                "percentage": percentage.to_string(),
            }))
        })?;
        let saved = self
            .repository
            .save(&course)
            .await
            .map_err(Self::map_repository_error)?;
        info!(%id, %original, discounted = %saved.price(), "applied discount");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCourseRepository;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn draft(name: &str, price: Decimal) -> CourseDraft {
        CourseDraft::new(name, price, None).expect("valid draft")
    }

    fn stored(id: i64, name: &str, price: Decimal) -> Course {
        Course::from_draft(draft(name, price)).with_id(CourseId::new(id))
    }

    fn service(repository: MockCourseRepository) -> CourseCatalogService<MockCourseRepository> {
        CourseCatalogService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn create_delegates_to_save_and_returns_assigned_id() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_save()
            .withf(|course: &Course| course.id().is_none())
            .times(1)
            .return_once(|course| Ok(course.clone().with_id(CourseId::new(1))));

        let created = service(repository)
            .create_course(draft("Rust Fundamentals", dec!(299.99)))
            .await
            .expect("create succeeds");
        assert_eq!(created.id(), Some(CourseId::new(1)));
        assert_eq!(created.price(), dec!(299.99));
    }

    #[tokio::test]
    async fn update_on_missing_id_fails_without_saving() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        repository.expect_save().times(0);

        let err = service(repository)
            .update_course(CourseId::new(42), draft("Advanced Rust", dec!(100)))
            .await
            .expect_err("missing id");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("42"));
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(stored(5, "Old name", dec!(50)))));
        repository
            .expect_save()
            .withf(|course: &Course| {
                course.id() == Some(CourseId::new(5)) && course.name() == "New name"
            })
            .times(1)
            .return_once(|course| Ok(course.clone()));

        let updated = service(repository)
            .update_course(CourseId::new(5), draft("New name", dec!(75)))
            .await
            .expect("update succeeds");
        assert_eq!(updated.id(), Some(CourseId::new(5)));
        assert_eq!(updated.price(), dec!(75));
    }

    #[tokio::test]
    async fn delete_reports_absence_as_false() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_delete_by_id()
            .times(1)
            .return_once(|_| Ok(false));

        let removed = service(repository)
            .delete_course(CourseId::new(9))
            .await
            .expect("delete succeeds");
        assert!(!removed);
    }

    #[tokio::test]
    async fn discount_persists_exact_result() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(stored(3, "Rust Fundamentals", dec!(1000)))));
        repository
            .expect_save()
            .withf(|course: &Course| course.price() == dec!(900))
            .times(1)
            .return_once(|course| Ok(course.clone()));

        let discounted = service(repository)
            .apply_discount(CourseId::new(3), dec!(10))
            .await
            .expect("discount succeeds");
        assert_eq!(discounted.price(), dec!(900));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(150))]
    #[tokio::test]
    async fn discount_rejects_out_of_range_without_saving(#[case] percentage: Decimal) {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(stored(3, "Rust Fundamentals", dec!(500)))));
        repository.expect_save().times(0);

        let err = service(repository)
            .apply_discount(CourseId::new(3), percentage)
            .await
            .expect_err("out of range");
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn discount_on_missing_id_fails_with_not_found() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let err = service(repository)
            .apply_discount(CourseId::new(8), dec!(10))
            .await
            .expect_err("missing id");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_applies_name_filter_through_the_repository() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_name_containing()
            .withf(|needle: &str| needle == "rust")
            .times(1)
            .return_once(|_| {
                Ok(vec![
                    stored(1, "Rust Fundamentals", dec!(100)),
                    stored(2, "Advanced Rust", dec!(2000)),
                ])
            });

        let filter = CourseFilter {
            name: Some("rust".to_owned()),
            min_price: None,
            max_price: Some(dec!(500)),
        };
        let courses = service(repository)
            .list_courses(filter)
            .await
            .expect("list succeeds");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name(), "Rust Fundamentals");
    }

    #[tokio::test]
    async fn list_uses_price_range_helper_when_only_bounds_given() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_by_price_between()
            .withf(|min: &Decimal, max: &Decimal| *min == dec!(100) && *max == Decimal::MAX)
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));

        let filter = CourseFilter {
            name: None,
            min_price: Some(dec!(100)),
            max_price: None,
        };
        service(repository)
            .list_courses(filter)
            .await
            .expect("list succeeds");
    }

    #[tokio::test]
    async fn repository_failures_surface_as_internal_errors() {
        let mut repository = MockCourseRepository::new();
        repository
            .expect_find_all()
            .times(1)
            .return_once(|| Err(CourseRepositoryError::query("mutex poisoned")));

        let err = service(repository)
            .list_courses(CourseFilter::default())
            .await
            .expect_err("repository failure");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(err.message.contains("mutex poisoned"));
    }
}

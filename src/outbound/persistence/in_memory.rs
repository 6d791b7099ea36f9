//! In-memory course repository, the reference adapter.
//!
//! Backed by an ordered `Vec` and a monotonic id counter behind one mutex,
//! so concurrent mutations serialize and readers never observe a
//! half-applied change. State does not survive process restart; durable
//! backends implement the same port elsewhere.

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId};

#[derive(Debug, Default)]
struct Store {
    courses: Vec<Course>,
    next_id: i64,
}

impl Store {
    fn allocate_id(&mut self) -> CourseId {
        self.next_id += 1;
        CourseId::new(self.next_id)
    }

    fn position(&self, id: CourseId) -> Option<usize> {
        self.courses.iter().position(|course| course.id() == Some(id))
    }
}

/// Course repository holding all records in process memory.
///
/// # Examples
/// ```
/// use course_catalog::outbound::persistence::InMemoryCourseRepository;
///
/// let repository = InMemoryCourseRepository::new();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    inner: Mutex<Store>,
}

impl InMemoryCourseRepository {
    /// Create an empty repository with the id sequence at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Store>, CourseRepositoryError> {
        self.inner
            .lock()
            .map_err(|_| CourseRepositoryError::query("course store mutex poisoned"))
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn save(&self, course: &Course) -> Result<Course, CourseRepositoryError> {
        let mut store = self.lock()?;
        let persisted = match course.id() {
            None => {
                let id = store.allocate_id();
                let persisted = course.clone().with_id(id);
                store.courses.push(persisted.clone());
                debug!(%id, "inserted course");
                persisted
            }
            Some(id) => {
                let persisted = course.clone();
                if let Some(index) = store.position(id) {
                    // Replace in place so find_all order stays stable.
                    store.courses[index] = persisted.clone();
                    debug!(%id, "replaced course");
                } else {
                    // Upsert under a caller-provided id; keep the sequence
                    // ahead of it so the id is never handed out again.
                    store.next_id = store.next_id.max(id.get());
                    store.courses.push(persisted.clone());
                    debug!(%id, "inserted course under explicit id");
                }
                persisted
            }
        };
        Ok(persisted)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .courses
            .iter()
            .find(|course| course.id() == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let store = self.lock()?;
        Ok(store.courses.clone())
    }

    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let store = self.lock()?;
        Ok(store.position(id).is_some())
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut store = self.lock()?;
        match store.position(id) {
            Some(index) => {
                store.courses.remove(index);
                debug!(%id, "deleted course");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_name_containing(
        &self,
        needle: &str,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let needle = needle.to_lowercase();
        let store = self.lock()?;
        Ok(store
            .courses
            .iter()
            .filter(|course| course.name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .courses
            .iter()
            .filter(|course| course.price() >= min && course.price() <= max)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, CourseRepositoryError> {
        let store = self.lock()?;
        Ok(store.courses.len() as u64)
    }
}

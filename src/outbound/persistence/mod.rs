//! Storage adapters for the course repository port.

mod in_memory;

pub use in_memory::InMemoryCourseRepository;

//! Course entity and its validation rules.
//!
//! `CourseDraft` is the only way to introduce course field data into the
//! domain: construction runs every constraint and collects all violations, so
//! no partially valid state ever reaches a service or repository. `Course`
//! adds the repository-assigned identifier and the one embedded business
//! rule, discount application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest accepted course name, in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Longest accepted course name, in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Longest accepted description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Repository-assigned course identifier.
///
/// Unset on freshly drafted courses; the repository assigns a value on first
/// save and never reuses it within a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(i64);

impl CourseId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single field constraint violation found while validating course input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseFieldError {
    /// Name is empty or whitespace only.
    #[error("course name must not be blank")]
    NameBlank,
    /// Name is outside the accepted length range.
    #[error("course name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters")]
    NameLength { chars: usize },
    /// Price is zero or negative.
    #[error("course price must be greater than 0")]
    PriceNotPositive { price: Decimal },
    /// Price carries more than two fractional digits.
    #[error("course price must have at most 2 decimal places")]
    PriceScale { price: Decimal },
    /// Description exceeds the accepted length.
    #[error("course description must not exceed {DESCRIPTION_MAX_CHARS} characters")]
    DescriptionTooLong { chars: usize },
}

impl CourseFieldError {
    /// Wire-level name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameBlank | Self::NameLength { .. } => "name",
            Self::PriceNotPositive { .. } | Self::PriceScale { .. } => "price",
            Self::DescriptionTooLong { .. } => "description",
        }
    }
}

/// All constraint violations found in one validation pass.
///
/// Every constraint is checked before this error is produced; callers can
/// rely on the list being complete rather than stopping at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", joined_messages(.0))]
pub struct CourseValidationError(Vec<CourseFieldError>);

fn joined_messages(errors: &[CourseFieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CourseValidationError {
    /// Individual field violations, in field order.
    pub fn errors(&self) -> &[CourseFieldError] {
        &self.0
    }
}

/// Validated course field set without an identifier.
///
/// # Examples
/// ```
/// use course_catalog::domain::CourseDraft;
/// use rust_decimal::Decimal;
///
/// let draft = CourseDraft::new(
///     "Rust Fundamentals",
///     Decimal::new(29_999, 2),
///     Some("Learn Rust from scratch".to_owned()),
/// );
/// assert!(draft.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    name: String,
    price: Decimal,
    description: Option<String>,
}

impl CourseDraft {
    /// Validate course input, collecting every violation.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        description: Option<String>,
    ) -> Result<Self, CourseValidationError> {
        let name = name.into();
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(CourseFieldError::NameBlank);
        } else {
            let chars = name.chars().count();
            if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
                errors.push(CourseFieldError::NameLength { chars });
            }
        }

        if price <= Decimal::ZERO {
            errors.push(CourseFieldError::PriceNotPositive { price });
        }
        if price.normalize().scale() > 2 {
            errors.push(CourseFieldError::PriceScale { price });
        }

        if let Some(description) = &description {
            let chars = description.chars().count();
            if chars > DESCRIPTION_MAX_CHARS {
                errors.push(CourseFieldError::DescriptionTooLong { chars });
            }
        }

        if errors.is_empty() {
            Ok(Self {
                name,
                price,
                description,
            })
        } else {
            Err(CourseValidationError(errors))
        }
    }

    /// Validated course name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated price.
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Validated optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Discount percentages must fall in the half-open range `(0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("discount percentage must be greater than 0 and at most 100, got {percentage}")]
pub struct InvalidDiscountError {
    /// The rejected percentage.
    pub percentage: Decimal,
}

/// Course record managed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: Option<CourseId>,
    name: String,
    price: Decimal,
    description: Option<String>,
}

impl Course {
    /// Build an unsaved course from a validated draft. The id stays unset
    /// until the repository assigns one.
    pub fn from_draft(draft: CourseDraft) -> Self {
        let CourseDraft {
            name,
            price,
            description,
        } = draft;
        Self {
            id: None,
            name,
            price,
            description,
        }
    }

    /// Rebuild a persisted course under its stored identifier.
    pub fn with_id(mut self, id: CourseId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace name, price, and description from a validated draft.
    /// The identifier is never touched.
    pub fn replace_fields(&mut self, draft: CourseDraft) {
        let CourseDraft {
            name,
            price,
            description,
        } = draft;
        self.name = name;
        self.price = price;
        self.description = description;
    }

    /// Repository-assigned identifier, if the course has been saved.
    pub const fn id(&self) -> Option<CourseId> {
        self.id
    }

    /// Course name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current price.
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the course costs strictly more than 1000.
    ///
    /// Recomputed on every call; a price of exactly 1000 is not expensive.
    pub fn is_expensive(&self) -> bool {
        self.price > Decimal::ONE_THOUSAND
    }

    /// Reduce the price by a percentage in `(0, 100]`.
    ///
    /// Out-of-range percentages are rejected and leave the price unchanged.
    /// The arithmetic is exact: a 10% discount on 1000 yields exactly 900.
    pub fn apply_discount(&mut self, percentage: Decimal) -> Result<(), InvalidDiscountError> {
        if percentage <= Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(InvalidDiscountError { percentage });
        }
        let discount = self.price * percentage / Decimal::ONE_HUNDRED;
        self.price -= discount;
        Ok(())
    }
}

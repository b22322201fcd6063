use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::LessonId;

/// Rejected cart operation. Every variant guarantees that neither the catalog
/// nor the cart changed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum CartError {
    #[error("lesson {lesson_id} is not in the catalog")]
    UnknownLesson { lesson_id: LessonId },
    #[error("lesson {lesson_id} has no spaces left")]
    SoldOut { lesson_id: LessonId },
    #[error("cart line {index} is out of range (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("lesson ids must be positive")]
    ZeroId,
    #[error("duplicate lesson id {0}")]
    DuplicateId(LessonId),
    #[error("lesson {lesson_id} has invalid price {price}")]
    InvalidPrice { lesson_id: LessonId, price: f64 },
}

//! Process-local stores used when no database is configured.
//!
//! Each store keeps its records behind a single lock, so check-then-insert
//! sequences (duplicate emails) are atomic here.

use std::sync::PoisonError;

use crate::domain::error::DomainError;

pub(crate) mod post_repository;
pub(crate) mod user_repository;

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Unexpected("in-memory store lock poisoned".to_string())
}

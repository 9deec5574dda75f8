//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps to
//! `DomainError` via `From<DbErr>`.

pub mod categories_sea;
pub mod ingredients_sea;
pub mod recipes_sea;
pub mod stores_sea;
pub mod users_sea;

/// Result of an insert guarded by `ON CONFLICT DO NOTHING` on the natural key.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    Created(T),
    Conflict,
}

impl<T> InsertOutcome<T> {
    pub fn created(self) -> Option<T> {
        match self {
            InsertOutcome::Created(v) => Some(v),
            InsertOutcome::Conflict => None,
        }
    }
}

//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert here, and higher layers
//! map `DomainError` to `AppError` via `From`. Repos pre-check natural keys,
//! so the unique-violation arms are a backstop for concurrent writers.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, EntityKind, InfraErrorKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let idx = error_msg.find("UNIQUE constraint failed: ")?;
    let rest = &error_msg[idx + "UNIQUE constraint failed: ".len()..];
    rest.split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .next()
        .filter(|s| !s.is_empty())
}

fn unique_conflict_for(target: &str) -> Option<(ConflictKind, &'static str)> {
    let rules: &[(&[&str], ConflictKind, &'static str)] = &[
        (
            &["users.username", "users_username_key"],
            ConflictKind::UniqueUsername,
            "Username already exists.",
        ),
        (
            &["users.email", "users_email_key"],
            ConflictKind::UniqueEmail,
            "Email is already associated with another user.",
        ),
        (
            &["categories.name", "categories_name_key"],
            ConflictKind::UniqueName(EntityKind::Category),
            "Category name already exists.",
        ),
        (
            &["ingredients.name", "ingredients_name_key"],
            ConflictKind::UniqueName(EntityKind::Ingredient),
            "Ingredient name already exists.",
        ),
        (
            &["recipes.name", "recipes_name_key"],
            ConflictKind::UniqueName(EntityKind::Recipe),
            "Recipe name already exists.",
        ),
        (
            &["stores.name", "stores_name_key"],
            ConflictKind::UniqueName(EntityKind::Store),
            "Store name already exists.",
        ),
    ];

    rules
        .iter()
        .find(|(needles, _, _)| needles.iter().any(|n| target.contains(n)))
        .map(|(_, kind, detail)| (kind.clone(), *detail))
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::RecordNotFound(detail) => {
            warn!(trace_id = %trace_id, detail = %detail, "Record vanished mid-operation");
            return DomainError::infra(
                InfraErrorKind::Other("RecordNotFound".into()),
                "Record not found",
            );
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        let target = extract_sqlite_table_column(&error_msg).unwrap_or(&error_msg);
        if let Some((kind, detail)) = unique_conflict_for(target) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Referenced record does not exist.");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("Value out of allowed range.");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

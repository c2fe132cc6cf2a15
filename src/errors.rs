use miette::Diagnostic;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("Database error: {0}")]
    #[diagnostic(code(demographics::db))]
    Db(#[from] DbErr),

    #[error("Duplicate key: {0}")]
    #[diagnostic(code(demographics::duplicate))]
    Duplicate(String),

    #[error("Unknown customer demographic: {0}")]
    #[diagnostic(code(demographics::missing_demographic))]
    MissingDemographic(String),

    #[error("Customer demographic {customer_type_id} is still linked to {links} customer(s)")]
    #[diagnostic(
        code(demographics::still_referenced),
        help("unlink the customers first or delete with the cascade policy")
    )]
    StillReferenced { customer_type_id: String, links: u64 },

    #[error("Not found: {0}")]
    #[diagnostic(code(demographics::not_found))]
    NotFound(String),
}

impl StoreError {
    /// Classify a store failure raised while writing the row keyed by `key`.
    ///
    /// Check constraint and truncation failures have no portable code and stay
    /// plain `Db` errors.
    pub(crate) fn from_write(err: DbErr, key: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate(key.to_string()),
            _ => StoreError::Db(err),
        }
    }
}

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Map a driver error, surfacing unique-constraint violations as `Conflict`.
    pub fn from_db(err: DbErr, conflict_msg: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::Conflict(conflict_msg.to_string()),
            _ => ModelError::Db(err.to_string()),
        }
    }
}

impl ModelError {
    /// Map an insert error for a child row: a foreign-key violation means the
    /// parent vanished after it was checked.
    pub fn from_insert(err: DbErr, conflict_msg: &str, parent: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ModelError::NotFound(format!("{} not found", parent)),
            _ => Self::from_db(err, conflict_msg),
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        ModelError::Db(err.to_string())
    }
}

/// Titles are required on every catalog entity.
pub fn validate_title(title: &str) -> Result<(), ModelError> {
    if title.trim().is_empty() {
        return Err(ModelError::Validation("title required".into()));
    }
    if title.chars().count() > 255 {
        return Err(ModelError::Validation("title longer than 255 characters".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_are_rejected() {
        assert!(matches!(validate_title("   "), Err(ModelError::Validation(_))));
        assert!(validate_title("Lunch").is_ok());
        assert!(validate_title(&"x".repeat(256)).is_err());
    }

    #[test]
    fn non_unique_driver_errors_stay_db() {
        let e = ModelError::from_db(DbErr::Custom("boom".into()), "menu title already exists");
        assert!(matches!(e, ModelError::Db(_)));
        let e = ModelError::from_insert(DbErr::Custom("boom".into()), "dup", "menu");
        assert!(matches!(e, ModelError::Db(_)));
    }
}

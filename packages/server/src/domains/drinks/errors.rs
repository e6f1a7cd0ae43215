use thiserror::Error;

/// Failures from drink persistence
#[derive(Error, Debug)]
pub enum DrinkError {
    #[error("Drink {0} not found")]
    NotFound(i32),

    /// Unique title, length limit or NOT NULL violated
    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Invalid recipe: {0}")]
    Recipe(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// SQLSTATE for a value too long for its column
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

impl From<sqlx::Error> for DrinkError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let is_constraint = matches!(
                db.kind(),
                sqlx::error::ErrorKind::UniqueViolation
                    | sqlx::error::ErrorKind::NotNullViolation
                    | sqlx::error::ErrorKind::CheckViolation
            ) || db.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION);

            if is_constraint {
                return DrinkError::Constraint(db.message().to_string());
            }
        }
        DrinkError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_database() {
        let err = DrinkError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DrinkError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn test_row_not_found_is_not_a_constraint() {
        let err = DrinkError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DrinkError::Database(_)));
    }
}

use sea_orm::{DbErr, SqlErr};

use blog_core::RepoError;

/// Translate a SeaORM error into the storage port's error type.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(sql_err) = err.sql_err() {
        return match sql_err {
            SqlErr::UniqueConstraintViolation(msg) => RepoError::Constraint(msg),
            SqlErr::ForeignKeyConstraintViolation(msg) => RepoError::Constraint(msg),
            _ => RepoError::Query(err.to_string()),
        };
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

pub mod submission;
pub mod team;

use std::error::Error;

use async_trait::async_trait;
pub use sea_orm::{
    sea_query, ActiveValue, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    QueryOrder, QuerySelect, StatementBuilder, TransactionError, TransactionTrait,
};
use sea_orm::{QueryTrait, RuntimeErr, SqlxError};
pub use time::PrimitiveDateTime;

/// PostgreSQL `unique_violation` error code.
const POSTGRES_UNIQUE_VIOLATION: &str = "23505";

/// SQLite `SQLITE_CONSTRAINT_UNIQUE` extended error code.
const SQLITE_UNIQUE_VIOLATION: &str = "2067";

/// SQLite `SQLITE_CONSTRAINT_PRIMARYKEY` extended error code.
const SQLITE_PRIMARY_KEY_VIOLATION: &str = "1555";

pub trait TransactionErrorExt<T, E> {
    /// Convert transaction [`Result`] into a [`Result`] with
    /// a custom error.
    fn into_raw_result(self) -> Result<T, E>;
}

impl<T, E> TransactionErrorExt<T, E> for Result<T, TransactionError<E>>
where
    E: Error + From<DbErr>,
{
    fn into_raw_result(self) -> Result<T, E> {
        match self {
            Ok(val) => Ok(val),
            Err(TransactionError::Connection(err)) => Err(err.into()),
            Err(TransactionError::Transaction(err)) => Err(err),
        }
    }
}

#[async_trait]
pub trait SelectExt {
    /// Check if at least one record that satisfies a query.
    async fn exists<C: ConnectionTrait + Send>(self, db: &C) -> Result<bool, DbErr>;
}

#[async_trait]
impl<T> SelectExt for T
where
    T: QueryTrait<QueryStatement = sea_query::SelectStatement> + Send,
{
    async fn exists<C: ConnectionTrait + Send>(self, db: &C) -> Result<bool, DbErr> {
        use sea_query::{Expr, Query};

        let mut query = self.into_query();

        // Fix failing tests with SQLite by returning at least some expr
        query.expr(1);

        let stmt = StatementBuilder::build(
            Query::select().expr(Expr::exists(query)),
            &db.get_database_backend(),
        );

        db.query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(String::from("EXISTS query returned no rows")))?
            .try_get_by_index(0)
    }
}

pub trait DbErrExt {
    /// Check if the error was caused by a unique constraint violation.
    fn is_unique_violation(&self) -> bool;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        let (DbErr::Exec(RuntimeErr::SqlxError(err)) | DbErr::Query(RuntimeErr::SqlxError(err))) =
            self
        else {
            return false;
        };

        let SqlxError::Database(err) = err else {
            return false;
        };

        matches!(
            err.code().as_deref(),
            Some(POSTGRES_UNIQUE_VIOLATION | SQLITE_UNIQUE_VIOLATION | SQLITE_PRIMARY_KEY_VIOLATION)
        )
    }
}

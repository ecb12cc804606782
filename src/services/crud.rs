//! Lookups shared by every entity service.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PrimaryKeyTrait,
    TransactionTrait,
};

use crate::{
    error::{AppError, AppResult},
    response::Deleted,
};

/// Statement that touches no rows but still takes SQLite's write lock.
const WRITE_LOCK_SQL: &str = "UPDATE order_statuses SET id = id WHERE 0";

/// Open a transaction that holds the write lock before its first read, so
/// concurrent writers wait on the busy timeout instead of failing with
/// `SQLITE_BUSY` when a read transaction is upgraded.
pub async fn begin_write(conn: &DatabaseConnection) -> AppResult<DatabaseTransaction> {
    let txn = conn.begin().await?;
    txn.execute_unprepared(WRITE_LOCK_SQL).await?;
    Ok(txn)
}

/// Fetch a row by primary key, or `NotFound` naming `label` and `id`.
pub async fn find_or_404<E, C>(conn: &C, label: &str, id: i32) -> AppResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    match E::find_by_id(id).one(conn).await? {
        Some(model) => Ok(model),
        None => {
            tracing::warn!(entity = label, id, "row not found");
            Err(AppError::not_found(label, id))
        }
    }
}

/// Delete by primary key. Absent rows are not an error; the count is zero.
pub async fn delete_by_id<E, C>(conn: &C, label: &str, id: i32) -> AppResult<Deleted>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id).exec(conn).await?;
    tracing::info!(entity = label, id, deleted = result.rows_affected, "delete");
    Ok(Deleted {
        deleted: result.rows_affected,
    })
}

//! Table-backed repository shared by both stat kinds

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use super::tables::StatTable;
use super::traits::{RecordSink, Repository};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{InsertOutcome, Persisted};

/// SQL for one table, built once from its column list
#[derive(Debug)]
struct Statements {
    select_all: String,
    select_by_id: String,
    insert: String,
    update: String,
    delete: String,
    count: String,
}

impl Statements {
    fn for_table<T: StatTable>() -> Self {
        let table = T::KIND.table();
        let columns = T::COLUMNS.join(", ");
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            select_all: format!("SELECT player_id, {columns} FROM {table} ORDER BY player_id"),
            select_by_id: format!("SELECT player_id, {columns} FROM {table} WHERE player_id = ?"),
            insert: format!(
                "INSERT INTO {table} ({columns}) VALUES ({placeholders}) \
                 ON CONFLICT (name, team) DO NOTHING"
            ),
            update: format!("UPDATE {table} SET {assignments} WHERE player_id = ?"),
            delete: format!("DELETE FROM {table} WHERE player_id = ?"),
            count: format!("SELECT COUNT(*) FROM {table}"),
        }
    }
}

/// Repository over the table holding records of type `T`
pub struct StatRepository<T> {
    pool: Pool<Sqlite>,
    statements: Arc<Statements>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for StatRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            statements: Arc::clone(&self.statements),
            _record: PhantomData,
        }
    }
}

impl<T: StatTable> StatRepository<T> {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            pool,
            statements: Arc::new(Statements::for_table::<T>()),
            _record: PhantomData,
        }
    }

    fn not_found(id: i64) -> RepositoryError {
        RepositoryError::record_not_found(T::KIND.table(), "player_id", id.to_string())
    }
}

#[async_trait]
impl<T: StatTable> Repository<Persisted<T>, i64> for StatRepository<T> {
    type CreateRequest = T;
    type UpdateRequest = T;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Persisted<T>>> {
        let sql = self.statements.select_by_id.as_str();
        sqlx::query_as::<_, Persisted<T>>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(sql, e))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Persisted<T>>> {
        let sql = self.statements.select_all.as_str();
        sqlx::query_as::<_, Persisted<T>>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(sql, e))
    }

    async fn create(&self, request: &T) -> RepositoryResult<InsertOutcome> {
        self.insert(request).await
    }

    async fn update(&self, id: i64, request: &T) -> RepositoryResult<Persisted<T>> {
        let sql = self.statements.update.as_str();
        let result = request
            .bind_columns(sqlx::query(sql))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(sql, e))?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        debug!("Updated {} {} ({})", T::KIND.noun(), id, request.name());

        Ok(Persisted {
            id,
            record: request.clone(),
        })
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let sql = self.statements.delete.as_str();
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(sql, e))?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let sql = self.statements.count.as_str();
        let count: i64 = sqlx::query_scalar(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(sql, e))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl<T: StatTable> RecordSink<T> for StatRepository<T> {
    async fn insert(&self, record: &T) -> RepositoryResult<InsertOutcome> {
        let sql = self.statements.insert.as_str();
        let result = record
            .bind_columns(sqlx::query(sql))
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(sql, e))?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::Ignored)
        } else {
            Ok(InsertOutcome::Inserted(result.last_insert_rowid()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PitcherRecord;

    #[test]
    fn statements_follow_column_order() {
        let statements = Statements::for_table::<PitcherRecord>();

        assert!(statements
            .insert
            .starts_with("INSERT INTO pitchers (name, team, w, l, sv, g, gs, ip,"));
        assert_eq!(statements.insert.matches('?').count(), 21);
        assert!(statements.insert.ends_with("ON CONFLICT (name, team) DO NOTHING"));
        assert!(statements
            .update
            .starts_with("UPDATE pitchers SET name = ?, team = ?, w = ?"));
        assert_eq!(statements.update.matches('?').count(), 22);
        assert_eq!(
            statements.select_all,
            format!(
                "SELECT player_id, {} FROM pitchers ORDER BY player_id",
                PitcherRecord::COLUMNS.join(", ")
            )
        );
    }
}

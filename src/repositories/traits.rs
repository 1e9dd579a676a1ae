//! Repository trait definitions
//!
//! This module defines the traits the stat repositories implement, giving
//! handlers and the import pipeline one consistent interface to the store.

use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::models::InsertOutcome;

/// Core repository trait providing CRUD operations
///
/// # Type Parameters
///
/// * `T` - The persisted entity type (e.g. `PositionPlayer`)
/// * `ID` - The identifier type (the table's integer `player_id`)
///
/// # Examples
///
/// ```rust,ignore
/// use baseball_stats::repositories::Repository;
///
/// async fn example<R: Repository<PositionPlayer, i64>>(repo: R) -> RepositoryResult<()> {
///     let player = repo.find_by_id(1).await?;
///     repo.delete(1).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Repository<T, ID: Send + 'static>: Send + Sync {
    /// Request type for creating new entities
    type CreateRequest: Send + Sync;
    /// Request type for updating existing entities
    type UpdateRequest: Send + Sync;

    /// Find an entity by its ID
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - Entity found
    /// * `Ok(None)` - Entity not found
    /// * `Err(RepositoryError)` - Database or other error
    async fn find_by_id(&self, id: ID) -> RepositoryResult<Option<T>>;

    /// List every entity, ordered by ID
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    /// Create a new entity
    ///
    /// A request that collides with an existing `(name, team)` returns
    /// `Ok(InsertOutcome::Ignored)` and leaves the stored row unchanged.
    async fn create(&self, request: &Self::CreateRequest) -> RepositoryResult<InsertOutcome>;

    /// Replace every column of an existing entity
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - Updated entity
    /// * `Err(RepositoryError::RecordNotFound)` - No entity with this ID
    /// * `Err(RepositoryError::ConstraintViolation)` - Update collides with another row
    async fn update(&self, id: ID, request: &Self::UpdateRequest) -> RepositoryResult<T>;

    /// Delete an entity by ID
    async fn delete(&self, id: ID) -> RepositoryResult<()>;

    /// Count stored entities
    async fn count(&self) -> RepositoryResult<u64>;

    /// Check if an entity exists by ID
    async fn exists(&self, id: ID) -> RepositoryResult<bool> {
        match self.find_by_id(id).await? {
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }
}

/// Single-record insert capability used by the import pipeline
///
/// Implementations must treat a `(name, team)` conflict as a successful no-op.
#[async_trait]
pub trait RecordSink<T: Sync>: Send + Sync {
    async fn insert(&self, record: &T) -> RepositoryResult<InsertOutcome>;
}

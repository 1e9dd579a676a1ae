//! Repository pattern implementation for data access
//!
//! One generic [`StatRepository`] serves both stat tables. It implements
//! the CRUD [`Repository`] trait used by the HTTP handlers and the
//! [`RecordSink`] trait used by the import pipeline; [`StatTable`] supplies
//! each record's column mapping.
//!
//! # Usage
//!
//! ```rust,ignore
//! use baseball_stats::repositories::{PitcherRepository, Repository};
//!
//! async fn example(repo: PitcherRepository) -> RepositoryResult<()> {
//!     let pitcher = repo.find_by_id(1).await?;
//!     // ... use pitcher
//!     Ok(())
//! }
//! ```

pub mod stat_repository;
pub mod tables;
pub mod traits;

pub use stat_repository::StatRepository;
pub use tables::StatTable;
pub use traits::*;

use crate::models::{PitcherRecord, PositionPlayerRecord};

pub type PositionPlayerRepository = StatRepository<PositionPlayerRecord>;
pub type PitcherRepository = StatRepository<PitcherRecord>;

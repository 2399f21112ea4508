//! # Store
//!
//! The persistence seam of Switcharoo: a [`FlagStore`] contract describing a transactional
//! store with unique indexes, parent references and conditional updates, plus
//! [`MemoryStore`], a concurrent in-memory engine implementing it.
//!
//! Engines expose repository-style queries only. Each call names exactly the rows it
//! needs (e.g. "binding by feature id and environment id"), runs as one atomic step, and
//! reports anticipated constraint violations as typed [`StoreError`] variants.
//!
//! ## Example
//!
//! ```rust
//! use switcharoo_store::{FlagStore, MemoryStore, StoreError};
//! use switcharoo_domain::OwnerId;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), StoreError> {
//! let store = MemoryStore::default();
//! let owner = OwnerId::new();
//!
//! store.insert_owner(owner).await?;
//! assert!(store.owner_exists(owner).await?);
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod records;
mod store;

pub use crate::error::{StoreError, StoreErrorExt};
pub use crate::memory::{MemoryStore, MemoryStoreInner, TableCounts};
pub use crate::records::{
    BindingRecord, BoundEnvironment, CasOutcome, EnvironmentRecord, FeatureRecord, Index, Table,
};
pub use crate::store::FlagStore;

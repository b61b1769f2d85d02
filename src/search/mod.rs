//! Free-text search over entities, kept in an index separate from the
//! primary collections. Saving an entity indexes it and deleting it removes
//! it again; searching never touches the primary collections.

use std::{ops::Deref, sync::Arc};

use crate::error::Result;
use crate::model::{
    pagination::{Page, Pageable},
    EntityId,
};

#[cfg(test)]
pub mod memory;
mod mongo;

pub use mongo::MongoSearchRepository;

#[rocket::async_trait]
pub trait SearchRepository<T>: Send + Sync {
    /// Add `entity` to the index, replacing any previous version.
    async fn index(&self, entity: &T) -> Result<()>;

    /// Drop the entity with the given ID from the index, if present.
    async fn remove(&self, id: EntityId) -> Result<()>;

    /// Find the requested page of entities matching `query`.
    /// A blank query matches everything.
    async fn search(&self, query: &str, pageable: &Pageable) -> Result<Page<T>>;
}

/// The search repository for `T`, held in managed state.
pub struct SearchIndex<T>(Arc<dyn SearchRepository<T>>);

impl<T> SearchIndex<T> {
    pub fn new(repository: impl SearchRepository<T> + 'static) -> Self {
        Self(Arc::new(repository))
    }
}

impl<T> Clone for SearchIndex<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for SearchIndex<T> {
    type Target = dyn SearchRepository<T>;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

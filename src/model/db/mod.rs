//! Entities in their persisted form.

use std::fmt::Debug;

use mongodb::Database;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    mongodb::{id_filter, Coll, MongoCollection},
    EntityId, Identified,
};

mod answer;
mod question;
mod section;

pub use answer::Answer;
pub use question::Question;
pub use section::Section;

/// An entity stored in its own collection with a server-assigned ID.
#[rocket::async_trait]
pub trait Entity:
    MongoCollection
    + Identified
    + Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + Unpin
    + Send
    + Sync
    + 'static
{
    /// Name used in alert headers and error reports.
    const ENTITY_NAME: &'static str;

    fn assign_id(&mut self, id: EntityId);

    /// The text that free-text search matches against.
    fn search_text(&self) -> Option<&str>;

    /// Map a client-facing sort property to the stored field, or `None` if
    /// the entity cannot be sorted by it.
    fn sort_field(property: &str) -> Option<&'static str>;

    /// Fail if a relationship stub refers to an entity that does not exist.
    async fn check_references(&self, _db: &Database) -> Result<()> {
        Ok(())
    }

    /// Replace relationship stubs read back from storage with the full
    /// related entities. Stubs whose target no longer exists are cut back to
    /// just the ID.
    async fn resolve(_db: &Database, entities: Vec<Self>) -> Result<Vec<Self>> {
        Ok(entities)
    }
}

/// Reject a reference from a `referrer` to the `T` with the given ID if
/// there is no such `T`.
pub(crate) async fn ensure_exists<T: Entity>(
    db: &Database,
    id: EntityId,
    referrer: &'static str,
) -> Result<()> {
    let found = Coll::<T>::from_db(db)
        .count_documents(id_filter(id), None)
        .await?;
    if found == 0 {
        return Err(Error::bad_request_alert(
            format!("No {} with ID {}", T::ENTITY_NAME, id),
            referrer,
            "idnotfound",
        ));
    }
    Ok(())
}

use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use rocket::http::Status;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{mongodb::Coll, EntityId};

/// A counter object used to implement auto-increment IDs, one per
/// entity collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    /// Name of the sequence, which is the name of the collection it numbers.
    #[serde(rename = "_id")]
    pub name: String,
    /// The last value handed out.
    pub value: EntityId,
}

impl Counter {
    /// Atomically retrieve the next value of the named sequence.
    ///
    /// The sequence is created on first use, so the first value is 1.
    pub async fn next(counters: &Coll<Counter>, name: &str) -> Result<EntityId> {
        let update = doc! {
            "$inc": { "value": 1_i64 }
        };
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        let counter = counters
            .find_one_and_update(doc! { "_id": name }, update, options)
            .await?
            .ok_or_else(|| {
                Error::Status(
                    Status::InternalServerError,
                    format!("Failed to advance sequence {name}"),
                )
            })?;
        Ok(counter.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[backend_test]
    async fn sequence_starts_at_one_and_increments(counters: Coll<Counter>) {
        assert_eq!(Counter::next(&counters, "sections").await.unwrap(), 1);
        assert_eq!(Counter::next(&counters, "sections").await.unwrap(), 2);

        // Sequences are independent.
        assert_eq!(Counter::next(&counters, "questions").await.unwrap(), 1);

        let stored = counters
            .find_one(doc! { "_id": "sections" }, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.value, 2);
    }
}

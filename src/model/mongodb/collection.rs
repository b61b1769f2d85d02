use std::{collections::HashMap, ops::Deref};

use log::debug;
use mongodb::{
    bson::{doc, Document},
    error::Error as DbError,
    options::FindOptions,
    Collection, Database, IndexModel,
};
use rocket::futures::TryStreamExt;

use crate::error::Result;
use crate::model::{
    db::{Answer, Entity, Question, Section},
    pagination::{Page, Pageable},
    EntityId,
};

use super::counter::Counter;

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

impl<T> Coll<T>
where
    T: Entity,
{
    /// Fetch every entity whose ID is in `ids`, keyed by ID.
    /// Unknown IDs are silently absent from the result.
    pub async fn find_by_ids(
        &self,
        ids: impl IntoIterator<Item = EntityId>,
    ) -> Result<HashMap<EntityId, T>> {
        let mut ids = ids.into_iter().collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        ids.sort_unstable();
        ids.dedup();

        let found = self
            .find(doc! { "_id": { "$in": ids } }, None)
            .await?
            .try_collect::<Vec<T>>()
            .await?;
        Ok(found
            .into_iter()
            .filter_map(|entity| entity.id().map(|id| (id, entity)))
            .collect())
    }
}

/// Fetch the requested page of entities matching `filter`, along with the
/// total number of matches.
pub async fn find_page<T: Entity>(
    collection: &Collection<T>,
    filter: Document,
    pageable: &Pageable,
) -> Result<Page<T>> {
    let options = FindOptions::builder()
        .skip(pageable.offset())
        .limit(i64::try_from(pageable.size()).unwrap_or(i64::MAX))
        .sort(pageable.sort_document::<T>()?)
        .build();
    let content = collection
        .find(filter.clone(), options)
        .await?
        .try_collect::<Vec<_>>()
        .await?;
    let total = collection.count_documents(filter, None).await?;
    Ok(Page::new(content, total, pageable))
}

// `Derive(Clone)` would only derive if `T: Clone`, but we don't need that bound.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MongoCollection for Section {
    const NAME: &'static str = "sections";
}

impl MongoCollection for Question {
    const NAME: &'static str = "questions";
}

impl MongoCollection for Answer {
    const NAME: &'static str = "answers";
}

impl MongoCollection for Counter {
    const NAME: &'static str = "counters";
}

/// Name of the collection holding the search index for `T`.
pub fn search_collection_name<T: MongoCollection>() -> String {
    format!("{}_search", T::NAME)
}

/// Ensure that all the required indexes exist on the given database.
///
/// This operation is idempotent.
pub async fn ensure_indexes_exist(db: &Database) -> std::result::Result<(), DbError> {
    debug!("Ensuring collection indexes exist");

    // Relationship lookups by stub ID.
    let question_section = IndexModel::builder()
        .keys(doc! {"section._id": 1})
        .build();
    Coll::<Question>::from_db(db)
        .create_index(question_section, None)
        .await?;

    let answer_question = IndexModel::builder()
        .keys(doc! {"question._id": 1})
        .build();
    Coll::<Answer>::from_db(db)
        .create_index(answer_question, None)
        .await?;

    // Free-text search indexes.
    ensure_text_index::<Section>(db).await?;
    ensure_text_index::<Question>(db).await?;
    ensure_text_index::<Answer>(db).await?;

    Ok(())
}

async fn ensure_text_index<T: MongoCollection>(db: &Database) -> std::result::Result<(), DbError> {
    let text_index = IndexModel::builder().keys(doc! {"text": "text"}).build();
    db.collection::<T>(&search_collection_name::<T>())
        .create_index(text_index, None)
        .await?;
    Ok(())
}

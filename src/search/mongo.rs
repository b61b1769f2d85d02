use mongodb::{bson::doc, options::ReplaceOptions, Collection, Database};
use rocket::http::Status;

use crate::error::{Error, Result};
use crate::model::{
    db::Entity,
    mongodb::{find_page, id_filter, search_collection_name},
    pagination::{Page, Pageable},
    EntityId,
};

use super::SearchRepository;

/// Search index kept in a `<collection>_search` collection with a text
/// index on `text`.
pub struct MongoSearchRepository<T> {
    index: Collection<T>,
}

impl<T: Entity> MongoSearchRepository<T> {
    pub fn from_db(db: &Database) -> Self {
        Self {
            index: db.collection(&search_collection_name::<T>()),
        }
    }
}

#[rocket::async_trait]
impl<T: Entity> SearchRepository<T> for MongoSearchRepository<T> {
    async fn index(&self, entity: &T) -> Result<()> {
        let id = entity.id().ok_or_else(|| {
            Error::Status(
                Status::InternalServerError,
                format!("Cannot index an unsaved {}", T::ENTITY_NAME),
            )
        })?;
        let upsert = ReplaceOptions::builder().upsert(true).build();
        self.index.replace_one(id_filter(id), entity, upsert).await?;
        Ok(())
    }

    async fn remove(&self, id: EntityId) -> Result<()> {
        self.index.delete_one(id_filter(id), None).await?;
        Ok(())
    }

    async fn search(&self, query: &str, pageable: &Pageable) -> Result<Page<T>> {
        let filter = if query.trim().is_empty() {
            doc! {}
        } else {
            doc! { "$text": { "$search": query } }
        };
        find_page(&self.index, filter, pageable).await
    }
}

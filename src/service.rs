//! Persistence, query and search operations over one entity type, in terms
//! of DTOs.

use std::fmt::Debug;

use log::{debug, error};
use mongodb::Database;
use rocket::{
    http::Status,
    request::{self, FromRequest, Request},
};

use crate::error::{Error, Result};
use crate::model::{
    criteria::Criteria,
    db::Entity,
    mapper::EntityMapper,
    mongodb::{find_page, id_filter, Coll, Counter},
    pagination::{Page, Pageable},
    EntityId,
};
use crate::search::SearchIndex;

pub struct EntityService<E> {
    db: Database,
    entities: Coll<E>,
    counters: Coll<Counter>,
    search: SearchIndex<E>,
}

impl<E> EntityService<E>
where
    E: EntityMapper,
{
    pub fn new(db: &Database, search: SearchIndex<E>) -> Self {
        Self {
            db: db.clone(),
            entities: Coll::from_db(db),
            counters: Coll::from_db(db),
            search,
        }
    }

    /// Insert the DTO if it has no ID, otherwise replace the stored entity
    /// with that ID. Either way the stored form is indexed for search.
    ///
    /// Replacing an ID that does not exist is a [`Error::NotFound`]; IDs are
    /// only ever assigned here. References to entities that do not exist
    /// are rejected before anything is written.
    pub async fn save(&self, dto: E::Dto) -> Result<E::Dto> {
        debug!("Request to save {} : {:?}", E::ENTITY_NAME, dto);
        let mut entity = E::to_entity(dto);
        entity.check_references(&self.db).await?;
        match entity.id() {
            None => {
                let id = Counter::next(&self.counters, E::NAME).await?;
                entity.assign_id(id);
                self.entities.insert_one(&entity, None).await?;
            }
            Some(id) => {
                let result = self
                    .entities
                    .replace_one(id_filter(id), &entity, None)
                    .await?;
                if result.matched_count == 0 {
                    return Err(Error::not_found(format!(
                        "{} with ID '{}'",
                        E::ENTITY_NAME,
                        id
                    )));
                }
            }
        }

        self.search.index(&entity).await?;
        Ok(self.resolve_one(entity).await?.to_dto())
    }

    pub async fn find_one(&self, id: EntityId) -> Result<Option<E::Dto>> {
        debug!("Request to get {} : {}", E::ENTITY_NAME, id);
        match self.entities.find_one(id_filter(id), None).await? {
            Some(entity) => Ok(Some(self.resolve_one(entity).await?.to_dto())),
            None => Ok(None),
        }
    }

    /// Delete the entity from storage and from the search index.
    /// Deleting an ID that does not exist is not an error.
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        debug!("Request to delete {} : {}", E::ENTITY_NAME, id);
        self.entities.delete_one(id_filter(id), None).await?;
        self.search.remove(id).await?;
        Ok(())
    }

    pub async fn find_by_criteria<C>(
        &self,
        criteria: &C,
        pageable: &Pageable,
    ) -> Result<Page<E::Dto>>
    where
        C: Criteria + Debug + Sync,
    {
        debug!(
            "Find {} by criteria : {:?}, page : {:?}",
            E::ENTITY_NAME,
            criteria,
            pageable
        );
        let page = find_page(&self.entities, criteria.to_filter(), pageable).await?;
        self.resolve_page(page).await
    }

    pub async fn count_by_criteria<C>(&self, criteria: &C) -> Result<u64>
    where
        C: Criteria + Debug + Sync,
    {
        debug!("Count {} by criteria : {:?}", E::ENTITY_NAME, criteria);
        Ok(self
            .entities
            .count_documents(criteria.to_filter(), None)
            .await?)
    }

    pub async fn search(&self, query: &str, pageable: &Pageable) -> Result<Page<E::Dto>> {
        debug!(
            "Request to search for a page of {} for query {}",
            E::ENTITY_NAME,
            query
        );
        let page = self.search.search(query, pageable).await?;
        self.resolve_page(page).await
    }

    async fn resolve_one(&self, entity: E) -> Result<E> {
        E::resolve(&self.db, vec![entity])
            .await?
            .pop()
            .ok_or_else(|| {
                Error::Status(
                    Status::InternalServerError,
                    format!("Lost {} while resolving relationships", E::ENTITY_NAME),
                )
            })
    }

    async fn resolve_page(&self, page: Page<E>) -> Result<Page<E::Dto>> {
        let total = page.total();
        let pageable = Pageable::new(page.number(), page.size());
        let resolved = E::resolve(&self.db, page.into_content()).await?;
        Ok(Page::new(resolved, total, &pageable).map(E::to_dto))
    }
}

#[rocket::async_trait]
impl<'r, E> FromRequest<'r> for EntityService<E>
where
    E: EntityMapper,
{
    type Error = ();

    /// Build the service from the managed database and search index.
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let rocket = req.rocket();
        match (rocket.state::<Database>(), rocket.state::<SearchIndex<E>>()) {
            (Some(db), Some(search)) => request::Outcome::Success(Self::new(db, search.clone())),
            _ => {
                error!("No database or search index for {}", E::ENTITY_NAME);
                request::Outcome::Failure((Status::InternalServerError, ()))
            }
        }
    }
}

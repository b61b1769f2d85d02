//! Request handling shared by every entity resource: ID checks, delegation
//! to the service, and shaping of the response.

use std::fmt::Debug;

use log::debug;
use rocket::{http::Status, response::status::Created, serde::json::Json};

use crate::error::{Error, Result};
use crate::model::{
    criteria::Criteria, mapper::EntityMapper, pagination::Pageable, EntityId, Identified,
};
use crate::service::EntityService;
use crate::Config;

use super::headers::{self, WithHeaders};

/// A JSON body with alert or pagination headers.
pub type JsonWithHeaders<T> = WithHeaders<Json<T>>;

/// Create a new entity. The DTO must not have an ID yet.
pub async fn create<E: EntityMapper>(
    dto: E::Dto,
    service: &EntityService<E>,
    config: &Config,
    base_url: &str,
) -> Result<WithHeaders<Created<Json<E::Dto>>>> {
    debug!("REST request to save {} : {:?}", E::ENTITY_NAME, dto);
    if dto.id().is_some() {
        return Err(Error::bad_request_alert(
            format!("A new {} cannot already have an ID", E::ENTITY_NAME),
            E::ENTITY_NAME,
            "idexists",
        ));
    }

    let result = service.save(dto).await?;
    let id = saved_id::<E>(&result)?;
    let alert = headers::entity_creation_alert(config.app_name(), E::ENTITY_NAME, id.to_string());
    let created = Created::new(format!("{base_url}/{id}")).body(Json(result));
    Ok(WithHeaders::new(created, alert))
}

/// Replace an existing entity. The DTO must carry the ID to replace.
pub async fn update<E: EntityMapper>(
    dto: E::Dto,
    service: &EntityService<E>,
    config: &Config,
) -> Result<JsonWithHeaders<E::Dto>> {
    debug!("REST request to update {} : {:?}", E::ENTITY_NAME, dto);
    let id = dto.id().ok_or_else(|| {
        Error::bad_request_alert("Invalid id", E::ENTITY_NAME, "idnull")
    })?;

    let result = service.save(dto).await?;
    let alert = headers::entity_update_alert(config.app_name(), E::ENTITY_NAME, id.to_string());
    Ok(WithHeaders::new(Json(result), alert))
}

/// One page of the entities matching `criteria`.
pub async fn list<E, C>(
    criteria: &C,
    pageable: &Pageable,
    service: &EntityService<E>,
    base_url: &str,
) -> Result<JsonWithHeaders<Vec<E::Dto>>>
where
    E: EntityMapper,
    C: Criteria + Debug + Sync,
{
    debug!("REST request to get {}s by criteria: {:?}", E::ENTITY_NAME, criteria);
    let page = service.find_by_criteria(criteria, pageable).await?;
    let headers = headers::pagination(&page, base_url);
    Ok(WithHeaders::new(Json(page.into_content()), headers))
}

pub async fn count<E, C>(criteria: &C, service: &EntityService<E>) -> Result<Json<u64>>
where
    E: EntityMapper,
    C: Criteria + Debug + Sync,
{
    debug!("REST request to count {}s by criteria: {:?}", E::ENTITY_NAME, criteria);
    Ok(Json(service.count_by_criteria(criteria).await?))
}

pub async fn get<E: EntityMapper>(id: EntityId, service: &EntityService<E>) -> Result<Json<E::Dto>> {
    debug!("REST request to get {} : {}", E::ENTITY_NAME, id);
    service
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found(format!("{} with ID '{}'", E::ENTITY_NAME, id)))
}

pub async fn delete<E: EntityMapper>(
    id: EntityId,
    service: &EntityService<E>,
    config: &Config,
) -> Result<WithHeaders<()>> {
    debug!("REST request to delete {} : {}", E::ENTITY_NAME, id);
    service.delete(id).await?;
    let alert = headers::entity_deletion_alert(config.app_name(), E::ENTITY_NAME, id.to_string());
    Ok(WithHeaders::new((), alert))
}

pub async fn search<E: EntityMapper>(
    query: &str,
    pageable: &Pageable,
    service: &EntityService<E>,
    base_url: &str,
) -> Result<JsonWithHeaders<Vec<E::Dto>>> {
    debug!(
        "REST request to search for a page of {}s for query {}",
        E::ENTITY_NAME,
        query
    );
    let page = service.search(query, pageable).await?;
    let headers = headers::search_pagination(query, &page, base_url);
    Ok(WithHeaders::new(Json(page.into_content()), headers))
}

fn saved_id<E: EntityMapper>(dto: &E::Dto) -> Result<EntityId> {
    dto.id().ok_or_else(|| {
        Error::Status(
            Status::InternalServerError,
            format!("Saved {} has no ID", E::ENTITY_NAME),
        )
    })
}

//! Conversion between entities and their DTOs.
//!
//! Related entities are flattened into `<relation>_id`/`<relation>_text` on
//! the way out, and come back in as ID-only stubs which are only resolved
//! into the full entity when read back from storage.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::model::{db::Entity, EntityId, Identified};

mod answer;
mod question;
mod section;

pub trait EntityMapper: Entity + Default {
    type Dto: Identified + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn to_dto(self) -> Self::Dto;

    fn to_entity(dto: Self::Dto) -> Self;

    fn to_dtos(entities: Vec<Self>) -> Vec<Self::Dto> {
        entities.into_iter().map(Self::to_dto).collect()
    }

    fn to_entities(dtos: Vec<Self::Dto>) -> Vec<Self> {
        dtos.into_iter().map(Self::to_entity).collect()
    }

    /// A stub carrying only `id`, or `None` if there is no ID.
    fn from_id(id: Option<EntityId>) -> Option<Self> {
        id.map(|id| {
            let mut stub = Self::default();
            stub.assign_id(id);
            stub
        })
    }
}

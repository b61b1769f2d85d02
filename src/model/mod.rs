pub mod api;
pub mod criteria;
pub mod db;
pub mod mapper;
pub mod mongodb;
pub mod pagination;

/// Server-assigned identifier shared by every entity type.
pub type EntityId = i64;

/// Anything carrying an optional server-assigned ID: entities before they
/// are saved, stubs, and DTOs on the wire.
pub trait Identified {
    fn id(&self) -> Option<EntityId>;
}

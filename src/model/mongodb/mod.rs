mod collection;
mod counter;

use mongodb::bson::{doc, Document};

use crate::model::EntityId;

pub use collection::{
    ensure_indexes_exist, find_page, search_collection_name, Coll, MongoCollection,
};
pub use counter::Counter;

/// Filter matching the document with the given ID.
pub fn id_filter(id: EntityId) -> Document {
    doc! { "_id": id }
}

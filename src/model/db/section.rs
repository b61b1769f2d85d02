use serde::{Deserialize, Serialize};

use crate::model::{db::Entity, EntityId, Identified};

/// A section grouping questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Identified for Section {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for Section {
    const ENTITY_NAME: &'static str = "section";

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn search_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn sort_field(property: &str) -> Option<&'static str> {
        match property {
            "id" => Some("_id"),
            "text" => Some("text"),
            _ => None,
        }
    }
}

use mongodb::Database;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    db::{ensure_exists, Entity, Section},
    mongodb::Coll,
    EntityId, Identified,
};

/// A question belonging to at most one section.
///
/// The section is stored as an ID-only stub and resolved on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
}

impl Identified for Question {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

#[rocket::async_trait]
impl Entity for Question {
    const ENTITY_NAME: &'static str = "question";

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
            "sectionId" | "section.id" => Some("section._id"),
            _ => None,
        }
    }

    async fn check_references(&self, db: &Database) -> Result<()> {
        match self.section.as_ref().and_then(|section| section.id) {
            Some(id) => ensure_exists::<Section>(db, id, Self::ENTITY_NAME).await,
            None => Ok(()),
        }
    }

    async fn resolve(db: &Database, mut questions: Vec<Self>) -> Result<Vec<Self>> {
        let section_ids = questions
            .iter()
            .filter_map(|question| question.section.as_ref()?.id);
        let sections = Coll::<Section>::from_db(db)
            .find_by_ids(section_ids)
            .await?;

        for section in questions.iter_mut().filter_map(|q| q.section.as_mut()) {
            *section = match section.id.and_then(|id| sections.get(&id)) {
                Some(full) => full.clone(),
                None => Section {
                    id: section.id,
                    ..Section::default()
                },
            };
        }
        Ok(questions)
    }
}

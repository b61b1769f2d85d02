use mongodb::Database;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    db::{ensure_exists, Entity, Question},
    mongodb::Coll,
    EntityId, Identified,
};

/// An answer to at most one question.
///
/// The question is stored as an ID-only stub and resolved on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

impl Identified for Answer {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

#[rocket::async_trait]
impl Entity for Answer {
    const ENTITY_NAME: &'static str = "answer";

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
            "questionId" | "question.id" => Some("question._id"),
            _ => None,
        }
    }

    async fn check_references(&self, db: &Database) -> Result<()> {
        match self.question.as_ref().and_then(|question| question.id) {
            Some(id) => ensure_exists::<Question>(db, id, Self::ENTITY_NAME).await,
            None => Ok(()),
        }
    }

    async fn resolve(db: &Database, mut answers: Vec<Self>) -> Result<Vec<Self>> {
        let question_ids = answers
            .iter()
            .filter_map(|answer| answer.question.as_ref()?.id);
        let questions = Coll::<Question>::from_db(db)
            .find_by_ids(question_ids)
            .await?;

        for question in answers.iter_mut().filter_map(|a| a.question.as_mut()) {
            *question = match question.id.and_then(|id| questions.get(&id)) {
                Some(full) => full.clone(),
                None => Question {
                    id: question.id,
                    ..Question::default()
                },
            };
        }
        Ok(answers)
    }
}

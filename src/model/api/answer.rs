use serde::{Deserialize, Serialize};

use crate::model::{EntityId, Identified};

/// An answer with its question flattened into `question_id`/`question_text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub question_id: Option<EntityId>,
    #[serde(default)]
    pub question_text: Option<String>,
}

impl Identified for AnswerDto {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

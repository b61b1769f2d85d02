use serde::{Deserialize, Serialize};

use crate::model::{EntityId, Identified};

/// A question with its section flattened into `section_id`/`section_text`.
/// The section text is read-only: it is ignored when the DTO is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub section_id: Option<EntityId>,
    #[serde(default)]
    pub section_text: Option<String>,
}

impl Identified for QuestionDto {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

use serde::{Deserialize, Serialize};

use crate::model::{EntityId, Identified};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Identified for SectionDto {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

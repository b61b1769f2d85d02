use crate::model::{api::SectionDto, db::Section};

use super::EntityMapper;

impl EntityMapper for Section {
    type Dto = SectionDto;

    fn to_dto(self) -> SectionDto {
        SectionDto {
            id: self.id,
            text: self.text,
        }
    }

    fn to_entity(dto: SectionDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
        }
    }
}

use crate::model::{
    api::QuestionDto,
    db::{Question, Section},
};

use super::EntityMapper;

impl EntityMapper for Question {
    type Dto = QuestionDto;

    fn to_dto(self) -> QuestionDto {
        let (section_id, section_text) = match self.section {
            Some(section) => (section.id, section.text),
            None => (None, None),
        };
        QuestionDto {
            id: self.id,
            text: self.text,
            section_id,
            section_text,
        }
    }

    fn to_entity(dto: QuestionDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
            section: Section::from_id(dto.section_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Question {
        Question {
            id: Some(11),
            text: Some("How old are you?".to_string()),
            section: Some(Section {
                id: Some(2),
                text: Some("About you".to_string()),
            }),
        }
    }

    #[test]
    fn section_flattened_into_dto() {
        let dto = example().to_dto();
        assert_eq!(dto.id, Some(11));
        assert_eq!(dto.text.as_deref(), Some("How old are you?"));
        assert_eq!(dto.section_id, Some(2));
        assert_eq!(dto.section_text.as_deref(), Some("About you"));
    }

    #[test]
    fn missing_section_leaves_derived_fields_empty() {
        let question = Question {
            section: None,
            ..example()
        };
        let dto = question.to_dto();
        assert_eq!(dto.section_id, None);
        assert_eq!(dto.section_text, None);
    }

    #[test]
    fn section_rebuilt_as_stub() {
        let dto = QuestionDto {
            id: None,
            text: Some("Favourite colour?".to_string()),
            section_id: Some(4),
            section_text: Some("ignored".to_string()),
        };
        let question = Question::to_entity(dto);
        assert_eq!(question.id, None);
        assert_eq!(question.text.as_deref(), Some("Favourite colour?"));
        assert_eq!(
            question.section,
            Some(Section {
                id: Some(4),
                text: None
            })
        );
    }

    #[test]
    fn no_section_id_means_no_section() {
        let question = Question::to_entity(QuestionDto::default());
        assert_eq!(question.section, None);
    }

    #[test]
    fn stub_from_id() {
        assert_eq!(Question::from_id(None), None);
        assert_eq!(
            Question::from_id(Some(9)),
            Some(Question {
                id: Some(9),
                ..Question::default()
            })
        );
    }

    #[test]
    fn lists_map_element_wise() {
        let dtos = Question::to_dtos(vec![example(), Question::default()]);
        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].section_text.as_deref(), Some("About you"));
        assert_eq!(dtos[1], QuestionDto::default());

        let questions = Question::to_entities(dtos);
        assert_eq!(questions[0].section, Section::from_id(Some(2)));
        assert_eq!(questions[1], Question::default());
    }
}

use crate::model::{
    api::AnswerDto,
    db::{Answer, Question},
};

use super::EntityMapper;

impl EntityMapper for Answer {
    type Dto = AnswerDto;

    fn to_dto(self) -> AnswerDto {
        let (question_id, question_text) = match self.question {
            Some(question) => (question.id, question.text),
            None => (None, None),
        };
        AnswerDto {
            id: self.id,
            text: self.text,
            question_id,
            question_text,
        }
    }

    fn to_entity(dto: AnswerDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
            question: Question::from_id(dto.question_id),
        }
    }
}

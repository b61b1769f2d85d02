use mongodb::bson::Document;
use rocket::FromForm;

use super::{Criteria, LongFilter, StringFilter};

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct SectionCriteria {
    pub id: LongFilter,
    pub text: StringFilter,
}

impl Criteria for SectionCriteria {
    fn clauses(&self) -> Vec<Document> {
        let mut clauses = self.id.clauses("_id");
        clauses.extend(self.text.clauses("text"));
        clauses
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct QuestionCriteria {
    pub id: LongFilter,
    pub text: StringFilter,
    #[field(name = "sectionId")]
    pub section_id: LongFilter,
}

impl Criteria for QuestionCriteria {
    fn clauses(&self) -> Vec<Document> {
        let mut clauses = self.id.clauses("_id");
        clauses.extend(self.text.clauses("text"));
        clauses.extend(self.section_id.clauses("section._id"));
        clauses
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct AnswerCriteria {
    pub id: LongFilter,
    pub text: StringFilter,
    #[field(name = "questionId")]
    pub question_id: LongFilter,
}

impl Criteria for AnswerCriteria {
    fn clauses(&self) -> Vec<Document> {
        let mut clauses = self.id.clauses("_id");
        clauses.extend(self.text.clauses("text"));
        clauses.extend(self.question_id.clauses("question._id"));
        clauses
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[test]
    fn empty_criteria_matches_everything() {
        assert_eq!(SectionCriteria::default().to_filter(), doc! {});
        assert_eq!(QuestionCriteria::default().to_filter(), doc! {});
    }

    #[test]
    fn single_constraint_is_not_wrapped() {
        let criteria = SectionCriteria {
            id: LongFilter::equals(3),
            ..SectionCriteria::default()
        };
        assert_eq!(criteria.to_filter(), doc! { "_id": 3_i64 });
    }

    #[test]
    fn relationship_filter_targets_stub_id() {
        let criteria = QuestionCriteria {
            section_id: LongFilter::equals(2),
            text: StringFilter {
                equals: Some("Age?".to_string()),
                ..StringFilter::default()
            },
            ..QuestionCriteria::default()
        };
        assert_eq!(
            criteria.to_filter(),
            doc! { "$and": [{ "text": "Age?" }, { "section._id": 2_i64 }] }
        );
    }

    #[test]
    fn answer_filter_by_question() {
        let criteria = AnswerCriteria {
            question_id: LongFilter::equals(8),
            ..AnswerCriteria::default()
        };
        assert_eq!(criteria.to_filter(), doc! { "question._id": 8_i64 });
    }
}

//! Field-level filters for list queries, parsed from query parameters of
//! the form `<field>.<operator>=<value>`, e.g. `text.contains=age` or
//! `sectionId.in=1&sectionId.in=2`.

use mongodb::bson::{doc, Document};

mod entity;
mod filter;

pub use entity::{AnswerCriteria, QuestionCriteria, SectionCriteria};
pub use filter::{LongFilter, StringFilter};

/// A set of filters over one entity type.
pub trait Criteria {
    /// One filter document per constraint, to be combined conjunctively.
    fn clauses(&self) -> Vec<Document>;

    /// Render the whole criteria as a single MongoDB filter. No constraints
    /// renders to the empty document, which matches everything.
    fn to_filter(&self) -> Document {
        let mut clauses = self.clauses();
        match clauses.len() {
            0 => Document::new(),
            1 => clauses.remove(0),
            _ => doc! { "$and": clauses },
        }
    }
}

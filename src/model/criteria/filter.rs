use mongodb::bson::{Bson, Document, Regex};
use rocket::FromForm;

use crate::model::EntityId;

/// Filter over an integer field.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct LongFilter {
    pub equals: Option<EntityId>,
    #[field(name = "notEquals")]
    pub not_equals: Option<EntityId>,
    #[field(name = "in")]
    pub any_of: Vec<EntityId>,
    pub specified: Option<bool>,
    #[field(name = "greaterThan")]
    pub greater_than: Option<EntityId>,
    #[field(name = "lessThan")]
    pub less_than: Option<EntityId>,
    #[field(name = "greaterThanOrEqual")]
    pub greater_than_or_equal: Option<EntityId>,
    #[field(name = "lessThanOrEqual")]
    pub less_than_or_equal: Option<EntityId>,
}

impl LongFilter {
    pub fn equals(value: EntityId) -> Self {
        Self {
            equals: Some(value),
            ..Self::default()
        }
    }

    /// The constraints on `field`, one document each.
    pub fn clauses(&self, field: &str) -> Vec<Document> {
        let mut clauses = Vec::new();
        if let Some(value) = self.equals {
            clauses.push(clause(field, value));
        }
        if let Some(value) = self.not_equals {
            clauses.push(clause(field, differs_from(value)));
        }
        let operators = [
            ("$gt", self.greater_than),
            ("$lt", self.less_than),
            ("$gte", self.greater_than_or_equal),
            ("$lte", self.less_than_or_equal),
        ];
        for (operator, value) in operators {
            if let Some(value) = value {
                clauses.push(clause(field, operation(operator, value)));
            }
        }
        if !self.any_of.is_empty() {
            clauses.push(clause(field, operation("$in", self.any_of.clone())));
        }
        if let Some(specified) = self.specified {
            clauses.push(specified_clause(field, specified));
        }
        clauses
    }
}

/// Filter over a text field. Substring matches are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct StringFilter {
    pub equals: Option<String>,
    #[field(name = "notEquals")]
    pub not_equals: Option<String>,
    #[field(name = "in")]
    pub any_of: Vec<String>,
    pub specified: Option<bool>,
    pub contains: Option<String>,
    #[field(name = "doesNotContain")]
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Self::default()
        }
    }

    /// The constraints on `field`, one document each.
    pub fn clauses(&self, field: &str) -> Vec<Document> {
        let mut clauses = Vec::new();
        if let Some(value) = &self.equals {
            clauses.push(clause(field, value.as_str()));
        }
        if let Some(value) = &self.not_equals {
            clauses.push(clause(field, differs_from(value.as_str())));
        }
        if !self.any_of.is_empty() {
            clauses.push(clause(field, operation("$in", self.any_of.clone())));
        }
        if let Some(specified) = self.specified {
            clauses.push(specified_clause(field, specified));
        }
        if let Some(value) = &self.contains {
            clauses.push(clause(field, substring(value)));
        }
        if let Some(value) = &self.does_not_contain {
            let mut condition = operation("$not", substring(value));
            condition.insert("$ne", Bson::Null);
            clauses.push(clause(field, condition));
        }
        clauses
    }
}

fn clause(field: &str, condition: impl Into<Bson>) -> Document {
    let mut clause = Document::new();
    clause.insert(field, condition);
    clause
}

fn operation(operator: &str, value: impl Into<Bson>) -> Document {
    let mut operation = Document::new();
    operation.insert(operator, value);
    operation
}

/// Negative conditions only match fields that are present, as in SQL.
fn differs_from(value: impl Into<Bson>) -> Document {
    operation("$nin", vec![value.into(), Bson::Null])
}

fn specified_clause(field: &str, specified: bool) -> Document {
    if specified {
        clause(field, operation("$ne", Bson::Null))
    } else {
        clause(field, Bson::Null)
    }
}

fn substring(value: &str) -> Regex {
    Regex {
        pattern: escape_regex(value),
        options: "i".to_string(),
    }
}

/// Escape regex metacharacters so `value` matches literally.
fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

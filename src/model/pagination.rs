use mongodb::bson::Document;
use rocket::{
    http::Status,
    request::{self, FromRequest, Request},
};

use crate::config::{Config, DEFAULT_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::model::db::Entity;

/// Largest page a client may request; bigger requests are clamped.
pub const MAX_PAGE_SIZE: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One sort key, by client-facing property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

/// Which page of results a client asked for, parsed from the `page`
/// (zero-based), `size` and repeatable `sort=property[,property...][,asc|desc]`
/// query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    page: u64,
    size: u64,
    sort: Vec<Order>,
}

impl Pageable {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: Vec<Order>) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> &[Order] {
        &self.sort
    }

    /// Number of results before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Whether the database can skip to this page at all. Skips are signed
    /// 64-bit in MongoDB.
    pub fn is_reachable(&self) -> bool {
        self.page
            .checked_mul(self.size)
            .map_or(false, |offset| offset <= i64::MAX as u64)
    }

    /// Render the sort keys against `E`'s stored fields. Without any sort
    /// keys results are ordered by ID so that pages are stable.
    pub fn sort_document<E: Entity>(&self) -> Result<Document> {
        let mut document = Document::new();
        for order in &self.sort {
            let field = E::sort_field(&order.property).ok_or_else(|| {
                Error::Status(
                    Status::BadRequest,
                    format!(
                        "Cannot sort {} by '{}'",
                        E::ENTITY_NAME,
                        order.property
                    ),
                )
            })?;
            let direction = match order.direction {
                Direction::Asc => 1,
                Direction::Desc => -1,
            };
            document.insert(field, direction);
        }
        if !document.contains_key("_id") {
            document.insert("_id", 1);
        }
        Ok(document)
    }

    /// Parse one `sort` parameter, e.g. `text,desc` or `id`.
    pub fn parse_sort(value: &str) -> Option<Vec<Order>> {
        let mut parts = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();
        let direction = match parts.last().map(|part| part.to_ascii_lowercase()) {
            Some(last) if last == "asc" => Some(Direction::Asc),
            Some(last) if last == "desc" => Some(Direction::Desc),
            _ => None,
        };
        if direction.is_some() {
            parts.pop();
        }
        if parts.is_empty() {
            return None;
        }
        let direction = direction.unwrap_or(Direction::Asc);
        Some(
            parts
                .into_iter()
                .map(|property| Order {
                    property: property.to_string(),
                    direction,
                })
                .collect(),
        )
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Pageable {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let default_size = req
            .rocket()
            .state::<Config>()
            .map_or(DEFAULT_PAGE_SIZE, Config::default_page_size);

        let page = if let Ok(page) = req.query_value::<u64>("page").unwrap_or(Ok(0)) {
            page
        } else {
            return request::Outcome::Failure((Status::BadRequest, ()));
        };
        let size = match req.query_value::<u64>("size").unwrap_or(Ok(default_size)) {
            Ok(size) if size > 0 => size,
            _ => return request::Outcome::Failure((Status::BadRequest, ())),
        };
        let sort_values = if let Ok(values) = req
            .query_value::<Vec<String>>("sort")
            .unwrap_or_else(|| Ok(Vec::new()))
        {
            values
        } else {
            return request::Outcome::Failure((Status::BadRequest, ()));
        };

        let mut sort = Vec::new();
        for value in &sort_values {
            match Self::parse_sort(value) {
                Some(orders) => sort.extend(orders),
                None => return request::Outcome::Failure((Status::BadRequest, ())),
            }
        }

        let pageable = Self::new(page, size).with_sort(sort);
        if !pageable.is_reachable() {
            return request::Outcome::Failure((Status::BadRequest, ()));
        }
        request::Outcome::Success(pageable)
    }
}

/// One page of results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    total: u64,
    page: u64,
    size: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: u64, pageable: &Pageable) -> Self {
        Self {
            content,
            total,
            page: pageable.page(),
            size: pageable.size(),
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Total number of matches across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Zero-based index of this page.
    pub fn number(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            (self.total + self.size - 1) / self.size
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

//! Notification and pagination headers.
//!
//! Alerts are pairs of `X-<app>-alert` (or `X-<app>-error`) and
//! `X-<app>-params` headers that the frontend turns into toast messages.

use rocket::{
    http::{Header, RawStr},
    response::{self, Responder},
    Request,
};

use crate::model::pagination::Page;

/// A responder with extra headers attached.
pub struct WithHeaders<R> {
    inner: R,
    headers: Vec<Header<'static>>,
}

impl<R> WithHeaders<R> {
    pub fn new(inner: R, headers: Vec<Header<'static>>) -> Self {
        Self { inner, headers }
    }
}

impl<'r, 'o: 'r, R: Responder<'r, 'o>> Responder<'r, 'o> for WithHeaders<R> {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let mut response = self.inner.respond_to(req)?;
        for header in self.headers {
            response.set_header(header);
        }
        Ok(response)
    }
}

pub fn alert(app_name: &str, message: String, param: String) -> Vec<Header<'static>> {
    vec![
        Header::new(format!("X-{app_name}-alert"), message),
        Header::new(format!("X-{app_name}-params"), param),
    ]
}

pub fn entity_creation_alert(app_name: &str, entity_name: &str, id: String) -> Vec<Header<'static>> {
    alert(app_name, format!("{app_name}.{entity_name}.created"), id)
}

pub fn entity_update_alert(app_name: &str, entity_name: &str, id: String) -> Vec<Header<'static>> {
    alert(app_name, format!("{app_name}.{entity_name}.updated"), id)
}

pub fn entity_deletion_alert(app_name: &str, entity_name: &str, id: String) -> Vec<Header<'static>> {
    alert(app_name, format!("{app_name}.{entity_name}.deleted"), id)
}

pub fn failure_alert(app_name: &str, entity_name: &str, error_key: &str) -> Vec<Header<'static>> {
    vec![
        Header::new(format!("X-{app_name}-error"), format!("error.{error_key}")),
        Header::new(format!("X-{app_name}-params"), entity_name.to_string()),
    ]
}

/// `X-Total-Count` and `Link` headers for a page of results at `base_url`.
pub fn pagination<T>(page: &Page<T>, base_url: &str) -> Vec<Header<'static>> {
    paging_headers(page, |number, size| {
        format!("{base_url}?page={number}&size={size}")
    })
}

/// As [`pagination`], with every link repeating the search `query`.
pub fn search_pagination<T>(query: &str, page: &Page<T>, base_url: &str) -> Vec<Header<'static>> {
    let query = RawStr::new(query).percent_encode().as_str().to_string();
    paging_headers(page, |number, size| {
        format!("{base_url}?query={query}&page={number}&size={size}")
    })
}

fn paging_headers<T>(page: &Page<T>, uri: impl Fn(u64, u64) -> String) -> Vec<Header<'static>> {
    let size = page.size();
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(format!("<{}>; rel=\"next\"", uri(page.number().saturating_add(1), size)));
    }
    if page.has_previous() {
        links.push(format!("<{}>; rel=\"prev\"", uri(page.number() - 1, size)));
    }
    let last = page.total_pages().saturating_sub(1);
    links.push(format!("<{}>; rel=\"last\"", uri(last, size)));
    links.push(format!("<{}>; rel=\"first\"", uri(0, size)));

    vec![
        Header::new("X-Total-Count", page.total().to_string()),
        Header::new("Link", links.join(",")),
    ]
}

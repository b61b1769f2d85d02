use rocket::Route;

mod answer;
pub mod headers;
mod question;
pub mod resource;
mod section;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(section::routes());
    routes.extend(question::routes());
    routes.extend(answer::routes());
    routes
}

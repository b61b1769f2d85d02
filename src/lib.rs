#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;

pub use config::Config;

use config::{ConfigFairing, DatabaseFairing, SearchFairing};
use logging::LoggerFairing;

/// Assemble the server. Configuration, the database connection and the
/// search indexes are all set up by fairings when the rocket ignites.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/api", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(DatabaseFairing)
        .attach(SearchFairing)
}

#[cfg(test)]
async fn db_client() -> mongodb::Client {
    let db_uri = rocket::Config::figment()
        .extract_inner::<String>("db_uri")
        .expect("`db_uri` not set");
    mongodb::Client::with_uri_str(db_uri).await.unwrap()
}

/// A fresh database name, so tests can run in parallel.
#[cfg(test)]
fn database() -> String {
    use rand::{distributions::Alphanumeric, Rng};

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("survey_test_{suffix}")
}

/// A rocket with the real routes and config over the given database, and an
/// in-memory search index.
#[cfg(test)]
async fn rocket_for_db(client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = client.database(db_name);
    model::mongodb::ensure_indexes_exist(&db).await.unwrap();

    let rocket = rocket::build()
        .mount("/api", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .manage(client)
        .manage(db);
    search::memory::in_memory_search(rocket)
}

use log::{error, info};
use mongodb::Client as MongoClient;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{
    db::{Answer, Question, Section},
    mongodb::ensure_indexes_exist,
};
use crate::search::{MongoSearchRepository, SearchIndex};

/// Application name used to prefix alert headers when none is configured.
pub const DEFAULT_APP_NAME: &str = "shApp";

/// Page size used when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_name")]
    app_name: String,
    #[serde(default = "default_page_size")]
    default_page_size: u64,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Prefix of the `X-<app>-alert` notification headers.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Number of entities per page when the client gives no `size`.
    pub fn default_page_size(&self) -> u64 {
        self.default_page_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        if config.default_page_size == 0 {
            error!("`default_page_size` must be at least 1");
            return Err(rocket);
        }

        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the database.
#[derive(Deserialize)]
struct DbConfig {
    // secrets
    db_uri: String,
    // non-secrets
    #[serde(default = "default_db_name")]
    db_name: String,
}

fn default_db_name() -> String {
    "survey".to_string()
}

/// A fairing that loads the MongoDB config, connects to the database,
/// ensures the indexes exist, and places both a `Client` and a `Database`
/// into managed state.
pub struct DatabaseFairing;

#[rocket::async_trait]
impl Fairing for DatabaseFairing {
    fn info(&self) -> Info {
        Info {
            name: "MongoDB",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<DbConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load database config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!("Loaded database config, connecting...");
        let client = match MongoClient::with_uri_str(config.db_uri).await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to database: {e}");
                return Err(rocket);
            }
        };
        let db = client.database(&config.db_name);

        if let Err(e) = ensure_indexes_exist(&db).await {
            error!("Failed to create indexes in database {}: {e}", config.db_name);
            return Err(rocket);
        }
        info!("...database connection online!");

        rocket = rocket.manage(client).manage(db);
        Ok(rocket)
    }
}

/// A fairing that places a text-index search repository for each entity
/// into managed state. Must be attached after [`DatabaseFairing`].
pub struct SearchFairing;

#[rocket::async_trait]
impl Fairing for SearchFairing {
    fn info(&self) -> Info {
        Info {
            name: "Search index",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let db = match rocket.state::<mongodb::Database>() {
            Some(db) => db.clone(),
            None => {
                error!("Search index requires a database connection");
                return Err(rocket);
            }
        };
        info!("Search index backed by database {}", db.name());

        Ok(rocket
            .manage(SearchIndex::new(MongoSearchRepository::<Section>::from_db(&db)))
            .manage(SearchIndex::new(MongoSearchRepository::<Question>::from_db(&db)))
            .manage(SearchIndex::new(MongoSearchRepository::<Answer>::from_db(&db))))
    }
}

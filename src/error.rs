use std::fmt::Display;

use log::{error, warn};
use mongodb::error::Error as DbError;
use rocket::{
    http::{Status, StatusClass},
    response::{self, Responder},
    serde::json::{json, Json},
    Request, Response,
};
use thiserror::Error;

use crate::{api::headers, Config};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    /// A malformed request that the client should be told about, keyed so
    /// that the frontend can translate it.
    #[error("{message}")]
    BadRequestAlert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    pub fn not_found(what: impl Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn bad_request_alert(
        message: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        Self::BadRequestAlert {
            message: message.into(),
            entity_name,
            error_key,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        match self {
            Self::BadRequestAlert {
                message,
                entity_name,
                error_key,
            } => {
                warn!("Rejected request for {entity_name}: {message} ({error_key})");
                let app_name = req
                    .rocket()
                    .state::<Config>()
                    .map_or(crate::config::DEFAULT_APP_NAME, Config::app_name);
                let problem = json!({
                    "title": message,
                    "status": Status::BadRequest.code,
                    "entityName": entity_name,
                    "errorKey": error_key,
                    "message": format!("error.{error_key}"),
                });
                let mut response = Response::build_from(Json(problem).respond_to(req)?);
                response.status(Status::BadRequest);
                for header in headers::failure_alert(app_name, entity_name, error_key) {
                    response.header(header);
                }
                response.ok()
            }
            // Absence is a normal outcome, so no catcher body.
            Self::NotFound(what) => {
                warn!("Not found: {what}");
                Response::build().status(Status::NotFound).ok()
            }
            Self::Status(status, message) => {
                match status.class() {
                    StatusClass::ServerError => error!("{message}"),
                    _ => warn!("{message}"),
                }
                Err(status)
            }
            Self::Db(err) => {
                error!("Database failure: {err}");
                Err(Status::InternalServerError)
            }
        }
    }
}

use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use bookli_api_structs::dtos::ReservationDTO;
use bookli_domain::Reservation;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookliError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{message}`")]
    Conflict {
        message: String,
        conflicts: Vec<Reservation>,
    },
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictResponse {
    message: String,
    conflicts: Vec<ReservationDTO>,
}

impl actix_web::error::ResponseError for BookliError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // The conflicting reservations are surfaced so that the
            // caller can suggest alternatives.
            Self::Conflict { message, conflicts } => HttpResponse::build(self.status_code())
                .json(ConflictResponse {
                    message: message.clone(),
                    conflicts: conflicts
                        .iter()
                        .cloned()
                        .map(ReservationDTO::new)
                        .collect(),
                }),
            _ => HttpResponse::build(self.status_code())
                .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
                .body(self.to_string()),
        }
    }
}

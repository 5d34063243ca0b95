use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::data::DataParsingError;
use crate::klaviyo_client;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("klaviyo did not return a usable profile id")]
    ProfileUnresolved,

    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),

    #[error("klaviyo client error: {0}")]
    KlaviyoClient(#[from] klaviyo_client::Error),
}

impl Error {
    /// Maps every variant to its status code and the exact client-facing
    /// message. Internal detail never leaves the server.
    pub fn status_code_and_client_error(&self) -> (StatusCode, &'static str) {
        match self {
            Error::DataParsing(DataParsingError::MissingRequiredKeys) => {
                (StatusCode::BAD_REQUEST, "Missing required keys")
            }
            Error::DataParsing(DataParsingError::InvalidSegment) => {
                (StatusCode::BAD_REQUEST, "Invalid segment")
            }
            Error::ProfileUnresolved => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create or find profile in Klaviyo",
            ),
            Error::KlaviyoClient(klaviyo_client::Error::ListRejected(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to add profile to list in Klaviyo",
            ),
            // Transport and decode failures collapse into one generic message.
            Error::KlaviyoClient(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from Klaviyo API",
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, client_error) = self.status_code_and_client_error();

        if status.is_server_error() {
            tracing::error!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");
        } else {
            tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");
        }

        (status, Json(json!({ "error": client_error }))).into_response()
    }
}

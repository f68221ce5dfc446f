//! HTTP route handlers.

mod health;
mod history;
mod price;
pub mod settings;

pub use health::health_handler;
pub use history::history_handler;
pub use price::{price_handler, PriceRequest, REQUEST_BUDGET};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error body returned for every non-success response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn error_with(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

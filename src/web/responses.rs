use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};

use crate::regression::error::Error;
use crate::regression::responses::ErrorResponse;

pub fn error_response<M: Into<String>>(status: StatusCode, message: M) -> Response {
    Json(ErrorResponse {
        error: message.into(),
    })
    .with_status(status)
    .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidInput(_) | Self::ModelNotTrained => StatusCode::BAD_REQUEST,
            Self::NumericDivergence { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        error_response(status, self.to_string())
    }
}

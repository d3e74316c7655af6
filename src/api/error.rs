use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pages::PageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("page generation failed: {0}")]
    Page(#[from] PageError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Page(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ApiError::Page(err) = &self {
            tracing::error!(code = self.code(), error = %err, "Request failed");
        }

        // Error details stay in the logs
        let body = format!(
            "<!DOCTYPE html>\n<html><body><h1>{} - {}</h1></body></html>\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error")
        );

        (
            status,
            [
                (header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref()),
                (header::CACHE_CONTROL, "no-store"),
            ],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("/episode/x".into()).status_code(),
            StatusCode::NOT_FOUND
        );

        let err = ApiError::from(PageError::Fetch(ClientError::NotFound("x".into())));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_response_is_html() {
        let response = ApiError::NotFound("/episode/x".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }
}

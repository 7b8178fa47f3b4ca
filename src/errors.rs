use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_json::json;

use crate::services::solscan::SolscanError;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Method not allowed")]
    MethodNotAllowed,

    #[display(fmt = "{}", _0)]
    MissingParameter(String),

    #[display(fmt = "{}", _0)]
    Misconfiguration(String),

    #[display(fmt = "Failed to fetch transactions: {}", _0)]
    UpstreamFailure(String),
}

impl From<SolscanError> for ApiError {
    fn from(error: SolscanError) -> Self {
        log::error!("Fetch error: {}", error);
        ApiError::UpstreamFailure(error.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::Misconfiguration(_) | ApiError::UpstreamFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::solscan::StatusText;
    use actix_web::body::to_bytes;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use serde_json::Value;
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    /// Keeps records per thread so parallel tests don't see each other's logs
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
    static INIT_LOGGER: Once = Once::new();

    fn capture_logs() {
        INIT_LOGGER.call_once(|| {
            log::set_logger(&CAPTURE_LOGGER).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    fn captured_errors() -> Vec<String> {
        RECORDS.with(|records| {
            records
                .borrow()
                .iter()
                .filter(|(level, _)| *level == Level::Error)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    async fn body_json(error: ApiError) -> (StatusCode, Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_method_not_allowed_response() {
        let (status, body) = body_json(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[actix_web::test]
    async fn test_missing_parameter_response() {
        let error = ApiError::MissingParameter("Wallet address is required".to_string());
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Wallet address is required" }));
    }

    #[actix_web::test]
    async fn test_upstream_failure_response() {
        let error = ApiError::UpstreamFailure("Solscan API error: 502 - Bad Gateway".to_string());
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Failed to fetch transactions: Solscan API error: 502 - Bad Gateway" })
        );
    }

    #[test]
    fn test_status_error_converts_to_upstream_failure() {
        let error: ApiError = SolscanError::Status {
            status: 404,
            reason: StatusText::from("Not Found"),
        }
        .into();

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            error.to_string(),
            "Failed to fetch transactions: Solscan API error: 404 - Not Found"
        );
    }

    #[test]
    fn test_upstream_failure_is_logged_once() {
        capture_logs();

        let _: ApiError = SolscanError::Status {
            status: 502,
            reason: StatusText::from("Bad Gateway"),
        }
        .into();

        assert_eq!(
            captured_errors(),
            vec!["Fetch error: Solscan API error: 502 - Bad Gateway".to_string()]
        );
    }

    #[test]
    fn test_client_side_errors_are_not_logged() {
        capture_logs();

        let _ = ApiError::MissingParameter("Wallet address is required".to_string())
            .error_response();
        let _ = ApiError::MethodNotAllowed.error_response();

        assert!(captured_errors().is_empty());
    }
}

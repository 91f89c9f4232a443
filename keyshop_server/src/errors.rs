use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use keyshop_engine::{OrdersApiError, SettlementError};
use log::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("forbidden")]
    InsufficientPermissions,
    #[error("{0} not found")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::InsufficientPermissions => StatusCode::FORBIDDEN,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Server-side failures are logged in full but answered with a fixed message.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("💥️ {self}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": message }).to_string())
    }
}

impl From<OrdersApiError> for ServerError {
    fn from(e: OrdersApiError) -> Self {
        match e {
            OrdersApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

/// Errors from the payment gateway callback. The gateway reads plain text bodies, so these are not JSON.
#[derive(Debug, Error)]
pub enum PaymentCallbackError {
    #[error("The callback acknowledgement code is not configured")]
    AckNotConfigured,
    #[error("Could not read callback form. {0}")]
    InvalidRequestFormat(String),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl PaymentCallbackError {
    /// The body returned to the gateway.
    pub fn body(&self) -> &'static str {
        match self {
            Self::AckNotConfigured => "Internal Server Error",
            Self::InvalidRequestFormat(_) => "Invalid request format",
            Self::Settlement(e) => match e {
                SettlementError::InvalidChecksum => "Invalid SmilePay transaction",
                SettlementError::InvalidPurchaseAmount(_) => "Invalid purchamt format",
                SettlementError::InvalidSettlementAmount(_) => "Invalid amount format",
                SettlementError::AmountMismatch { .. } => "Amount mismatch",
                SettlementError::Persistence(_) => "Internal Server Error",
            },
        }
    }
}

impl ResponseError for PaymentCallbackError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AckNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequestFormat(_) => StatusCode::BAD_REQUEST,
            Self::Settlement(e) => match e {
                SettlementError::InvalidChecksum => StatusCode::FORBIDDEN,
                SettlementError::InvalidPurchaseAmount(_) => StatusCode::BAD_REQUEST,
                SettlementError::InvalidSettlementAmount(_) => StatusCode::BAD_REQUEST,
                SettlementError::AmountMismatch { .. } => StatusCode::BAD_REQUEST,
                SettlementError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).insert_header(ContentType::html()).body(self.body())
    }
}

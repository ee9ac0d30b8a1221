//! HTTP error mapping.
//!
//! | Error | Status |
//! |---|---|
//! | `MalformedRequest` | 400 |
//! | `AddressSpaceExhausted` | 503 |
//! | anything else | 500 |

use crate::domain::{ErrorBody, RegistryError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Join body could not be decoded. The registry was not touched.
    #[error("malformed join request: {0}")]
    MalformedRequest(String),

    /// Registry rejected the operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Response could not be produced.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn malformed(details: impl std::fmt::Display) -> Self {
        Self::MalformedRequest(details.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Registry(RegistryError::AddressSpaceExhausted { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Registry(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable kind used in [`ErrorBody::error`].
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "malformed_request",
            Self::Registry(RegistryError::AddressSpaceExhausted { .. }) => {
                "address_space_exhausted"
            }
            Self::Registry(RegistryError::InvalidAddressSpace(_)) => "invalid_address_space",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind().to_string(),
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::malformed("eof").status(), StatusCode::BAD_REQUEST);
        let exhausted = ApiError::from(RegistryError::AddressSpaceExhausted {
            network: Ipv4Addr::new(10, 0, 0, 0),
            prefix_len: 24,
            capacity: 253,
        });
        assert_eq!(exhausted.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(exhausted.kind(), "address_space_exhausted");
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_malformed_message_keeps_detail() {
        let err = ApiError::malformed("missing field `udp_port`");
        assert_eq!(err.to_string(), "malformed join request: missing field `udp_port`");
        assert_eq!(err.kind(), "malformed_request");
    }
}

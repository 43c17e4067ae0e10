//! Errors produced by peer HTTP calls.

use thiserror::Error;

/// Errors that can occur when calling a peer service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The peer answered with a non-success status code.
    ///
    /// The response body is preserved as text so the caller can log or
    /// surface the peer's own message.
    #[error("{service} returned status {status}: {body}")]
    Status {
        /// Name of the peer service.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The request never produced a response (connection refused, timeout,
    /// DNS failure).
    #[error("request to {service} failed: {source}")]
    Transport {
        /// Name of the peer service.
        service: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The peer answered successfully but the body did not match the
    /// expected shape.
    #[error("could not decode response from {service}: {source}")]
    Decode {
        /// Name of the peer service.
        service: &'static str,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteError {
    /// Returns the HTTP status code if the peer produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the peer answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Name of the peer the call was addressed to.
    pub fn service(&self) -> &'static str {
        match self {
            Self::Status { service, .. }
            | Self::Transport { service, .. }
            | Self::Decode { service, .. } => service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accessor_only_set_for_status_errors() {
        let err = RemoteError::Status {
            service: "inventory",
            status: 409,
            body: "conflict".to_string(),
        };
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_not_found());
        assert_eq!(err.service(), "inventory");
    }

    #[test]
    fn not_found_is_detected() {
        let err = RemoteError::Status {
            service: "catalog",
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn display_includes_peer_and_body() {
        let err = RemoteError::Status {
            service: "inventory",
            status: 500,
            body: "boom".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("inventory"));
        assert!(text.contains("500"));
        assert!(text.contains("boom"));
    }
}

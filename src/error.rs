//! Error types for the Blueink SDK.
//!
//! A single error enum covers configuration problems, payload-builder
//! validation failures, and transport/API errors.

use thiserror::Error;

/// Result type for Blueink operations.
pub type Result<T> = std::result::Result<T, BlueinkError>;

/// Errors that can occur when using the Blueink SDK.
#[derive(Error, Debug)]
pub enum BlueinkError {
    /// No private API key was supplied and none was found in the environment.
    #[error(
        "a Blueink private API key must be provided on client construction \
         or via the BLUEINK_PRIVATE_API_KEY environment variable"
    )]
    MissingApiKey,

    /// Non-2xx response from the Blueink API.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, as text.
        body: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a document from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A builder precondition was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// A document or signer key was registered twice.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A field, assignment, or value referenced a document key that was
    /// never added to the builder.
    #[error("no document found with key {0}")]
    UnknownDocument(String),

    /// An editor or role assignment referenced a signer key that was never
    /// added to the builder.
    #[error("no signer found with key {0}")]
    UnknownSigner(String),

    /// `assign_role`/`set_value` was called on a document that is not a
    /// template reference.
    #[error("document with key {0} is not a template reference")]
    NotATemplate(String),

    /// An endpoint template placeholder had no substitution value.
    #[error("no substitution supplied for placeholder '{placeholder}' in endpoint '{endpoint}'")]
    MissingSubstitution {
        /// The unsatisfied `${name}` placeholder.
        placeholder: String,
        /// The endpoint template being built.
        endpoint: String,
    },

    /// Base64 content passed to the builder could not be decoded.
    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl BlueinkError {
    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BlueinkError::Api { status, .. } => Some(*status),
            BlueinkError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this error indicates a bad or missing API key.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            BlueinkError::MissingApiKey
                | BlueinkError::Api { status: 401, .. }
                | BlueinkError::Api { status: 403, .. }
        )
    }

    /// Returns true for errors raised by the payload builder before any
    /// network request was attempted.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            BlueinkError::Validation(_)
                | BlueinkError::DuplicateKey(_)
                | BlueinkError::UnknownDocument(_)
                | BlueinkError::UnknownSigner(_)
                | BlueinkError::NotATemplate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlueinkError::Api {
            status: 404,
            body: "{\"detail\":\"not found\"}".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): {\"detail\":\"not found\"}");
    }

    #[test]
    fn test_is_auth_error() {
        assert!(BlueinkError::MissingApiKey.is_auth_error());
        assert!(BlueinkError::Api {
            status: 401,
            body: String::new()
        }
        .is_auth_error());
        assert!(!BlueinkError::Api {
            status: 500,
            body: String::new()
        }
        .is_auth_error());
    }

    #[test]
    fn test_status_code() {
        let err = BlueinkError::Api {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(500));

        let validation = BlueinkError::Validation("missing name".to_string());
        assert_eq!(validation.status(), None);
        assert!(validation.is_validation_error());
    }

    #[test]
    fn test_missing_substitution_display() {
        let err = BlueinkError::MissingSubstitution {
            placeholder: "bundle_id".to_string(),
            endpoint: "/bundles/${bundle_id}/".to_string(),
        };
        assert!(err.to_string().contains("bundle_id"));
        assert!(err.to_string().contains("/bundles/${bundle_id}/"));
    }
}

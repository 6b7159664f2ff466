use thiserror::Error;

/// Top-level error type for the `atlas-api` crate.
///
/// Everything that can go wrong between issuing the request and holding a
/// parsed JSON document. `atlas-core` maps these into the user-facing
/// failure taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, body read, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body_preview: String },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    // ── Data ────────────────────────────────────────────────────────
    /// The body was not valid JSON, with a preview for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body_preview: String },
}

impl Error {
    /// Returns `true` if the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns `true` if no usable response was received
    /// (connect failure, DNS, reset connection, truncated body).
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Transport(e) => {
                !e.is_timeout() && (e.is_connect() || e.is_request() || e.is_body())
            }
            _ => false,
        }
    }

    /// Returns `true` for failures worth another attempt: anything that
    /// happened on the wire, including non-success statuses.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::Status { .. }
        )
    }
}

/// First 200 bytes of a body, on a char boundary.
pub(crate) fn preview(body: &str) -> String {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(150);
        let p = preview(&body);
        assert!(p.len() <= 200);
        assert!(p.chars().all(|c| c == 'é'));
    }

    #[test]
    fn timeout_variant_is_timeout() {
        let err = Error::Timeout { timeout_secs: 10 };
        assert!(err.is_timeout());
        assert!(!err.is_connectivity());
        assert!(err.is_transient());
    }

    #[test]
    fn client_build_failure_is_not_transient() {
        assert!(!Error::Client("no tls backend".into()).is_transient());
    }

    #[test]
    fn status_variant_is_transient() {
        let err = Error::Status {
            status: 503,
            body_preview: String::new(),
        };
        assert!(err.is_transient());
        assert!(!err.is_connectivity());
        assert_eq!(err.to_string(), "Request failed with status code 503");
    }
}

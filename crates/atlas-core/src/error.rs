// ── Core error types ──
//
// User-facing failure taxonomy for a fetch. Consumers never see reqwest
// errors or serde messages directly; `Display` is the message shown in the
// error view and `diagnostic()` carries the detail for the log.

use thiserror::Error;

/// Why a fetch produced no data. Every kind is equally retryable by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Transport ────────────────────────────────────────────────────
    #[error("Request timed out. Please check your internet connection and try again.")]
    Timeout { timeout_secs: u64 },

    #[error("Network error. Please check your internet connection and try again.")]
    Network { reason: String },

    // ── Data ─────────────────────────────────────────────────────────
    /// The payload was not a JSON array.
    #[error("Invalid data format received from API")]
    MalformedResponseShape { found: String },

    /// A record failed validation. Nothing from the fetch is published.
    #[error("Invalid country data structure")]
    MalformedRecordContent { index: usize, reason: String },

    #[error("Default country ({name}) not found in the data")]
    DefaultEntryMissing { name: String },

    // ── Catch-all ────────────────────────────────────────────────────
    #[error("{}", unknown_message(.detail))]
    Unknown { detail: String },
}

fn unknown_message(detail: &str) -> String {
    if detail.is_empty() {
        "Failed to fetch countries".into()
    } else {
        format!("Error: {detail}")
    }
}

impl CoreError {
    /// Detail for logs, beyond the user-facing message.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Timeout { timeout_secs } => format!("no response within {timeout_secs}s"),
            Self::Network { reason } => reason.clone(),
            Self::MalformedResponseShape { found } => format!("expected an array, found {found}"),
            Self::MalformedRecordContent { index, reason } => format!("record {index}: {reason}"),
            Self::DefaultEntryMissing { name } => format!("no record named {name:?}"),
            Self::Unknown { detail } => detail.clone(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<atlas_api::Error> for CoreError {
    fn from(err: atlas_api::Error) -> Self {
        if err.is_timeout() {
            let timeout_secs = match err {
                atlas_api::Error::Timeout { timeout_secs } => timeout_secs,
                _ => 0,
            };
            return CoreError::Timeout { timeout_secs };
        }
        if err.is_connectivity() {
            return CoreError::Network {
                reason: err.to_string(),
            };
        }
        match err {
            atlas_api::Error::Deserialization {
                message,
                body_preview,
            } => CoreError::MalformedResponseShape {
                found: format!("non-JSON body ({message}): {body_preview}"),
            },
            other => CoreError::Unknown {
                detail: other.to_string(),
            },
        }
    }
}

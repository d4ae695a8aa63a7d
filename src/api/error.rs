use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Login rejected by the auth service. User-correctable; surfaced verbatim.
    #[error("Login failed. Check your credentials.")]
    InvalidCredentials,

    /// Terminal outcome after a failed or skipped refresh, or a 401 on the
    /// retry attempt. Distinct from `RequestFailed` so callers can prompt
    /// for a fresh sign-in instead of suggesting a retry.
    #[error("Session expired - please sign in again")]
    Unauthenticated,

    /// Any other non-success status after the retry protocol completes.
    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // Back the cut off to a char boundary; a fixed byte offset can land
        // inside a multibyte character and panic the slice.
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    /// Map a terminal non-success status to an error. 401 is special-cased:
    /// by the time a response reaches this mapping the refresh protocol has
    /// already run, so an unauthorized status means the session is gone.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthenticated,
            _ => ApiError::RequestFailed {
                status: status.as_u16(),
                body: Self::truncate_body(body),
            },
        }
    }
}

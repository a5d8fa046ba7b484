use thiserror::Error;

/// Request-level failures: the root of the document could not be resolved.
///
/// Everything below the root degrades locally and is only logged.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Entry sequence does not start with a page marker")]
    MissingRoot,
    #[error("Page not found: {0}")]
    NotFound(String),
    #[error("Invalid page id: {0}")]
    InvalidId(String),
    #[error("Failed to decode entries: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RenderError {
    /// HTTP-style status for callers serving the rendered page.
    pub fn status(&self) -> u16 {
        match self {
            RenderError::NotFound(_) => 404,
            RenderError::InvalidId(_) => 400,
            RenderError::MissingRoot => 422,
            RenderError::Decode(_) => 400,
        }
    }

    /// Fixed user-facing message; internal detail stays in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            RenderError::NotFound(_) => "The requested page does not exist or is not shared.",
            RenderError::InvalidId(_) => "The requested page id is not valid.",
            RenderError::MissingRoot | RenderError::Decode(_) => {
                "The page content could not be read."
            }
        }
    }
}

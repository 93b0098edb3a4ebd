/// Failures at the catalog fetch boundary.
///
/// The shell maps transport errors into [`FetchError::Network`]; everything
/// else is decided by [`crate::query::interpret_response`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Country not found: {0}")]
    NotFound(String),

    #[error("Malformed response from {url}: {message}")]
    MalformedData { url: String, message: String },
}

use countries_core::FetchError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

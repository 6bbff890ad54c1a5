#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Response assembly failed (malformed header value or builder state).
    #[error("HTTP response error: {0}")]
    Http(#[from] http::Error),
}

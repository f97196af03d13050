pub use foremtools_core::error::ApiError;

/// Failure surfaced by the request layer.
///
/// `Api` is the structured error for any failed API call. `Decode` marks a
/// malformed body on a *successful* response, which the API contract says
/// cannot happen. It is a defect, not an API failure, so it stays a separate
/// variant instead of being folded into [`ApiError`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

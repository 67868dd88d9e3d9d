use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisagistError {
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("failed to load detector model: {0}")]
    ModelError(String),

    #[error("no face detected")]
    NoFaceDetected,

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned status {status}")]
    Api { status: u16 },

    #[error("malformed api response: {0}")]
    MalformedResponse(String),

    #[error("missing configuration key {0}")]
    MissingConfig(&'static str),
}

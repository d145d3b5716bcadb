use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElementSetError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("element set request failed with status {0}")]
    Status(u16),
    #[error("no element set for catalog id {0}")]
    NotFound(u32),
    #[error("invalid tle format: {0}")]
    InvalidFormat(String),
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("tle file read error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("epoch conversion failed: {0}")]
    Epoch(String),
    #[error("sgp4 failed: {0}")]
    Sgp4(String),
}


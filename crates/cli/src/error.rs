use dex2_decoder::SequenceError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Decode error: {0}")]
    DecodeError(#[from] dex2_decoder::Error),
    #[error("Sequence error: {0}")]
    SequenceError(#[from] SequenceError),
}

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum VectorizerError {
    /// `fit` was given no documents.
    #[error("cannot fit on an empty corpus")]
    EmptyCorpus,
    /// `transform` was called before a successful `fit`.
    #[error("vectorizer has not been fitted")]
    NotFitted,
    /// Deserialized state that breaks the vocabulary/weight alignment.
    #[error("corrupt vectorizer state: {0}")]
    Corrupt(&'static str),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[cfg(feature = "bincode")]
    #[error("failed to encode vectorizer: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[cfg(feature = "bincode")]
    #[error("failed to decode vectorizer: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("CSV filename required, got {}", .0.display())]
    InvalidExtension(PathBuf),
    #[error("{labels} labels supplied for {rows} rows")]
    LabelCountMismatch { rows: usize, labels: usize },
    #[error("{} could not be written: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write features: {0}")]
    Write(#[source] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = VectorizerError> = std::result::Result<T, E>;

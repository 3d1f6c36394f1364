use thiserror::Error;

/// Domain failures of the carousel.
///
/// I/O, parsing and GPU set-up go through `anyhow` with context instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("catalog must contain at least one entry")]
    EmptyCatalog,

    #[error("catalog entry name {0:?} is used more than once")]
    DuplicateEntry(String),

    #[error("index {index} is outside the catalog (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("glTF document contains no triangle geometry")]
    NoGeometry,
}

pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ViewerError::IndexOutOfRange { index: 7, len: 5 };
        assert_eq!(err.to_string(), "index 7 is outside the catalog (len 5)");

        let err = ViewerError::DuplicateEntry("Duck".into());
        assert!(err.to_string().contains("\"Duck\""));
    }
}

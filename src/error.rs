use thiserror::Error;

/// Main error type for vocabot
#[derive(Error, Debug)]
pub enum VocabotError {
    /// Vocabulary or config source missing/malformed. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A goto (or the default node) names a node absent from the vocabulary.
    /// Recoverable: the controller resets the session to the default node.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// A node has no renderable prompt. Recoverable the same way.
    #[error("No prompt in node: {0}")]
    MissingPrompt(String),

    /// Messaging gateway call failed
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Morphological normalizer call failed
    #[error("Normalizer error: {0}")]
    Normalizer(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type using VocabotError
pub type Result<T> = std::result::Result<T, VocabotError>;

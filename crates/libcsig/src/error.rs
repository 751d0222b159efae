use thiserror::Error;

/// Errors produced while preprocessing, parsing, or rendering a header.
#[derive(Error, Debug)]
pub enum CsigError {
    /// A type construct outside the supported subset (pointer chains,
    /// `const` qualification, named leaf types) appeared in a signature.
    #[error("Unsupported type kind: {0}")]
    UnsupportedTypeKind(String),

    /// A declaration was missing a piece the grammar guarantees, such as
    /// the declared name or an inner type.
    #[error("Malformed declaration: {0}")]
    MalformedDeclaration(String),

    /// The external C preprocessor could not be found.
    #[error("C preprocessor unavailable: {0}")]
    PreprocessorUnavailable(String),

    /// The C preprocessor ran but failed to expand the header.
    #[error("Failed to preprocess header: {0}")]
    Preprocess(String),

    /// The expanded header could not be parsed as C.
    #[error("Failed to parse C source: {0}")]
    Parse(String),

    /// Failed to read a header or write a listing.
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// Failed to serialize the parsed declarations.
    #[error("Failed to serialize declarations: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CsigError>;

//! Error types for the PDF export pipeline.
//!
//! Every failure either belongs to the caller (a missing field in the export
//! request) or to one of the three pipeline stages. See [`Stage`].

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Text wrapping and pagination
    Layout,
    /// Object graph construction
    Build,
    /// Byte emission and cross-reference accounting
    Serialize,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Layout => "layout",
            Stage::Build => "build",
            Stage::Serialize => "serialize",
        };
        f.write_str(name)
    }
}

/// Error types that can occur while exporting a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required request field was not supplied
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Export request could not be decoded
    #[error("Invalid export request: {0}")]
    InvalidRequest(String),

    /// Page geometry leaves no room for text
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// An object references an identifier that has no definition
    #[error("Object {from} references undefined object {target} 0 R")]
    UnresolvedReference {
        /// Identifier of the referencing object
        from: u32,
        /// Identifier that could not be resolved
        target: u32,
    },

    /// Object identifiers are not dense and ascending
    #[error("Object identifiers out of sequence: expected {expected}, found {found}")]
    NonSequentialObject {
        /// Identifier the writer expected next
        expected: u32,
        /// Identifier actually found
        found: u32,
    },

    /// Declared stream /Length disagrees with the stream data
    #[error("Stream length mismatch in object {id}: declared {declared}, actual {actual}")]
    StreamLengthMismatch {
        /// Stream object identifier
        id: u32,
        /// Value of the /Length entry
        declared: i64,
        /// Byte length of the stream data
        actual: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidRequest(err.to_string())
    }
}

impl Error {
    /// Pipeline stage that failed, or `None` for caller input errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::MissingField(_) | Error::InvalidRequest(_) => None,
            Error::InvalidGeometry(_) => Some(Stage::Layout),
            Error::StreamLengthMismatch { .. } => Some(Stage::Build),
            Error::UnresolvedReference { .. }
            | Error::NonSequentialObject { .. }
            | Error::Io(_) => Some(Stage::Serialize),
        }
    }

    /// Whether the caller is at fault.
    pub fn is_input_error(&self) -> bool {
        self.stage().is_none()
    }

    /// HTTP status an enclosing handler should answer with.
    pub fn http_status(&self) -> u16 {
        if self.is_input_error() {
            400
        } else {
            500
        }
    }
}

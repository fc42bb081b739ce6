//! Unified error handling for orbiter-props
//!
//! Every failure aborts the whole export. There is no partial-success mode,
//! so callers only need to tell the user which reference or path was wrong
//! and let them re-run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What kind of scene reference failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Object,
    Collection,
    Parent,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Object => "object",
            ResourceKind::Collection => "collection",
            ResourceKind::Parent => "parent object",
        };
        f.write_str(name)
    }
}

/// Unified error type for all orbiter-props operations
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Scene Errors ====================

    /// A configured object or collection name does not resolve in the scene
    #[error("{kind} not found: '{name}'")]
    ResourceNotFound {
        kind: ResourceKind,
        name: String,
    },

    /// A resolved object lacks data the export needs
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    // ==================== I/O Errors ====================

    /// I/O error tied to a specific path
    #[error("I/O error on {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==================== Parse Errors ====================

    /// Scene snapshot or settings file could not be deserialized
    #[error("Failed to parse {what}: {message}")]
    Parse {
        what: String,
        message: String,
    },

    // ==================== General Errors ====================

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Object name did not resolve
    pub fn object_not_found(name: impl Into<String>) -> Self {
        Error::ResourceNotFound {
            kind: ResourceKind::Object,
            name: name.into(),
        }
    }

    /// Collection name did not resolve
    pub fn collection_not_found(name: impl Into<String>) -> Self {
        Error::ResourceNotFound {
            kind: ResourceKind::Collection,
            name: name.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Attach a path to an I/O error
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(what: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::Parse {
            what: what.into(),
            message: message.to_string(),
        }
    }

    /// Strip any context wrappers
    pub fn root(&self) -> &Error {
        match self {
            Error::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Error::ResourceNotFound { .. })
    }

    /// Check if the scene or settings lacked required data
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.root(), Error::InvalidInput { .. } | Error::Parse { .. })
    }

    /// Check if this is a filesystem error
    pub fn is_io(&self) -> bool {
        matches!(self.root(), Error::IoAt { .. })
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_resource() {
        let err = Error::collection_not_found("RCS_FWD");
        assert_eq!(err.to_string(), "collection not found: 'RCS_FWD'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::object_not_found("Cage");
        let contextualized = err.with_context("while extracting collision cage");

        assert!(contextualized.to_string().contains("while extracting collision cage"));
        assert!(contextualized.to_string().contains("'Cage'"));
        assert!(contextualized.is_not_found());
    }

    #[test]
    fn test_classification() {
        assert!(Error::invalid_input("no mesh").is_invalid_input());
        assert!(!Error::invalid_input("no mesh").is_not_found());

        let io = Error::io_at("/nope/out.h", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(io.is_io());
        assert!(!io.is_not_found());
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::invalid_input("empty"));
        let err = result.context("settings").unwrap_err();
        assert_eq!(err.to_string(), "settings: Invalid input: empty");
    }
}

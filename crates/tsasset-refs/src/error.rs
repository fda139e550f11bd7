//! Reference resolution errors

use std::io;
use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Location of the directive that pointed at a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOrigin {
    /// File containing the directive
    pub file: PathBuf,
    /// 1-based line of the directive
    pub line: usize,
    /// Byte span of the referenced path within the whole file
    pub span: Range<usize>,
}

#[derive(Debug, Error)]
pub enum RefError {
    /// An entry or referenced file could not be read
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        /// `None` for the entry file
        origin: Option<ReferenceOrigin>,
        #[source]
        source: io::Error,
    },
    /// A relative path could not be made absolute
    #[error("cannot resolve '{}' against the current directory: {source}", path.display())]
    CurrentDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RefError {
    /// Directive location for read failures of referenced files
    pub fn origin(&self) -> Option<&ReferenceOrigin> {
        match self {
            RefError::FileRead { origin, .. } => origin.as_ref(),
            RefError::CurrentDir { .. } => None,
        }
    }
}

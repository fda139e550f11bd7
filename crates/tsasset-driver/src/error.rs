//! Driver error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tsasset_refs::RefError;

#[derive(Debug, Error)]
pub enum DriverError {
    /// Reference discovery or rewriting failed
    #[error(transparent)]
    References(#[from] RefError),

    /// The compiler rejected a source file
    #[error("Typescript error in file '{}':\n{message}", path.display())]
    Compile { path: PathBuf, message: String },

    /// A project build failed; holds stderr followed by stdout
    #[error("{0}")]
    ProjectBuild(String),

    #[error("failed to read manifest '{}': {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Not JSON, or `compilerOptions.outFile` / `files` missing
    #[error("invalid manifest '{}': {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to launch compiler: {0}")]
    Launch(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no compile step for '{}'", .0.display())]
    UnknownAsset(PathBuf),
}

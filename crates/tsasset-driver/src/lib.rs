//! tsasset compile driver
//!
//! Asset-pipeline side of TypeScript compilation: registers reference
//! dependencies with a tracker, hands rewritten sources to an external
//! compiler, and builds `tsconfig`-style projects.

pub mod asset;
pub mod compiler;
pub mod error;
pub mod manifest;
pub mod options;
pub mod orchestrator;
pub mod tracker;

pub use asset::AssetKind;
pub use compiler::{Compiler, ProjectBuildOutput, TscCompiler};
pub use error::DriverError;
pub use manifest::{find_output_file, ProjectManifest};
pub use options::CompilerOptions;
pub use orchestrator::{CompileResult, Compiled, Orchestrator};
pub use tracker::{DependencySet, DependencyTracker};

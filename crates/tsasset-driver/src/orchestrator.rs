//! Compile orchestration
//!
//! Ties reference discovery, reference rewriting and the external compiler
//! together for the two ways an asset is compiled:
//!
//! - a single source: dependencies come from its reference directives,
//!   the rewritten text goes through [`Compiler::translate`];
//! - a project manifest: dependencies are the manifest's explicit `files`,
//!   the compiler builds the project and its `outFile` is read back.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use tsasset_refs::{discover_references, rewrite_relative_references, VisitedSet};

use crate::asset::AssetKind;
use crate::compiler::Compiler;
use crate::error::DriverError;
use crate::manifest::find_output_file;
use crate::options::CompilerOptions;
use crate::tracker::{DependencySet, DependencyTracker};

/// Outcome of a project build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub success: bool,
    /// Contents of the output file, if the build left one behind
    pub js: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

/// Emitted JavaScript together with everything it was built from
#[derive(Debug, Clone)]
pub struct Compiled {
    pub js: String,
    pub dependencies: DependencySet,
}

pub struct Orchestrator<C> {
    compiler: C,
    options: CompilerOptions,
}

impl<C: Compiler> Orchestrator<C> {
    pub fn new(compiler: C, options: CompilerOptions) -> Self {
        Self { compiler, options }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile one TypeScript source.
    ///
    /// With a tracker, every file reachable through reference directives of
    /// the unrewritten `source` is reported first. `options` are appended to
    /// the configured defaults.
    pub fn compile(
        &self,
        path: &Path,
        source: &str,
        tracker: Option<&mut dyn DependencyTracker>,
        options: &[String],
    ) -> Result<String, DriverError> {
        if let Some(tracker) = tracker {
            let mut visited = VisitedSet::new();
            discover_references(path, Some(source), &mut visited, |found| {
                tracker.depend_on(found)
            })?;
        }

        let rewritten = rewrite_relative_references(path, source)?;
        let args = self.options.merged(options);

        debug!(path = %path.display(), ?args, "compiling source");
        self.compiler
            .translate(&rewritten, &args)
            .map_err(|message| DriverError::Compile {
                path: path.to_path_buf(),
                message,
            })
    }

    /// Read `path`, compile it and collect its dependencies
    pub fn compile_with_dependencies(
        &self,
        path: &Path,
        options: &[String],
    ) -> Result<Compiled, DriverError> {
        let source = read_file(path)?;
        let mut dependencies = DependencySet::new();
        let js = self.compile(path, &source, Some(&mut dependencies), options)?;
        Ok(Compiled { js, dependencies })
    }

    /// Build a project and return its combined output.
    ///
    /// `Ok(None)` means the build succeeded but left no output file. A failed
    /// build surfaces the compiler's stderr followed by its stdout.
    pub fn compile_project(
        &self,
        manifest_path: &Path,
        tracker: &mut dyn DependencyTracker,
    ) -> Result<Option<String>, DriverError> {
        info!("Compiling {}", manifest_path.display());
        let result = self.compile_project_file(manifest_path, tracker)?;

        if !result.success {
            return Err(DriverError::ProjectBuild(result.stderr + &result.stdout));
        }
        if result.js.is_none() {
            warn!(manifest = %manifest_path.display(), "project build produced no output file");
        }
        Ok(result.js)
    }

    /// Build a project without turning a failed build into an error
    pub fn compile_project_file(
        &self,
        manifest_path: &Path,
        tracker: &mut dyn DependencyTracker,
    ) -> Result<CompileResult, DriverError> {
        let manifest = find_output_file(manifest_path)?;

        let mut seen = HashSet::new();
        for file in &manifest.files {
            if seen.insert(file) {
                tracker.depend_on(file);
            }
        }

        let output = self
            .compiler
            .build_project(manifest_path)
            .map_err(DriverError::Launch)?;

        let js = if manifest.out_file.exists() {
            Some(read_file(&manifest.out_file)?)
        } else {
            None
        };

        Ok(CompileResult {
            success: output.success,
            js,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Pipeline entry point: compile whatever `path` is, by its extension
    pub fn process(
        &self,
        path: &Path,
        tracker: &mut dyn DependencyTracker,
    ) -> Result<Option<String>, DriverError> {
        match AssetKind::from_path(path) {
            Some(AssetKind::Script) => {
                let source = read_file(path)?;
                self.compile(path, &source, Some(tracker), &[]).map(Some)
            }
            Some(AssetKind::Project) => self.compile_project(path, tracker),
            None => Err(DriverError::UnknownAsset(path.to_path_buf())),
        }
    }
}

fn read_file(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: PathBuf::from(path),
        source,
    })
}

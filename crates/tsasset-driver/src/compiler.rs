//! External TypeScript compiler
//!
//! The driver never parses TypeScript itself. [`Compiler`] is the seam to
//! whatever turns source text into JavaScript; [`TscCompiler`] runs the
//! `tsc` command-line compiler as a child process.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Captured result of a project build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBuildOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

pub trait Compiler {
    /// Compile a single source text. The error is the compiler's message.
    fn translate(&self, source: &str, options: &[String]) -> Result<String, String>;

    /// Build a project from its manifest, e.g. `tsc --project <manifest>`
    fn build_project(&self, manifest: &Path) -> io::Result<ProjectBuildOutput>;
}

/// Runs `tsc` as a child process
#[derive(Debug, Clone)]
pub struct TscCompiler {
    program: PathBuf,
}

impl TscCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find the compiler to run for files under `start`.
    ///
    /// Checks the `TSASSET_TSC` environment variable, then
    /// `node_modules/.bin/tsc` in `start` and each of its ancestors, and
    /// finally falls back to `tsc` on `PATH`.
    pub fn locate(start: &Path) -> Self {
        if let Ok(env_path) = env::var("TSASSET_TSC") {
            let p = PathBuf::from(env_path);
            if p.exists() {
                return Self::new(p);
            }
        }

        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join("node_modules").join(".bin").join("tsc");
            if candidate.is_file() {
                return Self::new(candidate);
            }
            current = dir.parent();
        }

        Self::new("tsc")
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Compiler for TscCompiler {
    fn translate(&self, source: &str, options: &[String]) -> Result<String, String> {
        let scratch = tempfile::Builder::new()
            .prefix("tsasset")
            .tempdir()
            .map_err(|e| format!("Failed to create scratch directory: {}", e))?;
        let input = scratch.path().join("input.ts");
        let output = scratch.path().join("output.js");

        fs::write(&input, source)
            .map_err(|e| format!("Failed to write {}: {}", input.display(), e))?;

        debug!(program = %self.program.display(), ?options, "running compiler");
        let result = Command::new(&self.program)
            .args(options)
            .arg("--outFile")
            .arg(&output)
            .arg(&input)
            .output()
            .map_err(|e| format!("Failed to run {}: {}", self.program.display(), e))?;

        if !result.status.success() {
            // tsc reports diagnostics on stdout
            let mut message = String::from_utf8_lossy(&result.stdout).into_owned();
            message.push_str(&String::from_utf8_lossy(&result.stderr));
            if message.trim().is_empty() {
                message = format!("{} exited with status: {}", self.program.display(), result.status);
            }
            return Err(message);
        }

        fs::read_to_string(&output)
            .map_err(|e| format!("Compiler produced no output at {}: {}", output.display(), e))
    }

    fn build_project(&self, manifest: &Path) -> io::Result<ProjectBuildOutput> {
        debug!(program = %self.program.display(), manifest = %manifest.display(), "running project build");
        let result = Command::new(&self.program)
            .arg("--project")
            .arg(manifest)
            .output()?;

        Ok(ProjectBuildOutput {
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            success: result.status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_finds_local_node_modules() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("tsc"), "").unwrap();
        let nested = dir.path().join("app/assets/javascripts");
        fs::create_dir_all(&nested).unwrap();

        // Only meaningful when the override isn't set in the environment.
        if env::var("TSASSET_TSC").is_err() {
            let tsc = TscCompiler::locate(&nested);
            assert_eq!(tsc.program(), bin.join("tsc"));
        }
    }

    #[test]
    fn test_launch_failure_is_reported() {
        let tsc = TscCompiler::new("/definitely/not/a/real/tsc");
        let err = tsc.translate("let x = 1;", &[]).unwrap_err();
        assert!(err.contains("Failed to run"));
        assert!(tsc.build_project(Path::new("tsconfig.json")).is_err());
    }
}

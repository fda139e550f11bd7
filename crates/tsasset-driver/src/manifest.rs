//! Project manifest (tsconfig) reader
//!
//! Only the two fields a combined project build needs are read:
//! `compilerOptions.outFile` and the explicit `files` list. Both are
//! relative to the manifest's own directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tsasset_refs::{absolute_path, normalize_path};

use crate::error::DriverError;

#[derive(Debug, Deserialize)]
struct TsConfigJson {
    #[serde(rename = "compilerOptions")]
    compiler_options: TsConfigCompilerOptions,
    files: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TsConfigCompilerOptions {
    #[serde(rename = "outFile")]
    out_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectManifest {
    /// Absolute path of the manifest itself
    pub path: PathBuf,
    /// Absolute path of the combined output file
    pub out_file: PathBuf,
    /// Absolute input paths, in manifest order
    pub files: Vec<PathBuf>,
}

impl ProjectManifest {
    /// Parse manifest text as if it were read from `manifest_path`
    pub fn parse(manifest_path: &Path, content: &str) -> Result<Self, DriverError> {
        let path = absolute_path(manifest_path)?;
        let json: TsConfigJson =
            serde_json::from_str(content).map_err(|source| DriverError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        let base = path.parent().unwrap_or(path.as_path()).to_path_buf();
        let out_file = normalize_path(&base.join(&json.compiler_options.out_file));
        let files = json
            .files
            .iter()
            .map(|file| normalize_path(&base.join(file)))
            .collect();

        Ok(Self {
            path,
            out_file,
            files,
        })
    }
}

/// Read a manifest and resolve its output file and inputs
pub fn find_output_file(manifest_path: &Path) -> Result<ProjectManifest, DriverError> {
    let content = fs::read_to_string(manifest_path).map_err(|source| DriverError::ManifestRead {
        path: manifest_path.to_path_buf(),
        source,
    })?;

    ProjectManifest::parse(manifest_path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_against_manifest_dir() {
        let manifest = ProjectManifest::parse(
            Path::new("/proj/app/tsconfig.json"),
            r#"{
                "compilerOptions": { "outFile": "../build/app.js", "target": "ES5" },
                "files": ["main.ts", "./lib/util.ts", "../shared/types.ts"]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.path, PathBuf::from("/proj/app/tsconfig.json"));
        assert_eq!(manifest.out_file, PathBuf::from("/proj/build/app.js"));
        assert_eq!(
            manifest.files,
            vec![
                PathBuf::from("/proj/app/main.ts"),
                PathBuf::from("/proj/app/lib/util.ts"),
                PathBuf::from("/proj/shared/types.ts"),
            ]
        );
    }

    #[test]
    fn test_missing_fields_are_parse_errors() {
        let path = Path::new("/proj/tsconfig.json");
        for content in [
            r#"{ "files": ["a.ts"] }"#,
            r#"{ "compilerOptions": {}, "files": ["a.ts"] }"#,
            r#"{ "compilerOptions": { "outFile": "out.js" } }"#,
            r#"{ "compilerOptions": { "outFile": "out.js" }, "files": "a.ts" }"#,
            "not json",
        ] {
            let err = ProjectManifest::parse(path, content).unwrap_err();
            assert!(
                matches!(err, DriverError::ManifestParse { .. }),
                "Expected ManifestParse for {:?}, got {:?}",
                content,
                err
            );
        }
    }

    #[test]
    fn test_unreadable_manifest() {
        let err = find_output_file(Path::new("/definitely/missing/tsconfig.json")).unwrap_err();
        assert!(matches!(err, DriverError::ManifestRead { .. }));
    }
}

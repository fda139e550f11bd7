//! Asset kinds the driver knows how to compile

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// A single TypeScript source (`.ts`, `.mts`, `.cts`)
    Script,
    /// A project manifest (`*.tsconfig`, `tsconfig*.json`)
    Project,
}

impl AssetKind {
    /// Pick the compile step for a path. Declaration files produce no output
    /// and are not assets.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("tsconfig") => Some(AssetKind::Project),
            Some("json") if name.starts_with("tsconfig") => Some(AssetKind::Project),
            Some("ts") | Some("mts") | Some("cts") => {
                if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
                    None
                } else {
                    Some(AssetKind::Script)
                }
            }
            _ => None,
        }
    }
}

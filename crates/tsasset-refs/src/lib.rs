//! Triple-slash reference resolution for TypeScript sources
//!
//! Scans `/// <reference path="..." />` directives, rewrites relative
//! reference paths to absolute ones, and walks the transitive reference
//! closure of an entry file so callers can record every file a compiled
//! output depends on.

pub mod directive;
pub mod discover;
pub mod error;
pub mod path;
pub mod rewrite;

pub use directive::{parse_directive, scan_directives, ReferenceDirective};
pub use discover::{collect_references, discover_references, VisitedSet};
pub use error::{RefError, ReferenceOrigin};
pub use path::{absolute_path, normalize_path};
pub use rewrite::rewrite_relative_references;

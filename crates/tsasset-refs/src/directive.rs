//! Reference directive scanning
//!
//! A directive is a line of the form
//!
//! ```text
//! /// <reference path="relative/or/absolute.ts" />
//! ```
//!
//! Either quote style is accepted. Paths written back by
//! [`rewrite_relative_references`](crate::rewrite_relative_references) may
//! contain `\\` or a backslash before the directive's own quote character;
//! those pairs decode to the bare character. Every other backslash is taken
//! literally.

use std::ops::Range;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::path::normalize_path;

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^///\s*<reference\s+path=(?:"((?:[^"\\]|\\.)+)"|'((?:[^'\\]|\\.)+)')\s*/>"#)
        .unwrap()
});

/// A single `/// <reference path=... />` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDirective {
    /// 1-based line number
    pub line: usize,
    /// Byte offset of the line within the source
    pub line_start: usize,
    /// Byte span of the captured path within the line (quotes excluded)
    pub span: Range<usize>,
    /// Quote character used by the directive
    pub quote: char,
    /// Captured text exactly as written
    pub raw: String,
    /// Captured text with escapes decoded
    pub path: String,
}

impl ReferenceDirective {
    /// Absolute target of this directive, relative to the containing file's directory
    pub fn resolve(&self, from_dir: &Path) -> PathBuf {
        normalize_path(&from_dir.join(&self.path))
    }

    /// Byte span of the captured path within the whole source
    pub fn source_span(&self) -> Range<usize> {
        self.line_start + self.span.start..self.line_start + self.span.end
    }

    pub fn is_absolute(&self) -> bool {
        Path::new(&self.path).is_absolute()
    }
}

/// Parse a single line. Line number and offset are reported as line 1 at offset 0.
pub fn parse_directive(line: &str) -> Option<ReferenceDirective> {
    if !line.starts_with("///") {
        return None;
    }
    let caps = DIRECTIVE_RE.captures(line)?;
    let (capture, quote) = match (caps.get(1), caps.get(2)) {
        (Some(m), _) => (m, '"'),
        (None, Some(m)) => (m, '\''),
        (None, None) => return None,
    };

    Some(ReferenceDirective {
        line: 1,
        line_start: 0,
        span: capture.range(),
        quote,
        raw: capture.as_str().to_string(),
        path: decode_escapes(capture.as_str(), quote),
    })
}

/// All directives of a source, in line order
pub fn scan_directives(source: &str) -> Vec<ReferenceDirective> {
    let mut directives = Vec::new();
    let mut offset = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        if let Some(mut directive) = parse_directive(line) {
            directive.line = index + 1;
            directive.line_start = offset;
            directives.push(directive);
        }
        offset += line.len();
    }

    directives
}

/// Backslash-escape what would end or corrupt a path quoted with `quote`
pub(crate) fn escape_path_text(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == quote || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn decode_escapes(raw: &str, quote: char) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == quote || next == '\\' {
                    decoded.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        decoded.push(c);
    }

    decoded
}

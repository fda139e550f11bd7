//! Relative reference rewriting
//!
//! The compiler is handed the source text rather than the file, so relative
//! reference paths would resolve against the wrong directory. Each directive's
//! captured path is rewritten to an absolute one, anchored at the directory of
//! the file the source came from.

use std::path::Path;

use tracing::debug;

use crate::directive::{escape_path_text, parse_directive};
use crate::error::RefError;
use crate::path::absolute_path;

/// Replace relative paths in reference directives with absolute ones.
///
/// Only the captured path of each matching line changes; line count, order
/// and line terminators are preserved byte for byte. Directives that already
/// name an absolute path are left as they are.
pub fn rewrite_relative_references(path: &Path, source: &str) -> Result<String, RefError> {
    let file = absolute_path(path)?;
    let dir = file.parent().unwrap_or(file.as_path());
    let dir_text = dir.to_string_lossy();

    let mut output = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        let Some(directive) = parse_directive(line) else {
            output.push_str(line);
            continue;
        };
        if directive.is_absolute() {
            output.push_str(line);
            continue;
        }

        let escaped_dir = escape_path_text(&dir_text, directive.quote);
        let joined = join_path_text(&escaped_dir, &directive.raw);
        debug!(file = %file.display(), from = %directive.raw, to = %joined, "rewrote reference");

        output.push_str(&line[..directive.span.start]);
        output.push_str(&joined);
        output.push_str(&line[directive.span.end..]);
    }

    Ok(output)
}

fn join_path_text(dir: &str, relative: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, relative)
    } else {
        format!("{}/{}", dir, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::scan_directives;

    #[test]
    fn test_no_directives_is_identity() {
        let sources = [
            "",
            "let x = 1;",
            "let x = 1;\r\nlet y = 2;\n\n// <reference path=\"a.ts\" />\r\n",
            "/// just a doc comment\nfunction f() {}\n",
        ];
        for source in sources {
            let out = rewrite_relative_references(Path::new("/p/a/main.ts"), source).unwrap();
            assert_eq!(out, source);
        }
    }

    #[test]
    fn test_rewrites_against_file_directory() {
        let source = "/// <reference path=\"b.ts\" />\n/// <reference path='../lib/c.ts' />\nlet x = 1;\n";
        let out = rewrite_relative_references(Path::new("/p/a/main.ts"), source).unwrap();

        assert_eq!(
            out,
            "/// <reference path=\"/p/a/b.ts\" />\n/// <reference path='/p/a/../lib/c.ts' />\nlet x = 1;\n"
        );
    }

    #[test]
    fn test_preserves_mixed_line_endings() {
        let source = "/// <reference path=\"b.ts\" />\r\nlet x = 1;\n/// <reference path=\"c.ts\" />\r\n/// <reference path=\"d.ts\" />";
        let out = rewrite_relative_references(Path::new("/p/main.ts"), source).unwrap();

        assert_eq!(
            out,
            "/// <reference path=\"/p/b.ts\" />\r\nlet x = 1;\n/// <reference path=\"/p/c.ts\" />\r\n/// <reference path=\"/p/d.ts\" />"
        );
        assert_eq!(out.lines().count(), source.lines().count());
    }

    #[test]
    fn test_absolute_reference_untouched() {
        let source = "/// <reference path=\"/lib/x.ts\" />\n";
        let out = rewrite_relative_references(Path::new("/p/main.ts"), source).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_substitutes_capture_not_first_occurrence() {
        // The captured text also appears earlier in the line.
        let source = "///<reference path=\"reference\" />\n";
        let out = rewrite_relative_references(Path::new("/p/main.ts"), source).unwrap();
        assert_eq!(out, "///<reference path=\"/p/reference\" />\n");
    }

    #[test]
    fn test_apostrophe_directory_in_double_quotes_is_not_escaped() {
        let source = "/// <reference path=\"lib/a.ts\" />\n";
        let out = rewrite_relative_references(Path::new("/home/o'brien/main.ts"), source).unwrap();
        assert_eq!(out, "/// <reference path=\"/home/o'brien/lib/a.ts\" />\n");
    }

    #[test]
    fn test_double_quote_directory_in_single_quotes_is_not_escaped() {
        let source = "/// <reference path='lib/a.ts' />\n";
        let out = rewrite_relative_references(Path::new("/tmp/q\"uote/main.ts"), source).unwrap();
        assert_eq!(out, "/// <reference path='/tmp/q\"uote/lib/a.ts' />\n");
    }

    #[test]
    fn test_escaped_directory_round_trips() {
        for dir in [r#"/tmp/q"uote"#, r"/tmp/back\slash", "/tmp/it's"] {
            for quote in ['"', '\''] {
                let source = format!("/// <reference path={q}lib/a.ts{q} />\n", q = quote);
                let file = Path::new(dir).join("main.ts");
                let out = rewrite_relative_references(&file, &source).unwrap();

                let found = scan_directives(&out);
                assert_eq!(found.len(), 1, "lost directive in {:?}", out);
                assert_eq!(found[0].path, format!("{}/lib/a.ts", dir));
                assert_eq!(found[0].quote, quote);
            }
        }
    }
}

//! Source coordinates for byte offsets into preprocessed C source.
//!
//! The preprocessor collapses every `#include` into a single stream and
//! records the original coordinates in linemarkers (`# 12 "gl.h"` in GNU
//! form, or `#line 12 "gl.h"`). Parser spans point into that stream, so
//! mapping a span back to a header location means replaying the markers up
//! to the offset.

/// Resolve `offset` within preprocessed `source` to `file:line:column`.
///
/// `fallback_file` is used until the first linemarker names a file, and
/// throughout for source that was never preprocessed. Columns are
/// one-based byte columns.
pub(crate) fn location_for_offset(source: &str, offset: usize, fallback_file: &str) -> String {
    let mut file = fallback_file.to_string();
    let mut line: usize = 1;
    let mut pos: usize = 0;

    for raw in source.split_inclusive('\n') {
        let end = pos + raw.len();
        if offset < end {
            let column = offset - pos + 1;
            return format!("{file}:{line}:{column}");
        }
        match parse_linemarker(raw) {
            Some((marked_file, marked_line)) => {
                if let Some(marked_file) = marked_file {
                    file = marked_file;
                }
                line = marked_line;
            }
            None => line += 1,
        }
        pos = end;
    }

    format!("{file}:{line}:1")
}

/// Parse a linemarker, returning the named file (if any) and the line
/// number the *next* source line corresponds to.
fn parse_linemarker(raw: &str) -> Option<(Option<String>, usize)> {
    let rest = raw.trim_end().strip_prefix('#')?;
    let rest = rest.strip_prefix("line").unwrap_or(rest);
    let rest = rest.trim_start();

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let line: usize = rest[..digits_end].parse().ok()?;

    let rest = rest[digits_end..].trim_start();
    let file = match rest.strip_prefix('"') {
        Some(rest) => Some(rest.split_once('"')?.0.to_string()),
        None => None,
    };
    Some((file, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_source() {
        let source = "int a;\nint b;\n";
        assert_eq!(location_for_offset(source, 0, "in.h"), "in.h:1:1");
        assert_eq!(location_for_offset(source, 4, "in.h"), "in.h:1:5");
        assert_eq!(location_for_offset(source, 7, "in.h"), "in.h:2:1");
    }

    #[test]
    fn test_offset_past_end() {
        let source = "int a;\n";
        assert_eq!(location_for_offset(source, 100, "in.h"), "in.h:2:1");
    }

    #[test]
    fn test_gnu_linemarkers() {
        let source = "# 1 \"gl.h\"\nint a;\n# 40 \"gl.h\" 2\nint b;\nint c;\n";
        let a = source.find("int a").unwrap();
        let b = source.find("int b").unwrap();
        let c = source.find("int c").unwrap();
        assert_eq!(location_for_offset(source, a, "in.h"), "gl.h:1:1");
        assert_eq!(location_for_offset(source, b, "in.h"), "gl.h:40:1");
        assert_eq!(location_for_offset(source, c, "in.h"), "gl.h:41:1");
    }

    #[test]
    fn test_line_directive() {
        let source = "#line 7 \"def.h\"\nint a;\n";
        let a = source.find("int a").unwrap();
        assert_eq!(location_for_offset(source, a, "in.h"), "def.h:7:1");
    }

    #[test]
    fn test_line_directive_without_file() {
        let source = "# 1 \"gl.h\"\n#line 9\nint a;\n";
        let a = source.find("int a").unwrap();
        assert_eq!(location_for_offset(source, a, "in.h"), "gl.h:9:1");
    }

    #[test]
    fn test_pragma_counts_as_source_line() {
        let source = "#pragma once\nint a;\n";
        let a = source.find("int a").unwrap();
        assert_eq!(location_for_offset(source, a, "in.h"), "in.h:2:1");
    }
}

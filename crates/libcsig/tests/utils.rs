// Integration test crates use disjoint subsets of these helpers.
#![allow(dead_code)]

use std::fs;

use libcsig::{Csig, Renderer, Result, SourceUnit};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Parse `source` as an already-preprocessed header and lower it.
pub fn inspect_source(source: &str) -> SourceUnit {
    let temp_dir = TempDir::new().unwrap();
    let header = temp_dir.path().join("input.h");
    fs::write(&header, source).unwrap();
    Csig::new()
        .with_preprocess(false)
        .inspect(&header)
        .unwrap()
}

/// Render `source` with `renderer`, returning the render result and the
/// captured diagnostics.
pub fn render_source(renderer: &Renderer, source: &str) -> (Result<String>, String) {
    let unit = inspect_source(source);
    let mut diagnostics = Vec::new();
    let result = renderer.render(&unit, &mut diagnostics);
    (result, String::from_utf8(diagnostics).unwrap())
}

fn normalize(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render roundtrip: `source` renders to exactly the lines of `expected`,
/// compared with indentation and blank lines stripped.
pub fn rt(source: &str, expected: &str) {
    let (result, _) = render_source(&Renderer::default(), source);
    assert_eq!(normalize(&result.unwrap()), normalize(expected));
}

/// Rendering `source` must fail with exactly `expected_error`.
pub fn rt_err(source: &str, expected_error: &str) {
    let (result, _) = render_source(&Renderer::default(), source);
    match result {
        Ok(listing) => panic!("expected an error, but rendering produced:\n{listing}"),
        Err(error) => assert_eq!(error.to_string(), expected_error),
    }
}

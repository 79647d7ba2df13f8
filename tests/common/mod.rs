//! Shared helpers for jsx-extract integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use jsx_extract::extract::BindingSet;
use jsx_extract::{wrap_with_component, ProcessedSelection};

/// Target path used by most scenarios; names the component `Source`
pub const SOURCE_PATH: &str = "/folder/source.js";

/// Extract `fragment` into the `Source` component
pub fn extract(fragment: &str) -> ProcessedSelection {
    wrap_with_component(Path::new(SOURCE_PATH), fragment)
        .unwrap_or_else(|e| panic!("extraction of {:?} failed: {}", fragment, e))
}

/// Binding names in insertion order
pub fn names(set: &BindingSet) -> Vec<&str> {
    set.iter().collect()
}

/// Temporary file with the given extension and contents
pub fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

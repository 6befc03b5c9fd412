//! Mapping from `.proto` files to the crates holding their generated messages.
//!
//! The mapping file is the one the protobuf Rust build tooling writes next to
//! its output: newline-delimited groups of
//!
//! ```text
//! <crate name>
//! <number of files N>
//! <file 1>
//! ...
//! <file N>
//! ```
//!
//! Empty lines are ignored.

use crate::error::{CodegenError, CodegenResult};
use std::collections::HashMap;
use std::path::Path;

/// Lookup table from import path to crate name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateMapping {
    crate_by_file: HashMap<String, String>,
}

impl CrateMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a mapping file.
    pub fn from_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| CodegenError::FileReadFailure {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mapping = Self::parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            files = mapping.len(),
            "loaded crate mapping"
        );
        Ok(mapping)
    }

    /// Parse the contents of a mapping file.
    pub fn parse(contents: &str) -> CodegenResult<Self> {
        let mut mapping = Self::new();
        let mut lines = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        while let Some(crate_name) = lines.next() {
            let count_line = lines.next().ok_or_else(|| {
                CodegenError::MalformedMappingFile(format!(
                    "missing file count for crate `{crate_name}`"
                ))
            })?;
            let count: usize = count_line.parse().map_err(|_| {
                CodegenError::MalformedMappingFile(format!(
                    "couldn't parse number of import paths for crate `{crate_name}`: `{count_line}`"
                ))
            })?;

            for i in 0..count {
                let file = lines.next().ok_or_else(|| {
                    CodegenError::MalformedMappingFile(format!(
                        "crate `{crate_name}` lists {count} files but only {i} are present"
                    ))
                })?;
                mapping.insert(file, crate_name);
            }
        }

        Ok(mapping)
    }

    /// Map `file` to `crate_name`. The first mapping recorded for a file wins.
    pub fn insert(&mut self, file: impl Into<String>, crate_name: impl Into<String>) {
        self.crate_by_file
            .entry(file.into())
            .or_insert_with(|| crate_name.into());
    }

    /// Name of the crate that owns `file`.
    pub fn crate_for(&self, file: &str) -> Option<&str> {
        self.crate_by_file.get(file).map(String::as_str)
    }

    /// Number of mapped files
    pub fn len(&self) -> usize {
        self.crate_by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crate_by_file.is_empty()
    }
}

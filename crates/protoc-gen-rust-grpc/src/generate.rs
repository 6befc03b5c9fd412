//! Standalone generation from a serialized `FileDescriptorSet`.
//!
//! Produce the set with
//! `protoc --include_imports --include_source_info --descriptor_set_out=<FILE>`.

use crate::plugin::generate_files;
use anyhow::{Context, Result};
use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Generate service files from `descriptor_set` into `out_dir`.
///
/// With an empty `files` list the root files of the set are generated, the
/// ones no other file in the set imports. Imported files then need a crate
/// mapping, as they would when named to protoc.
pub fn run(descriptor_set: &Path, out_dir: &Path, files: &[String], parameter: &str) -> Result<()> {
    let bytes = fs::read(descriptor_set)
        .with_context(|| format!("Failed to read descriptor set: {}", descriptor_set.display()))?;
    let set = FileDescriptorSet::decode(bytes.as_slice())
        .with_context(|| format!("Invalid descriptor set: {}", descriptor_set.display()))?;

    let files_to_generate = if files.is_empty() {
        root_files(&set.file)
    } else {
        files.to_vec()
    };
    tracing::debug!(files = ?files_to_generate, "selected files to generate");

    let generated = generate_files(&set.file, &files_to_generate, parameter)?;

    for file in &generated {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Generated {}", path.display());
    }

    if generated.is_empty() {
        println!("No services found; nothing generated");
    }

    Ok(())
}

/// Files of the set that no other file in it lists as a dependency.
pub fn root_files(files: &[FileDescriptorProto]) -> Vec<String> {
    let imported: HashSet<&str> = files
        .iter()
        .flat_map(|f| f.dependency.iter().map(String::as_str))
        .collect();
    files
        .iter()
        .map(|f| f.name())
        .filter(|name| !imported.contains(name))
        .map(str::to_string)
        .collect()
}

//! Generator options
//!
//! Options arrive from the host as a single parameter string of comma-separated
//! `key=value` pairs, e.g. `message_module_path=crate::pb,crate_mapping=out/crate_mapping.txt`.
//! They are parsed once per invocation and are read-only afterwards.

use crate::crate_mapping::CrateMapping;
use crate::error::{CodegenError, CodegenResult};
use crate::naming::is_keyword;
use std::collections::BTreeSet;

/// Module path meaning "the same module as the generated service code".
pub const SELF_MODULE_PATH: &str = "self";

/// Options controlling service generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Path of the module holding the generated message types.
    message_module_path: String,

    /// Crates owning messages from files outside the current crate.
    crate_mapping: CrateMapping,

    /// Files whose messages are generated into the current crate.
    files_in_current_crate: BTreeSet<String>,

    /// Emit the client module
    build_client: bool,

    /// Emit the server module
    build_server: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            message_module_path: SELF_MODULE_PATH.to_string(),
            crate_mapping: CrateMapping::default(),
            files_in_current_crate: BTreeSet::new(),
            build_client: true,
            build_server: true,
        }
    }
}

impl GenerationOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a generator parameter string.
    ///
    /// Recognized keys are `message_module_path`, `crate_mapping` (path of a
    /// mapping file, read immediately), `build_client` and `build_server`.
    /// Unknown keys are rejected.
    pub fn parse(parameter: &str) -> CodegenResult<Self> {
        let mut options = Self::default();

        for (key, value) in parse_generator_parameter(parameter)? {
            match key {
                "message_module_path" => {
                    options = options.with_message_module_path(value)?;
                }
                "crate_mapping" => {
                    if value.is_empty() {
                        return Err(CodegenError::InvalidParameters(
                            "`crate_mapping` requires a file path".to_string(),
                        ));
                    }
                    options.crate_mapping = CrateMapping::from_file(value)?;
                }
                "build_client" => options.build_client = parse_bool(key, value)?,
                "build_server" => options.build_server = parse_bool(key, value)?,
                other => {
                    return Err(CodegenError::InvalidParameters(format!(
                        "unknown parameter `{other}`"
                    )));
                }
            }
        }

        tracing::debug!(
            message_module_path = %options.message_module_path,
            mapped_files = options.crate_mapping.len(),
            build_client = options.build_client,
            build_server = options.build_server,
            "parsed generation options"
        );

        Ok(options)
    }

    /// Set the path of the module holding generated messages.
    ///
    /// An empty path is the same as [`SELF_MODULE_PATH`].
    pub fn with_message_module_path(mut self, path: &str) -> CodegenResult<Self> {
        let path = path.trim();
        if path.is_empty() {
            self.message_module_path = SELF_MODULE_PATH.to_string();
            return Ok(self);
        }
        validate_module_path(path)?;
        self.message_module_path = path.to_string();
        Ok(self)
    }

    pub fn with_crate_mapping(mut self, mapping: CrateMapping) -> Self {
        self.crate_mapping = mapping;
        self
    }

    /// Declare the files compiled into the current crate.
    pub fn with_files_in_current_crate<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files_in_current_crate = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_build_client(mut self, enabled: bool) -> Self {
        self.build_client = enabled;
        self
    }

    pub fn with_build_server(mut self, enabled: bool) -> Self {
        self.build_server = enabled;
        self
    }

    pub fn message_module_path(&self) -> &str {
        &self.message_module_path
    }

    pub fn crate_mapping(&self) -> &CrateMapping {
        &self.crate_mapping
    }

    pub fn build_client(&self) -> bool {
        self.build_client
    }

    pub fn build_server(&self) -> bool {
        self.build_server
    }

    /// Returns true if messages from `file` are generated into the current crate.
    pub fn is_file_in_current_crate(&self, file: &str) -> bool {
        self.files_in_current_crate.contains(file)
    }
}

/// The options together with the file currently being generated.
///
/// Passed explicitly to every emission step.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    options: &'a GenerationOptions,
    file_name: &'a str,
}

impl<'a> GenerationContext<'a> {
    pub fn new(options: &'a GenerationOptions, file_name: &'a str) -> Self {
        Self { options, file_name }
    }

    pub fn options(&self) -> &'a GenerationOptions {
        self.options
    }

    /// Name of the `.proto` file being generated.
    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    /// Returns true if messages from `file` live in the crate being generated.
    ///
    /// The file being generated is always part of the current crate.
    pub fn is_local(&self, file: &str) -> bool {
        file == self.file_name || self.options.is_file_in_current_crate(file)
    }
}

/// Split a parameter string into `(key, value)` pairs.
///
/// Empty segments are skipped; a segment without `=` has an empty value.
pub fn parse_generator_parameter(parameter: &str) -> CodegenResult<Vec<(&str, &str)>> {
    parameter
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            let key = key.trim();
            if key.is_empty() {
                return Err(CodegenError::InvalidParameters(format!(
                    "parameter `{part}` has no key"
                )));
            }
            Ok((key, value.trim()))
        })
        .collect()
}

fn parse_bool(key: &str, value: &str) -> CodegenResult<bool> {
    match value {
        "" | "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CodegenError::InvalidParameters(format!(
            "`{key}` expects `true` or `false`, got `{other}`"
        ))),
    }
}

/// Check that `path` is a Rust module path such as `crate::pb`, `::proto`,
/// `super::messages` or `self`.
fn validate_module_path(path: &str) -> CodegenResult<()> {
    let invalid = |reason: &str| {
        CodegenError::InvalidParameters(format!(
            "`message_module_path` value `{path}` is not a module path: {reason}"
        ))
    };

    let (global, relative) = match path.strip_prefix("::") {
        Some(rest) => (true, rest),
        None => (false, path),
    };
    if relative.is_empty() {
        return Err(invalid("no segments"));
    }

    // Path keywords are only legal in the leading run of a relative path.
    let mut in_prefix = !global;
    for (i, segment) in relative.split("::").enumerate() {
        if segment.is_empty() {
            return Err(invalid("empty segment"));
        }
        match segment {
            "crate" | "self" if in_prefix && i == 0 => continue,
            "super" if in_prefix => continue,
            _ => in_prefix = false,
        }
        if !is_identifier(segment) {
            return Err(invalid("segments must be non-keyword identifiers"));
        }
    }

    Ok(())
}

fn is_identifier(segment: &str) -> bool {
    let (raw, name) = match segment.strip_prefix("r#") {
        Some(name) => (true, name),
        None => (false, segment),
    };
    let mut chars = name.chars();
    let well_formed = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && name != "_";

    if raw {
        well_formed && !matches!(name, "self" | "super" | "crate" | "Self")
    } else {
        well_formed && !is_keyword(name)
    }
}

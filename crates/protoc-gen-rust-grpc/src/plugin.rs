//! protoc plugin protocol.
//!
//! The request names the files to generate, carries every file of the
//! compilation and the raw parameter string. A failure anywhere is reported
//! in the response's `error` field with no files, which makes protoc print
//! the message and exit non-zero.

use crate::descriptors::{MessageIndex, convert_file};
use anyhow::{Context, Result, anyhow};
use prost_types::FileDescriptorProto;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use rust_grpc_codegen::{GeneratedFile, GenerationOptions, generate_file};

/// Generate service files for `files_to_generate`.
///
/// `files` must contain every file the ones to generate depend on.
pub fn generate_files(
    files: &[FileDescriptorProto],
    files_to_generate: &[String],
    parameter: &str,
) -> Result<Vec<GeneratedFile>> {
    let options = GenerationOptions::parse(parameter)
        .context("invalid plugin parameter")?
        .with_files_in_current_crate(files_to_generate.iter().cloned());
    let index = MessageIndex::build(files);

    let mut generated = Vec::new();
    for name in files_to_generate {
        let file = files
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| anyhow!("file `{name}` was requested but not provided"))?;
        let file = convert_file(file, &index).with_context(|| format!("failed to read {name}"))?;

        match generate_file(&file, &options)
            .with_context(|| format!("failed to generate services for {name}"))?
        {
            Some(output) => {
                tracing::info!(input = %name, output = %output.name, "generated");
                generated.push(output);
            }
            None => tracing::debug!(input = %name, "no services"),
        }
    }

    Ok(generated)
}

/// Answer a generation request.
pub fn handle_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match generate_files(&request.proto_file, &request.file_to_generate, request.parameter()) {
        Ok(files) => {
            response.file = files
                .into_iter()
                .map(|f| File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect();
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "generation failed");
            response.error = Some(format!("{e:#}"));
        }
    }

    response
}

#[cfg(test)]
#[path = "plugin/plugin_tests.rs"]
mod plugin_tests;

//! Per-file generation.

use crate::client::generate_client;
use crate::descriptor::{FileDescriptor, ServiceDescriptor};
use crate::error::CodegenResult;
use crate::model::Service;
use crate::options::{GenerationContext, GenerationOptions};
use crate::printer::Printer;
use crate::server::generate_server;

/// Generated text for one service: the client module, then the server module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Full name of the service.
    pub service: String,
    pub fragments: Vec<String>,
}

/// A generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub name: String,
    pub content: String,
}

/// Name of the file generated for `proto_file`: `foo/bar.proto` → `foo/bar_grpc.pb.rs`.
pub fn output_file_name(proto_file: &str) -> String {
    let stem = proto_file.strip_suffix(".proto").unwrap_or(proto_file);
    format!("{stem}_grpc.pb.rs")
}

/// Generate the enabled sections for a single service.
pub fn generate_service<S: ServiceDescriptor>(
    service: &S,
    ctx: &GenerationContext<'_>,
) -> CodegenResult<GeneratedUnit> {
    let service = Service::new(service);
    tracing::debug!(
        service = service.full_name(),
        methods = service.methods().count(),
        "generating service"
    );

    let mut fragments = Vec::with_capacity(2);

    if ctx.options().build_client() {
        let mut printer = Printer::new();
        generate_client(&mut printer, &service, ctx)?;
        fragments.push(printer.into_output());
    }

    if ctx.options().build_server() {
        let mut printer = Printer::new();
        generate_server(&mut printer, &service, ctx)?;
        fragments.push(printer.into_output());
    }

    Ok(GeneratedUnit {
        service: service.full_name().to_string(),
        fragments,
    })
}

/// Generate the service file for `file`.
///
/// Returns `None` when the file declares no services. Any error aborts the
/// whole file.
pub fn generate_file<F: FileDescriptor>(
    file: &F,
    options: &GenerationOptions,
) -> CodegenResult<Option<GeneratedFile>> {
    if file.services().is_empty() {
        tracing::debug!(file = file.name(), "no services, skipping");
        return Ok(None);
    }

    let ctx = GenerationContext::new(options, file.name());
    let mut content = String::new();
    for service in file.services() {
        let unit = generate_service(service, &ctx)?;
        for fragment in unit.fragments {
            content.push_str(&fragment);
        }
    }

    let name = output_file_name(file.name());
    tracing::debug!(file = file.name(), output = %name, bytes = content.len(), "generated file");

    Ok(Some(GeneratedFile { name, content }))
}

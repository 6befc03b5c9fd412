//! Conversion from wire descriptors to the generator's descriptor model.
//!
//! protoc sends every file of the compilation, dependencies included, as
//! `FileDescriptorProto`s. Message references in methods are fully-qualified
//! names (`.pkg.Outer.Inner`), so all messages are indexed up front and method
//! types are resolved against the index.

use anyhow::{Context, Result, anyhow};
use prost_types::{DescriptorProto, FileDescriptorProto, ServiceDescriptorProto};
use rust_grpc_codegen::descriptor::owned::{ProtoFile, ProtoMessage, ProtoMethod, ProtoService};
use std::collections::HashMap;
use std::sync::Arc;

/// `FileDescriptorProto.service`
const FILE_SERVICE_FIELD: i32 = 6;

/// `ServiceDescriptorProto.method`
const SERVICE_METHOD_FIELD: i32 = 2;

/// Every message of a compilation, keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct MessageIndex {
    messages: HashMap<String, Arc<ProtoMessage>>,
}

impl MessageIndex {
    pub fn build(files: &[FileDescriptorProto]) -> Self {
        let mut index = Self::default();
        for file in files {
            let scope = match file.package() {
                "" => String::new(),
                package => format!(".{package}"),
            };
            for message in &file.message_type {
                index.insert(&scope, message, None, file.name());
            }
        }
        tracing::debug!(messages = index.messages.len(), "indexed message types");
        index
    }

    fn insert(
        &mut self,
        scope: &str,
        message: &DescriptorProto,
        parent: Option<&Arc<ProtoMessage>>,
        file_name: &str,
    ) {
        let full_name = format!("{scope}.{}", message.name());
        let handle = match parent {
            Some(parent) => ProtoMessage::nested(parent, message.name()),
            None => ProtoMessage::new(message.name(), file_name),
        };
        for nested in &message.nested_type {
            self.insert(&full_name, nested, Some(&handle), file_name);
        }
        self.messages.insert(full_name, handle);
    }

    /// Look up a message by its fully-qualified name, with or without the leading dot.
    pub fn get(&self, full_name: &str) -> Option<&Arc<ProtoMessage>> {
        if full_name.starts_with('.') {
            self.messages.get(full_name)
        } else {
            self.messages.get(&format!(".{full_name}"))
        }
    }
}

/// Leading and trailing comments keyed by source location path.
struct Comments<'a> {
    by_path: HashMap<&'a [i32], (&'a str, &'a str)>,
}

impl<'a> Comments<'a> {
    fn new(file: &'a FileDescriptorProto) -> Self {
        let by_path = file
            .source_code_info
            .iter()
            .flat_map(|info| info.location.iter())
            .map(|loc| {
                (
                    loc.path.as_slice(),
                    (loc.leading_comments(), loc.trailing_comments()),
                )
            })
            .collect();
        Self { by_path }
    }

    fn get(&self, path: &[i32]) -> (&'a str, &'a str) {
        self.by_path.get(path).copied().unwrap_or(("", ""))
    }
}

/// Convert one file and its services.
pub fn convert_file(file: &FileDescriptorProto, index: &MessageIndex) -> Result<ProtoFile> {
    let comments = Comments::new(file);
    let mut converted = ProtoFile::new(file.name());

    for (s, service) in file.service.iter().enumerate() {
        let s = i32::try_from(s).context("too many services")?;
        let service = convert_service(file.package(), service, s, &comments, index)
            .with_context(|| format!("in service `{}`", service.name()))?;
        converted = converted.with_service(service);
    }

    Ok(converted)
}

fn convert_service(
    package: &str,
    service: &ServiceDescriptorProto,
    service_index: i32,
    comments: &Comments<'_>,
    index: &MessageIndex,
) -> Result<ProtoService> {
    let (leading, trailing) = comments.get(&[FILE_SERVICE_FIELD, service_index]);
    let mut converted = ProtoService::new(package, service.name())
        .with_leading_comments(leading)
        .with_trailing_comments(trailing);

    for (m, method) in service.method.iter().enumerate() {
        let m = i32::try_from(m).context("too many methods")?;
        let input = lookup(index, method.input_type())?;
        let output = lookup(index, method.output_type())?;
        let (leading, trailing) =
            comments.get(&[FILE_SERVICE_FIELD, service_index, SERVICE_METHOD_FIELD, m]);
        let deprecated = method.options.as_ref().is_some_and(|o| o.deprecated());

        converted = converted.with_method(
            ProtoMethod::new(method.name(), input, output)
                .with_client_streaming(method.client_streaming())
                .with_server_streaming(method.server_streaming())
                .with_deprecated(deprecated)
                .with_leading_comments(leading)
                .with_trailing_comments(trailing),
        );
    }

    Ok(converted)
}

fn lookup(index: &MessageIndex, type_name: &str) -> Result<Arc<ProtoMessage>> {
    index
        .get(type_name)
        .cloned()
        .ok_or_else(|| anyhow!("message type `{type_name}` is not defined in the request"))
}

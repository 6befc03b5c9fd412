//! Generator-facing projections over descriptors.
//!
//! [`Service`] and [`Method`] wrap a descriptor and answer the questions the
//! templates ask: Rust identifiers, wire names, streaming shape, comments and
//! resolved message paths.

use crate::descriptor::{MethodDescriptor, ServiceDescriptor};
use crate::error::CodegenResult;
use crate::naming::{safe_identifier, to_snake_case, to_upper_camel_case};
use crate::options::GenerationContext;
use crate::type_path::resolve_type_path;
use std::fmt;

/// Streaming directionality of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamingShape {
    Unary,
    ServerStreaming,
    ClientStreaming,
    BidiStreaming,
}

impl StreamingShape {
    /// Classify a method from its streaming flags.
    pub fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => StreamingShape::Unary,
            (false, true) => StreamingShape::ServerStreaming,
            (true, false) => StreamingShape::ClientStreaming,
            (true, true) => StreamingShape::BidiStreaming,
        }
    }

    pub fn is_client_streaming(self) -> bool {
        matches!(
            self,
            StreamingShape::ClientStreaming | StreamingShape::BidiStreaming
        )
    }

    pub fn is_server_streaming(self) -> bool {
        matches!(
            self,
            StreamingShape::ServerStreaming | StreamingShape::BidiStreaming
        )
    }
}

impl fmt::Display for StreamingShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamingShape::Unary => "unary",
            StreamingShape::ServerStreaming => "server_streaming",
            StreamingShape::ClientStreaming => "client_streaming",
            StreamingShape::BidiStreaming => "streaming",
        };
        f.write_str(name)
    }
}

/// A method as seen by the templates.
#[derive(Debug)]
pub struct Method<'a, M> {
    descriptor: &'a M,
}

impl<M> Clone for Method<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Method<'_, M> {}

impl<'a, M: MethodDescriptor> Method<'a, M> {
    pub fn new(descriptor: &'a M) -> Self {
        Self { descriptor }
    }

    /// Rust identifier of the generated method.
    pub fn name(&self) -> String {
        safe_identifier(&to_snake_case(self.descriptor.name()))
    }

    pub fn full_name(&self) -> &'a str {
        self.descriptor.full_name()
    }

    /// Name used on the wire.
    pub fn proto_name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn streaming_shape(&self) -> StreamingShape {
        StreamingShape::from_flags(
            self.descriptor.client_streaming(),
            self.descriptor.server_streaming(),
        )
    }

    pub fn is_deprecated(&self) -> bool {
        self.descriptor.deprecated()
    }

    /// Leading comment, else trailing comment, else empty.
    pub fn comment(&self) -> &'a str {
        self.descriptor.comments().preferred()
    }

    /// Request message path as seen from a module `depth` levels below the file root.
    pub fn request_type(&self, ctx: &GenerationContext<'_>, depth: usize) -> CodegenResult<String> {
        resolve_type_path(self.descriptor.input_type(), ctx, depth)
    }

    /// Response message path as seen from a module `depth` levels below the file root.
    pub fn response_type(&self, ctx: &GenerationContext<'_>, depth: usize) -> CodegenResult<String> {
        resolve_type_path(self.descriptor.output_type(), ctx, depth)
    }
}

/// A service as seen by the templates.
#[derive(Debug)]
pub struct Service<'a, S> {
    descriptor: &'a S,
}

impl<S> Clone for Service<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Service<'_, S> {}

impl<'a, S: ServiceDescriptor> Service<'a, S> {
    pub fn new(descriptor: &'a S) -> Self {
        Self { descriptor }
    }

    /// Rust identifier of the service, used for the trait and type names.
    pub fn name(&self) -> String {
        safe_identifier(&to_upper_camel_case(self.descriptor.name()))
    }

    pub fn full_name(&self) -> &'a str {
        self.descriptor.full_name()
    }

    /// Name as written in the `.proto` file.
    pub fn proto_name(&self) -> &'a str {
        self.descriptor.name()
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = Method<'a, S::Method>> + 'a {
        self.descriptor.methods().iter().map(Method::new)
    }

    pub fn comment(&self) -> &'a str {
        self.descriptor.comments().preferred()
    }

    /// Root of the generated module names, e.g. `greeter` for `Greeter`.
    pub fn module_stem(&self) -> String {
        to_snake_case(&self.name())
    }
}

/// Wire route of a method: `/<service full name>/<method proto name>`.
pub fn method_path<S: ServiceDescriptor>(
    service: &Service<'_, S>,
    method: &Method<'_, S::Method>,
) -> String {
    format!("/{}/{}", service.full_name(), method.proto_name())
}

#[cfg(test)]
#[path = "model/model_tests.rs"]
mod model_tests;

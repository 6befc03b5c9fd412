//! Client module generation.
//!
//! Emits `pub mod <service>_client` holding `<Service>Client<T>`, a thin typed
//! wrapper over `tonic::client::Grpc<T>` with one async method per RPC.

use crate::descriptor::ServiceDescriptor;
use crate::doc::render_doc;
use crate::error::{CodegenError, CodegenResult};
use crate::model::{Method, Service, StreamingShape, method_path};
use crate::options::GenerationContext;
use crate::printer::{Printer, Value};
use std::collections::HashSet;

/// Codec used to encode and decode messages on the wire.
pub const CODEC: &str = "tonic_protobuf::ProtoCodec";

/// Depth of the client module below the file root.
const CLIENT_MODULE_DEPTH: usize = 1;

const CLIENT_MODULE: &str = r#"
    /// Generated client implementations.
    pub mod $client_mod$ {
        #![allow(
            unused_variables,
            dead_code,
            missing_docs,
            clippy::wildcard_imports,
            clippy::let_unit_value,
        )]
        use tonic::codegen::*;
        use tonic::codegen::http::Uri;

        $service_doc$
        #[derive(Debug, Clone)]
        pub struct $client_ident$<T> {
            inner: tonic::client::Grpc<T>,
        }

        impl<T> $client_ident$<T>
        where
            T: tonic::client::GrpcService<tonic::body::Body>,
            T::Error: Into<StdError>,
            T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
            <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
        {
            pub fn new(inner: T) -> Self {
                let inner = tonic::client::Grpc::new(inner);
                Self { inner }
            }

            pub fn with_origin(inner: T, origin: Uri) -> Self {
                let inner = tonic::client::Grpc::with_origin(inner, origin);
                Self { inner }
            }

            pub fn with_interceptor<F>(
                inner: T,
                interceptor: F,
            ) -> $client_ident$<InterceptedService<T, F>>
            where
                F: tonic::service::Interceptor,
                T::ResponseBody: Default,
                T: tonic::codegen::Service<
                    http::Request<tonic::body::Body>,
                    Response = http::Response<
                        <T as tonic::client::GrpcService<tonic::body::Body>>::ResponseBody,
                    >,
                >,
                <T as tonic::codegen::Service<
                    http::Request<tonic::body::Body>,
                >>::Error: Into<StdError> + std::marker::Send + std::marker::Sync,
            {
                $client_ident$::new(InterceptedService::new(inner, interceptor))
            }

            /// Compress requests with the given encoding.
            ///
            /// This requires the server to support it otherwise it might respond with an
            /// error.
            #[must_use]
            pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
                self.inner = self.inner.send_compressed(encoding);
                self
            }

            /// Enable decompressing responses.
            #[must_use]
            pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
                self.inner = self.inner.accept_compressed(encoding);
                self
            }

            /// Limits the maximum size of a decoded message.
            ///
            /// Default: `4MB`
            #[must_use]
            pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
                self.inner = self.inner.max_decoding_message_size(limit);
                self
            }

            /// Limits the maximum size of an encoded message.
            ///
            /// Default: `usize::MAX`
            #[must_use]
            pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
                self.inner = self.inner.max_encoding_message_size(limit);
                self
            }
            $methods$
        }
    }
"#;

const UNARY_METHOD: &str = r#"
    pub async fn $ident$(
        &mut self,
        request: impl tonic::IntoRequest<$request$>,
    ) -> std::result::Result<tonic::Response<$response$>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
        let codec = $codec$::default();
        let path = http::uri::PathAndQuery::from_static("$path$");
        let mut req = request.into_request();
        req.extensions_mut().insert(GrpcMethod::new("$service_name$", "$method_name$"));
        self.inner.unary(req, path, codec).await
    }
"#;

const SERVER_STREAMING_METHOD: &str = r#"
    pub async fn $ident$(
        &mut self,
        request: impl tonic::IntoRequest<$request$>,
    ) -> std::result::Result<
        tonic::Response<tonic::codec::Streaming<$response$>>,
        tonic::Status,
    > {
        self.inner
            .ready()
            .await
            .map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
        let codec = $codec$::default();
        let path = http::uri::PathAndQuery::from_static("$path$");
        let mut req = request.into_request();
        req.extensions_mut().insert(GrpcMethod::new("$service_name$", "$method_name$"));
        self.inner.server_streaming(req, path, codec).await
    }
"#;

const CLIENT_STREAMING_METHOD: &str = r#"
    pub async fn $ident$(
        &mut self,
        request: impl tonic::IntoStreamingRequest<Message = $request$>,
    ) -> std::result::Result<tonic::Response<$response$>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
        let codec = $codec$::default();
        let path = http::uri::PathAndQuery::from_static("$path$");
        let mut req = request.into_streaming_request();
        req.extensions_mut().insert(GrpcMethod::new("$service_name$", "$method_name$"));
        self.inner.client_streaming(req, path, codec).await
    }
"#;

const STREAMING_METHOD: &str = r#"
    pub async fn $ident$(
        &mut self,
        request: impl tonic::IntoStreamingRequest<Message = $request$>,
    ) -> std::result::Result<
        tonic::Response<tonic::codec::Streaming<$response$>>,
        tonic::Status,
    > {
        self.inner
            .ready()
            .await
            .map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
        let codec = $codec$::default();
        let path = http::uri::PathAndQuery::from_static("$path$");
        let mut req = request.into_streaming_request();
        req.extensions_mut().insert(GrpcMethod::new("$service_name$", "$method_name$"));
        self.inner.streaming(req, path, codec).await
    }
"#;

/// Inherent methods every generated client defines.
pub const CLIENT_BUILDER_METHODS: &[&str] = &[
    "new",
    "with_origin",
    "with_interceptor",
    "send_compressed",
    "accept_compressed",
    "max_decoding_message_size",
    "max_encoding_message_size",
];

/// Template for the client method of a given streaming shape.
pub fn method_template(shape: StreamingShape) -> &'static str {
    match shape {
        StreamingShape::Unary => UNARY_METHOD,
        StreamingShape::ServerStreaming => SERVER_STREAMING_METHOD,
        StreamingShape::ClientStreaming => CLIENT_STREAMING_METHOD,
        StreamingShape::BidiStreaming => STREAMING_METHOD,
    }
}

/// Name of the generated client module, e.g. `greeter_client`.
pub fn client_module_name<S: ServiceDescriptor>(service: &Service<'_, S>) -> String {
    format!("{}_client", service.module_stem())
}

/// Emit the client module for `service`.
pub fn generate_client<S: ServiceDescriptor>(
    printer: &mut Printer,
    service: &Service<'_, S>,
    ctx: &GenerationContext<'_>,
) -> CodegenResult<()> {
    check_method_names(service, CLIENT_BUILDER_METHODS)?;

    let client_ident = format!("{}Client", service.name());
    let methods = |p: &mut Printer| -> CodegenResult<()> {
        for method in service.methods() {
            p.newline();
            generate_method(p, service, &method, ctx)?;
        }
        Ok(())
    };

    printer.emit(
        &[
            ("client_mod", client_module_name(service).into()),
            ("client_ident", client_ident.into()),
            ("service_doc", render_doc(service.comment()).into()),
            ("methods", Value::emit(&methods)),
        ],
        CLIENT_MODULE,
    )
}

/// Fail when an RPC identifier repeats one in `reserved` or another RPC's.
pub(crate) fn check_method_names<S: ServiceDescriptor>(
    service: &Service<'_, S>,
    reserved: &[&str],
) -> CodegenResult<()> {
    let mut taken: HashSet<String> = reserved.iter().map(|m| m.to_string()).collect();
    for method in service.methods() {
        let ident = method.name();
        if !taken.insert(ident.clone()) {
            return Err(CodegenError::MethodNameCollision {
                service: service.full_name().to_string(),
                method: method.proto_name().to_string(),
                ident,
            });
        }
    }
    Ok(())
}

fn generate_method<S: ServiceDescriptor>(
    printer: &mut Printer,
    service: &Service<'_, S>,
    method: &Method<'_, S::Method>,
    ctx: &GenerationContext<'_>,
) -> CodegenResult<()> {
    let shape = method.streaming_shape();
    tracing::debug!(
        method = method.full_name(),
        %shape,
        "generating client method"
    );

    let deprecated = if method.is_deprecated() { "#[deprecated]" } else { "" };
    printer.emit(
        &[
            ("doc", render_doc(method.comment()).into()),
            ("deprecated", deprecated.into()),
        ],
        r"
            $doc$
            $deprecated$
        ",
    )?;

    printer.emit(
        &[
            ("ident", method.name().into()),
            ("request", method.request_type(ctx, CLIENT_MODULE_DEPTH)?.into()),
            ("response", method.response_type(ctx, CLIENT_MODULE_DEPTH)?.into()),
            ("codec", CODEC.into()),
            ("path", method_path(service, method).into()),
            ("service_name", service.full_name().into()),
            ("method_name", method.proto_name().into()),
        ],
        method_template(shape),
    )
}

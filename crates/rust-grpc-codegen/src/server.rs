//! Server module generation.
//!
//! Emits `pub mod <service>_server` holding:
//!
//! - trait `<Service>` with one async method per RPC, each defaulting to
//!   `Unimplemented`
//! - `<Service>Server<T>`, a `tower` service routing requests by path to the
//!   trait methods
//! - `SERVICE_NAME` and a `NamedService` impl for router registration

use crate::client::{CODEC, check_method_names};
use crate::descriptor::{MethodDescriptor, ServiceDescriptor};
use crate::doc::render_doc;
use crate::error::CodegenResult;
use crate::model::{Method, Service, StreamingShape, method_path};
use crate::options::GenerationContext;
use crate::printer::{Printer, Value};

/// Depth of the server module below the file root.
const SERVER_MODULE_DEPTH: usize = 1;

const SERVER_MODULE: &str = r#"
    /// Generated server implementations.
    pub mod $server_mod$ {
        #![allow(
            unused_variables,
            dead_code,
            missing_docs,
            deprecated,
            clippy::wildcard_imports,
            clippy::let_unit_value,
        )]
        use tonic::codegen::*;

        /// Generated trait containing gRPC methods that should be implemented for use with $server_ident$.
        #[async_trait]
        pub trait $trait_ident$: std::marker::Send + std::marker::Sync + 'static {
            $trait_methods$
        }

        $service_doc$
        #[derive(Debug)]
        pub struct $server_ident$<T> {
            inner: Arc<T>,
            accept_compression_encodings: EnabledCompressionEncodings,
            send_compression_encodings: EnabledCompressionEncodings,
            max_decoding_message_size: Option<usize>,
            max_encoding_message_size: Option<usize>,
        }

        impl<T> $server_ident$<T> {
            pub fn new(inner: T) -> Self {
                Self::from_arc(Arc::new(inner))
            }

            pub fn from_arc(inner: Arc<T>) -> Self {
                Self {
                    inner,
                    accept_compression_encodings: Default::default(),
                    send_compression_encodings: Default::default(),
                    max_decoding_message_size: None,
                    max_encoding_message_size: None,
                }
            }

            pub fn with_interceptor<F>(inner: T, interceptor: F) -> InterceptedService<Self, F>
            where
                F: tonic::service::Interceptor,
            {
                InterceptedService::new(Self::new(inner), interceptor)
            }

            /// Enable decompressing requests with the given encoding.
            #[must_use]
            pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
                self.accept_compression_encodings.enable(encoding);
                self
            }

            /// Compress responses with the given encoding, if the client supports it.
            #[must_use]
            pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
                self.send_compression_encodings.enable(encoding);
                self
            }

            /// Limits the maximum size of a decoded message.
            ///
            /// Default: `4MB`
            #[must_use]
            pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
                self.max_decoding_message_size = Some(limit);
                self
            }

            /// Limits the maximum size of an encoded message.
            ///
            /// Default: `usize::MAX`
            #[must_use]
            pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
                self.max_encoding_message_size = Some(limit);
                self
            }
        }

        impl<T, B> tonic::codegen::Service<http::Request<B>> for $server_ident$<T>
        where
            T: $trait_ident$,
            B: Body + std::marker::Send + 'static,
            B::Error: Into<StdError> + std::marker::Send + 'static,
        {
            type Response = http::Response<tonic::body::Body>;
            type Error = std::convert::Infallible;
            type Future = BoxFuture<Self::Response, Self::Error>;

            fn poll_ready(
                &mut self,
                _cx: &mut Context<'_>,
            ) -> Poll<std::result::Result<(), Self::Error>> {
                Poll::Ready(Ok(()))
            }

            fn call(&mut self, req: http::Request<B>) -> Self::Future {
                match req.uri().path() {
                    $routes$
                    _ => {
                        Box::pin(async move {
                            let mut response = http::Response::new(
                                tonic::body::Body::default(),
                            );
                            let headers = response.headers_mut();
                            headers
                                .insert(
                                    tonic::Status::GRPC_STATUS,
                                    (tonic::Code::Unimplemented as i32).into(),
                                );
                            headers
                                .insert(
                                    http::header::CONTENT_TYPE,
                                    tonic::metadata::GRPC_CONTENT_TYPE,
                                );
                            Ok(response)
                        })
                    }
                }
            }
        }

        impl<T> Clone for $server_ident$<T> {
            fn clone(&self) -> Self {
                let inner = self.inner.clone();
                Self {
                    inner,
                    accept_compression_encodings: self.accept_compression_encodings,
                    send_compression_encodings: self.send_compression_encodings,
                    max_decoding_message_size: self.max_decoding_message_size,
                    max_encoding_message_size: self.max_encoding_message_size,
                }
            }
        }

        /// Generated gRPC service name
        pub const SERVICE_NAME: &str = "$service_name$";

        impl<T> tonic::server::NamedService for $server_ident$<T> {
            const NAME: &'static str = SERVICE_NAME;
        }
    }
"#;

const UNARY_TRAIT_METHOD: &str = r#"
    async fn $ident$(
        &self,
        request: tonic::Request<$request$>,
    ) -> std::result::Result<tonic::Response<$response$>, tonic::Status> {
        Err(tonic::Status::unimplemented("Not yet implemented"))
    }
"#;

const SERVER_STREAMING_TRAIT_METHOD: &str = r#"
    async fn $ident$(
        &self,
        request: tonic::Request<$request$>,
    ) -> std::result::Result<tonic::Response<BoxStream<$response$>>, tonic::Status> {
        Err(tonic::Status::unimplemented("Not yet implemented"))
    }
"#;

const CLIENT_STREAMING_TRAIT_METHOD: &str = r#"
    async fn $ident$(
        &self,
        request: tonic::Request<tonic::Streaming<$request$>>,
    ) -> std::result::Result<tonic::Response<$response$>, tonic::Status> {
        Err(tonic::Status::unimplemented("Not yet implemented"))
    }
"#;

const STREAMING_TRAIT_METHOD: &str = r#"
    async fn $ident$(
        &self,
        request: tonic::Request<tonic::Streaming<$request$>>,
    ) -> std::result::Result<tonic::Response<BoxStream<$response$>>, tonic::Status> {
        Err(tonic::Status::unimplemented("Not yet implemented"))
    }
"#;

const ROUTE: &str = r#"
    "$path$" => {
        #[allow(non_camel_case_types)]
        struct $svc_ident$<T: $trait_ident$>(pub Arc<T>);
        $svc_impl$
        let accept_compression_encodings = self.accept_compression_encodings;
        let send_compression_encodings = self.send_compression_encodings;
        let max_decoding_message_size = self.max_decoding_message_size;
        let max_encoding_message_size = self.max_encoding_message_size;
        let inner = self.inner.clone();
        let fut = async move {
            let method = $svc_ident$(inner);
            let codec = $codec$::default();
            let mut grpc = tonic::server::Grpc::new(codec)
                .apply_compression_config(
                    accept_compression_encodings,
                    send_compression_encodings,
                )
                .apply_max_message_size_config(
                    max_decoding_message_size,
                    max_encoding_message_size,
                );
            let res = grpc.$grpc_call$(method, req).await;
            Ok(res)
        };
        Box::pin(fut)
    }
"#;

const UNARY_SVC: &str = r#"
    impl<T: $trait_ident$> tonic::server::UnaryService<$request$> for $svc_ident$<T> {
        type Response = $response$;
        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
        fn call(&mut self, request: tonic::Request<$request$>) -> Self::Future {
            let inner = Arc::clone(&self.0);
            let fut = async move {
                <T as $trait_ident$>::$ident$(&inner, request).await
            };
            Box::pin(fut)
        }
    }
"#;

const SERVER_STREAMING_SVC: &str = r#"
    impl<T: $trait_ident$> tonic::server::ServerStreamingService<$request$> for $svc_ident$<T> {
        type Response = $response$;
        type ResponseStream = BoxStream<$response$>;
        type Future = BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
        fn call(&mut self, request: tonic::Request<$request$>) -> Self::Future {
            let inner = Arc::clone(&self.0);
            let fut = async move {
                <T as $trait_ident$>::$ident$(&inner, request).await
            };
            Box::pin(fut)
        }
    }
"#;

const CLIENT_STREAMING_SVC: &str = r#"
    impl<T: $trait_ident$> tonic::server::ClientStreamingService<$request$> for $svc_ident$<T> {
        type Response = $response$;
        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
        fn call(
            &mut self,
            request: tonic::Request<tonic::Streaming<$request$>>,
        ) -> Self::Future {
            let inner = Arc::clone(&self.0);
            let fut = async move {
                <T as $trait_ident$>::$ident$(&inner, request).await
            };
            Box::pin(fut)
        }
    }
"#;

const STREAMING_SVC: &str = r#"
    impl<T: $trait_ident$> tonic::server::StreamingService<$request$> for $svc_ident$<T> {
        type Response = $response$;
        type ResponseStream = BoxStream<$response$>;
        type Future = BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
        fn call(
            &mut self,
            request: tonic::Request<tonic::Streaming<$request$>>,
        ) -> Self::Future {
            let inner = Arc::clone(&self.0);
            let fut = async move {
                <T as $trait_ident$>::$ident$(&inner, request).await
            };
            Box::pin(fut)
        }
    }
"#;

/// Template for the trait method of a given streaming shape.
pub fn trait_method_template(shape: StreamingShape) -> &'static str {
    match shape {
        StreamingShape::Unary => UNARY_TRAIT_METHOD,
        StreamingShape::ServerStreaming => SERVER_STREAMING_TRAIT_METHOD,
        StreamingShape::ClientStreaming => CLIENT_STREAMING_TRAIT_METHOD,
        StreamingShape::BidiStreaming => STREAMING_TRAIT_METHOD,
    }
}

/// Template for the per-route service adapter of a given streaming shape.
pub fn route_service_template(shape: StreamingShape) -> &'static str {
    match shape {
        StreamingShape::Unary => UNARY_SVC,
        StreamingShape::ServerStreaming => SERVER_STREAMING_SVC,
        StreamingShape::ClientStreaming => CLIENT_STREAMING_SVC,
        StreamingShape::BidiStreaming => STREAMING_SVC,
    }
}

/// Name of the generated server module, e.g. `greeter_server`.
pub fn server_module_name<S: ServiceDescriptor>(service: &Service<'_, S>) -> String {
    format!("{}_server", service.module_stem())
}

/// Emit the server module for `service`.
pub fn generate_server<S: ServiceDescriptor>(
    printer: &mut Printer,
    service: &Service<'_, S>,
    ctx: &GenerationContext<'_>,
) -> CodegenResult<()> {
    check_method_names(service, &[])?;

    let trait_ident = service.name();
    let server_ident = format!("{trait_ident}Server");

    let trait_methods = |p: &mut Printer| -> CodegenResult<()> {
        for (i, method) in service.methods().enumerate() {
            if i > 0 {
                p.newline();
            }
            generate_trait_method(p, &method, ctx)?;
        }
        Ok(())
    };
    let routes = |p: &mut Printer| -> CodegenResult<()> {
        for method in service.methods() {
            generate_route(p, service, &method, &trait_ident, ctx)?;
        }
        Ok(())
    };

    printer.emit(
        &[
            ("server_mod", server_module_name(service).into()),
            ("trait_ident", trait_ident.as_str().into()),
            ("server_ident", server_ident.into()),
            ("service_name", service.full_name().into()),
            ("service_doc", render_doc(service.comment()).into()),
            ("trait_methods", Value::emit(&trait_methods)),
            ("routes", Value::emit(&routes)),
        ],
        SERVER_MODULE,
    )
}

fn generate_trait_method<M: MethodDescriptor>(
    printer: &mut Printer,
    method: &Method<'_, M>,
    ctx: &GenerationContext<'_>,
) -> CodegenResult<()> {
    let shape = method.streaming_shape();
    tracing::debug!(
        method = method.full_name(),
        %shape,
        "generating server method"
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
            ("request", method.request_type(ctx, SERVER_MODULE_DEPTH)?.into()),
            ("response", method.response_type(ctx, SERVER_MODULE_DEPTH)?.into()),
        ],
        trait_method_template(shape),
    )
}

fn generate_route<S: ServiceDescriptor>(
    printer: &mut Printer,
    service: &Service<'_, S>,
    method: &Method<'_, S::Method>,
    trait_ident: &str,
    ctx: &GenerationContext<'_>,
) -> CodegenResult<()> {
    let shape = method.streaming_shape();
    let svc_ident = format!("{}Svc", method.proto_name());
    let ident = method.name();
    let request = method.request_type(ctx, SERVER_MODULE_DEPTH)?;
    let response = method.response_type(ctx, SERVER_MODULE_DEPTH)?;

    let svc_impl = |p: &mut Printer| -> CodegenResult<()> {
        p.emit(
            &[
                ("trait_ident", trait_ident.into()),
                ("svc_ident", svc_ident.as_str().into()),
                ("ident", ident.as_str().into()),
                ("request", request.as_str().into()),
                ("response", response.as_str().into()),
            ],
            route_service_template(shape),
        )
    };

    printer.emit(
        &[
            ("path", method_path(service, method).into()),
            ("trait_ident", trait_ident.into()),
            ("svc_ident", svc_ident.as_str().into()),
            ("svc_impl", Value::emit(&svc_impl)),
            ("codec", CODEC.into()),
            ("grpc_call", shape.to_string().into()),
        ],
        ROUTE,
    )
}

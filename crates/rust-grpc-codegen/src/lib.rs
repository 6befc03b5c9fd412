//! rust-grpc-codegen - gRPC service code generation for tonic
//!
//! This crate turns service descriptors into Rust source for:
//! - a client module per service (`<service>_client`) wrapping `tonic::client::Grpc`
//! - a server module per service (`<service>_server`) with an async trait and a
//!   dispatcher implementing `tower::Service`
//!
//! Message types are not generated here. They are referenced by path, using
//! [`GenerationOptions`] to locate the module or crate holding them.
//!
//! # Example
//!
//! ```
//! use rust_grpc_codegen::descriptor::owned::{ProtoFile, ProtoMessage, ProtoMethod, ProtoService};
//! use rust_grpc_codegen::{GenerationOptions, generate_file};
//!
//! let request = ProtoMessage::new("HelloRequest", "helloworld.proto");
//! let reply = ProtoMessage::new("HelloReply", "helloworld.proto");
//! let file = ProtoFile::new("helloworld.proto").with_service(
//!     ProtoService::new("helloworld", "Greeter")
//!         .with_method(ProtoMethod::new("SayHello", request, reply)),
//! );
//!
//! let generated = generate_file(&file, &GenerationOptions::default())?.unwrap();
//! assert_eq!(generated.name, "helloworld_grpc.pb.rs");
//! assert!(generated.content.contains("pub mod greeter_client"));
//! # Ok::<(), rust_grpc_codegen::CodegenError>(())
//! ```

pub mod client;
pub mod crate_mapping;
pub mod descriptor;
pub mod doc;
mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod options;
pub mod printer;
pub mod server;
pub mod type_path;

pub use crate_mapping::CrateMapping;
pub use error::{CodegenError, CodegenResult};
pub use generator::{GeneratedFile, GeneratedUnit, generate_file, generate_service, output_file_name};
pub use model::StreamingShape;
pub use options::{GenerationContext, GenerationOptions};
pub use type_path::resolve_type_path;

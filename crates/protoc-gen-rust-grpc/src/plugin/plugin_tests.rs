#![allow(non_snake_case)]

use super::*;
use prost_types::{DescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};
use std::io::Write;

fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn echo_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("echo/echo.proto".to_string()),
        package: Some("echo".to_string()),
        message_type: vec![message("EchoRequest"), message("EchoResponse")],
        service: vec![ServiceDescriptorProto {
            name: Some("Echo".to_string()),
            method: vec![MethodDescriptorProto {
                name: Some("UnaryEcho".to_string()),
                input_type: Some(".echo.EchoRequest".to_string()),
                output_type: Some(".echo.EchoResponse".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn types_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("common/types.proto".to_string()),
        package: Some("common".to_string()),
        message_type: vec![message("Empty")],
        ..Default::default()
    }
}

/// `echo.proto` with a method taking `common.Empty` from another file.
fn echo_with_dependency() -> FileDescriptorProto {
    let mut file = echo_file();
    file.dependency = vec!["common/types.proto".to_string()];
    file.service[0].method.push(MethodDescriptorProto {
        name: Some("Ping".to_string()),
        input_type: Some(".common.Empty".to_string()),
        output_type: Some(".common.Empty".to_string()),
        ..Default::default()
    });
    file
}

fn request(files: Vec<FileDescriptorProto>, to_generate: &[&str], parameter: &str) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: to_generate.iter().map(|s| s.to_string()).collect(),
        parameter: Some(parameter.to_string()),
        proto_file: files,
        ..Default::default()
    }
}

// ============================================================================
// generate_files Tests
// ============================================================================

#[test]
fn generate_files___single_service___produces_grpc_file() {
    let files = generate_files(&[echo_file()], &["echo/echo.proto".to_string()], "").unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "echo/echo_grpc.pb.rs");
    assert!(files[0].content.contains("pub mod echo_client"));
    assert!(files[0].content.contains("pub mod echo_server"));
    syn::parse_file(&files[0].content).unwrap();
}

#[test]
fn generate_files___no_services___produces_nothing() {
    let files =
        generate_files(&[types_file()], &["common/types.proto".to_string()], "").unwrap();

    assert!(files.is_empty());
}

#[test]
fn generate_files___dependency_not_generated___requires_mapping() {
    let err = generate_files(
        &[types_file(), echo_with_dependency()],
        &["echo/echo.proto".to_string()],
        "",
    )
    .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("common/types.proto"), "{message}");
}

#[test]
fn generate_files___dependency_generated_together___uses_relative_paths() {
    let files = generate_files(
        &[types_file(), echo_with_dependency()],
        &["common/types.proto".to_string(), "echo/echo.proto".to_string()],
        "",
    )
    .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].content.contains("super::Empty"));
}

#[test]
fn generate_files___dependency_mapped___uses_crate_path() {
    let mut mapping = tempfile::NamedTempFile::new().unwrap();
    write!(mapping, "common_types\n1\ncommon/types.proto\n").unwrap();
    let parameter = format!("crate_mapping={}", mapping.path().display());

    let files = generate_files(
        &[types_file(), echo_with_dependency()],
        &["echo/echo.proto".to_string()],
        &parameter,
    )
    .unwrap();

    assert!(files[0].content.contains("::common_types::Empty"));
}

#[test]
fn generate_files___message_module_path___prefixes_local_types() {
    let files = generate_files(
        &[echo_file()],
        &["echo/echo.proto".to_string()],
        "message_module_path=crate::pb",
    )
    .unwrap();

    assert!(files[0].content.contains("crate::pb::EchoRequest"));
}

#[test]
fn generate_files___build_server_false___omits_server() {
    let files = generate_files(
        &[echo_file()],
        &["echo/echo.proto".to_string()],
        "build_server=false",
    )
    .unwrap();

    assert!(files[0].content.contains("pub mod echo_client"));
    assert!(!files[0].content.contains("pub mod echo_server"));
}

#[test]
fn generate_files___unknown_parameter___returns_error() {
    let err = generate_files(&[echo_file()], &["echo/echo.proto".to_string()], "colour=blue")
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("colour"), "{message}");
}

#[test]
fn generate_files___file_missing_from_request___returns_error() {
    let err = generate_files(&[echo_file()], &["other.proto".to_string()], "").unwrap_err();

    assert!(format!("{err:#}").contains("other.proto"));
}

// ============================================================================
// handle_request Tests
// ============================================================================

#[test]
fn handle_request___success___returns_files_without_error() {
    let response = handle_request(&request(vec![echo_file()], &["echo/echo.proto"], ""));

    assert!(response.error.is_none());
    assert_eq!(response.file.len(), 1);
    assert_eq!(response.file[0].name(), "echo/echo_grpc.pb.rs");
    assert!(!response.file[0].content().is_empty());
}

#[test]
fn handle_request___any_request___declares_proto3_optional() {
    let response = handle_request(&request(vec![types_file()], &["common/types.proto"], ""));

    assert_eq!(response.supported_features, Some(Feature::Proto3Optional as u64));
    assert!(response.file.is_empty());
}

#[test]
fn handle_request___failure___reports_error_with_no_files() {
    let response = handle_request(&request(
        vec![echo_file()],
        &["echo/echo.proto"],
        "build_client=maybe",
    ));

    assert!(response.file.is_empty());
    let error = response.error.unwrap();
    assert!(error.contains("build_client"), "{error}");
}

#[test]
fn handle_request___one_file_fails___reports_no_partial_output() {
    let response = handle_request(&request(
        vec![types_file(), echo_file(), echo_with_dependency_named("b.proto")],
        &["echo/echo.proto", "b.proto"],
        "",
    ));

    assert!(response.error.is_some());
    assert!(response.file.is_empty());
}

fn echo_with_dependency_named(name: &str) -> FileDescriptorProto {
    let mut file = echo_with_dependency();
    file.name = Some(name.to_string());
    file
}

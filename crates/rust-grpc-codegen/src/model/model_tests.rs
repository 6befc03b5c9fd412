#![allow(non_snake_case)]

use super::*;
use crate::descriptor::owned::{ProtoMessage, ProtoMethod, ProtoService};
use crate::options::GenerationOptions;
use test_case::test_case;

fn greeter() -> ProtoService {
    let request = ProtoMessage::new("HelloRequest", "helloworld.proto");
    let reply = ProtoMessage::new("HelloReply", "helloworld.proto");
    ProtoService::new("helloworld", "Greeter")
        .with_leading_comments(" The greeting service.\n")
        .with_method(
            ProtoMethod::new("SayHello", request.clone(), reply.clone())
                .with_trailing_comments(" Sends a greeting\n"),
        )
        .with_method(
            ProtoMethod::new("ChatStream", request, reply)
                .with_client_streaming(true)
                .with_server_streaming(true)
                .with_deprecated(true),
        )
}

#[test_case(false, false, StreamingShape::Unary ; "unary")]
#[test_case(false, true, StreamingShape::ServerStreaming ; "server streaming")]
#[test_case(true, false, StreamingShape::ClientStreaming ; "client streaming")]
#[test_case(true, true, StreamingShape::BidiStreaming ; "bidi streaming")]
fn StreamingShape___from_flags___classifies(client: bool, server: bool, expected: StreamingShape) {
    let shape = StreamingShape::from_flags(client, server);

    assert_eq!(shape, expected);
    assert_eq!(shape.is_client_streaming(), client);
    assert_eq!(shape.is_server_streaming(), server);
}

#[test]
fn StreamingShape___display___matches_runtime_call() {
    assert_eq!(StreamingShape::Unary.to_string(), "unary");
    assert_eq!(StreamingShape::BidiStreaming.to_string(), "streaming");
}

#[test]
fn Service___projections___use_rust_naming() {
    let descriptor = greeter();
    let service = Service::new(&descriptor);

    assert_eq!(service.name(), "Greeter");
    assert_eq!(service.full_name(), "helloworld.Greeter");
    assert_eq!(service.module_stem(), "greeter");
    assert_eq!(service.comment(), " The greeting service.\n");
}

#[test]
fn Service___snake_case_proto_name___becomes_upper_camel() {
    let descriptor = ProtoService::new("pkg", "route_guide");
    let service = Service::new(&descriptor);

    assert_eq!(service.name(), "RouteGuide");
    assert_eq!(service.module_stem(), "route_guide");
}

#[test]
fn Method___projections___use_rust_naming() {
    let descriptor = greeter();
    let service = Service::new(&descriptor);
    let methods: Vec<_> = service.methods().collect();

    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].name(), "say_hello");
    assert_eq!(methods[0].proto_name(), "SayHello");
    assert_eq!(methods[0].full_name(), "helloworld.Greeter.SayHello");
    assert_eq!(methods[0].streaming_shape(), StreamingShape::Unary);
    assert!(!methods[0].is_deprecated());
    assert_eq!(methods[1].streaming_shape(), StreamingShape::BidiStreaming);
    assert!(methods[1].is_deprecated());
}

#[test]
fn Method___comment___falls_back_to_trailing() {
    let descriptor = greeter();
    let service = Service::new(&descriptor);
    let methods: Vec<_> = service.methods().collect();

    assert_eq!(methods[0].comment(), " Sends a greeting\n");
    assert_eq!(methods[1].comment(), "");
}

#[test]
fn Method___keyword_name___is_escaped() {
    let msg = ProtoMessage::new("M", "a.proto");
    let descriptor = ProtoMethod::new("Move", msg.clone(), msg);
    let method = Method::new(&descriptor);

    assert_eq!(method.name(), "r#move");
}

#[test]
fn Method___message_types___resolve_at_depth() {
    let descriptor = greeter();
    let service = Service::new(&descriptor);
    let method = service.methods().next().unwrap();
    let options = GenerationOptions::default();
    let ctx = GenerationContext::new(&options, "helloworld.proto");

    assert_eq!(method.request_type(&ctx, 1).unwrap(), "super::HelloRequest");
    assert_eq!(method.response_type(&ctx, 0).unwrap(), "HelloReply");
}

#[test]
fn method_path___joins_service_and_method() {
    let msg = ProtoMessage::new("M", "a.proto");
    let descriptor = ProtoService::new("Pkg", "MyService")
        .with_method(ProtoMethod::new("MyMethod", msg.clone(), msg));
    let service = Service::new(&descriptor);
    let method = service.methods().next().unwrap();

    assert_eq!(method_path(&service, &method), "/Pkg.MyService/MyMethod");
}

#[test]
fn method_path___root_package___has_no_dot_prefix() {
    let msg = ProtoMessage::new("M", "a.proto");
    let descriptor = ProtoService::new("", "Echo").with_method(ProtoMethod::new("Ping", msg.clone(), msg));
    let service = Service::new(&descriptor);
    let method = service.methods().next().unwrap();

    assert_eq!(method_path(&service, &method), "/Echo/Ping");
}

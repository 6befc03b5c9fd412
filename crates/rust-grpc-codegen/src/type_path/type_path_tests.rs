#![allow(non_snake_case)]

use super::*;
use crate::crate_mapping::CrateMapping;
use crate::descriptor::owned::ProtoMessage;
use crate::options::GenerationOptions;
use test_case::test_case;

fn options_with_module(path: &str) -> GenerationOptions {
    GenerationOptions::new().with_message_module_path(path).unwrap()
}

fn mapped_options() -> GenerationOptions {
    GenerationOptions::new().with_crate_mapping(CrateMapping::parse("crate_a\n1\nfoo.proto\n").unwrap())
}

#[test_case(0, "HelloRequest" ; "depth zero")]
#[test_case(1, "super::HelloRequest" ; "depth one")]
#[test_case(2, "super::super::HelloRequest" ; "depth two")]
fn resolve_type_path___self_module___prefixes_super_per_level(depth: usize, expected: &str) {
    let options = GenerationOptions::default();
    let ctx = GenerationContext::new(&options, "hello.proto");
    let msg = ProtoMessage::new("HelloRequest", "hello.proto");

    let path = resolve_type_path(&*msg, &ctx, depth).unwrap();

    assert_eq!(path, expected);
}

#[test]
fn resolve_type_path___nested_message___uses_snake_case_parent_modules() {
    let options = GenerationOptions::default();
    let ctx = GenerationContext::new(&options, "a.proto");
    let outer = ProtoMessage::new("OuterMessage", "a.proto");
    let middle = ProtoMessage::nested(&outer, "MiddleLayer");
    let inner = ProtoMessage::nested(&middle, "Inner");

    let path = resolve_type_path(&*inner, &ctx, 1).unwrap();

    assert_eq!(path, "super::outer_message::middle_layer::Inner");
}

#[test]
fn resolve_type_path___keyword_names___are_escaped() {
    let options = GenerationOptions::default();
    let ctx = GenerationContext::new(&options, "a.proto");
    let outer = ProtoMessage::new("Type", "a.proto");
    let inner = ProtoMessage::nested(&outer, "Self");

    let path = resolve_type_path(&*inner, &ctx, 0).unwrap();

    assert_eq!(path, "r#type::Self_");
}

#[test]
fn resolve_type_path___relative_module_path___keeps_super_prefix() {
    let options = options_with_module("super::pb");
    let ctx = GenerationContext::new(&options, "a.proto");
    let msg = ProtoMessage::new("Req", "a.proto");

    let path = resolve_type_path(&*msg, &ctx, 1).unwrap();

    assert_eq!(path, "super::super::pb::Req");
}

#[test]
fn resolve_type_path___self_prefixed_module_path___drops_self() {
    let options = options_with_module("self::pb");
    let ctx = GenerationContext::new(&options, "a.proto");
    let msg = ProtoMessage::new("Req", "a.proto");

    let path = resolve_type_path(&*msg, &ctx, 1).unwrap();

    assert_eq!(path, "super::pb::Req");
}

#[test_case("crate::pb", "crate::pb::Req" ; "crate root")]
#[test_case("::pb_crate::pb", "::pb_crate::pb::Req" ; "global root")]
fn resolve_type_path___anchored_module_path___ignores_depth(module: &str, expected: &str) {
    let options = options_with_module(module);
    let ctx = GenerationContext::new(&options, "a.proto");
    let msg = ProtoMessage::new("Req", "a.proto");

    for depth in 0..3 {
        let path = resolve_type_path(&*msg, &ctx, depth).unwrap();
        assert_eq!(path, expected);
    }
}

#[test]
fn resolve_type_path___mapped_external_file___uses_absolute_crate_path() {
    let options = mapped_options();
    let ctx = GenerationContext::new(&options, "service.proto");
    let msg = ProtoMessage::new("Foo", "foo.proto");

    let path = resolve_type_path(&*msg, &ctx, 1).unwrap();

    assert_eq!(path, "::crate_a::Foo");
}

#[test]
fn resolve_type_path___mapped_external_nested___keeps_parent_modules() {
    let options = mapped_options().with_message_module_path("crate::pb").unwrap();
    let ctx = GenerationContext::new(&options, "service.proto");
    let outer = ProtoMessage::new("Outer", "foo.proto");
    let inner = ProtoMessage::nested(&outer, "Inner");

    let path = resolve_type_path(&*inner, &ctx, 2).unwrap();

    assert_eq!(path, "::crate_a::outer::Inner");
}

#[test]
fn resolve_type_path___unmapped_external_file___fails() {
    let options = GenerationOptions::default();
    let ctx = GenerationContext::new(&options, "service.proto");
    let msg = ProtoMessage::new("Empty", "google/protobuf/empty.proto");

    let result = resolve_type_path(&*msg, &ctx, 1);

    assert_eq!(
        result.unwrap_err(),
        CodegenError::UnmappedDependency {
            file: "google/protobuf/empty.proto".into(),
            type_name: "Empty".into(),
        }
    );
}

#[test]
fn resolve_type_path___file_in_current_crate___resolves_locally() {
    let options = GenerationOptions::default().with_files_in_current_crate(["service.proto", "common.proto"]);
    let ctx = GenerationContext::new(&options, "service.proto");
    let msg = ProtoMessage::new("Shared", "common.proto");

    let path = resolve_type_path(&*msg, &ctx, 1).unwrap();

    assert_eq!(path, "super::Shared");
}

#[test]
fn resolve_type_path___repeated_calls___are_identical() {
    let options = options_with_module("super::pb");
    let ctx = GenerationContext::new(&options, "a.proto");
    let outer = ProtoMessage::new("Outer", "a.proto");
    let inner = ProtoMessage::nested(&outer, "Inner");

    let first = resolve_type_path(&*inner, &ctx, 1).unwrap();
    let second = resolve_type_path(&*inner, &ctx, 1).unwrap();

    assert_eq!(first, second);
}

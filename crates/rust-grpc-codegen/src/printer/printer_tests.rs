#![allow(non_snake_case)]

use super::*;

fn render(vars: &[(&str, Value<'_>)], template: &str) -> CodegenResult<String> {
    let mut printer = Printer::new();
    printer.emit(vars, template)?;
    Ok(printer.into_output())
}

#[test]
fn Printer___inline_placeholders___are_substituted() {
    let output = render(
        &[("name", "Greeter".into()), ("kind", "struct".into())],
        "pub $kind$ $name$Client;",
    )
    .unwrap();

    assert_eq!(output, "pub struct GreeterClient;\n");
}

#[test]
fn Printer___template___is_dedented() {
    let output = render(
        &[],
        r"
            fn a() {
                b();
            }
        ",
    )
    .unwrap();

    assert_eq!(output, "fn a() {\n    b();\n}\n");
}

#[test]
fn Printer___double_dollar___prints_literal_dollar() {
    let output = render(&[], "let $$x = 1;").unwrap();

    assert_eq!(output, "let $x = 1;\n");
}

#[test]
fn Printer___blank_lines___carry_no_indentation() {
    let output = render(
        &[],
        r"
            mod m {
                fn a() {}

                fn b() {}
            }
        ",
    )
    .unwrap();

    assert_eq!(output, "mod m {\n    fn a() {}\n\n    fn b() {}\n}\n");
}

#[test]
fn Printer___standalone_text___is_indented_per_line() {
    let output = render(
        &[("doc", "/// one\n/// two\n".into())],
        r"
            impl X {
                $doc$
                fn f() {}
            }
        ",
    )
    .unwrap();

    assert_eq!(output, "impl X {\n    /// one\n    /// two\n    fn f() {}\n}\n");
}

#[test]
fn Printer___empty_standalone_text___drops_line() {
    let output = render(
        &[("attr", "".into())],
        r"
            $attr$
            fn f() {}
        ",
    )
    .unwrap();

    assert_eq!(output, "fn f() {}\n");
}

#[test]
fn Printer___emit_callback___nests_at_placeholder_indent() {
    let methods = |p: &mut Printer| -> CodegenResult<()> {
        for name in ["a", "b"] {
            p.emit(
                &[("name", name.into())],
                r"
                    fn $name$() {
                        todo!()
                    }
                ",
            )?;
        }
        Ok(())
    };

    let output = render(
        &[("methods", Value::emit(&methods))],
        r"
            impl X {
                $methods$
            }
        ",
    )
    .unwrap();

    assert_eq!(
        output,
        "impl X {\n    fn a() {\n        todo!()\n    }\n    fn b() {\n        todo!()\n    }\n}\n"
    );
}

#[test]
fn Printer___inline_emit___is_spliced_without_newline() {
    let ty = |p: &mut Printer| p.emit(&[], "String");

    let output = render(&[("ty", Value::emit(&ty))], "let x: $ty$ = v;").unwrap();

    assert_eq!(output, "let x: String = v;\n");
}

#[test]
fn Printer___callback_error___propagates() {
    let failing = |_: &mut Printer| -> CodegenResult<()> {
        Err(CodegenError::InvalidParameters("boom".into()))
    };

    let result = render(&[("x", Value::emit(&failing))], "$x$");

    assert_eq!(
        result.unwrap_err(),
        CodegenError::InvalidParameters("boom".into())
    );
}

#[test]
fn Printer___unbound_placeholder___is_undefined_variable() {
    let result = render(&[("a", "1".into())], "let v = $b$;");

    assert_eq!(
        result.unwrap_err(),
        CodegenError::UndefinedTemplateVariable("b".into())
    );
}

#[test]
fn Printer___unterminated_placeholder___is_malformed() {
    let result = render(&[], "let v = $oops;");

    assert!(matches!(result, Err(CodegenError::MalformedTemplate(_))));
}

#[test]
fn Printer___successive_emits___append() {
    let mut printer = Printer::new();

    printer.emit(&[], "a").unwrap();
    printer.emit(&[], "b").unwrap();

    assert_eq!(printer.output(), "a\nb\n");
}

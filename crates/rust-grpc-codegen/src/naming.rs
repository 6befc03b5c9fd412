//! Naming convention utilities for code generation.
//!
//! Converts protobuf identifiers into the identifiers used by generated Rust code.
//! The conversions mirror the ones applied by the protobuf Rust message generator,
//! so module names computed here line up with the modules it emits for nested
//! messages.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `CamelCase` | [`to_snake_case`] | `camel_case` |
//! | `snake_case` | [`to_upper_camel_case`] | `SnakeCase` |
//! | `type` | [`safe_identifier`] | `r#type` |
//! | `self` | [`safe_identifier`] | `self_` |

/// Keywords that are legal as raw identifiers (`r#keyword`).
const RAW_IDENTIFIER_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Identifiers that cannot be written as raw identifiers at all.
const NON_RAW_IDENTIFIERS: &[&str] = &["self", "super", "crate", "Self", "_"];

/// Convert CamelCase to snake_case.
///
/// An underscore is inserted before every uppercase ASCII letter except the first
/// character and letters that already follow an underscore.
///
/// # Examples
///
/// ```
/// use rust_grpc_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("SayHello"), "say_hello");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut last_was_underscore = false;

    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() && !last_was_underscore {
            result.push('_');
        }
        last_was_underscore = c == '_';
        result.push(c.to_ascii_lowercase());
    }

    result
}

/// Convert snake_case to UpperCamelCase.
///
/// Underscores are dropped and the character after each one is uppercased, as
/// is the first character. Everything else is left untouched.
///
/// # Examples
///
/// ```
/// use rust_grpc_codegen::naming::to_upper_camel_case;
///
/// assert_eq!(to_upper_camel_case("route_guide"), "RouteGuide");
/// assert_eq!(to_upper_camel_case("Greeter"), "Greeter");
/// ```
pub fn to_upper_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Returns true if `s` is a reserved word of the Rust language.
pub fn is_keyword(s: &str) -> bool {
    RAW_IDENTIFIER_KEYWORDS.contains(&s) || NON_RAW_IDENTIFIERS.contains(&s)
}

/// Make an identifier safe to use in generated Rust code.
///
/// Keywords become raw identifiers; the few words that cannot be raw
/// identifiers get a trailing underscore instead.
///
/// # Examples
///
/// ```
/// use rust_grpc_codegen::naming::safe_identifier;
///
/// assert_eq!(safe_identifier("type"), "r#type");
/// assert_eq!(safe_identifier("super"), "super_");
/// assert_eq!(safe_identifier("say_hello"), "say_hello");
/// ```
pub fn safe_identifier(s: &str) -> String {
    if NON_RAW_IDENTIFIERS.contains(&s) {
        format!("{s}_")
    } else if RAW_IDENTIFIER_KEYWORDS.contains(&s) {
        format!("r#{s}")
    } else {
        s.to_string()
    }
}

//! Rust paths to generated message types.
//!
//! Service code references request and response messages from inside its own
//! module (one level below the file root for `*_client` / `*_server`). Where the
//! message lives decides the shape of the path:
//!
//! - message from another crate: `::<crate>::<outer_module>::Message`
//! - message from the current crate: `super::` × depth, then
//!   `message_module_path`, then `<outer_module>::Message`
//!
//! Nested messages live in a module named after each enclosing message, so
//! `Outer.Inner` resolves to `outer::Inner`.

use crate::descriptor::MessageDescriptor;
use crate::error::{CodegenError, CodegenResult};
use crate::naming::{safe_identifier, to_snake_case};
use crate::options::{GenerationContext, SELF_MODULE_PATH};

/// Path to `msg` as seen from a module nested `depth` levels below the file root.
pub fn resolve_type_path<M: MessageDescriptor>(
    msg: &M,
    ctx: &GenerationContext<'_>,
    depth: usize,
) -> CodegenResult<String> {
    let within_module = format!("{}{}", nested_module_prefix(msg), safe_identifier(msg.name()));

    if !ctx.is_local(msg.file_name()) {
        let crate_name = ctx
            .options()
            .crate_mapping()
            .crate_for(msg.file_name())
            .ok_or_else(|| CodegenError::UnmappedDependency {
                file: msg.file_name().to_string(),
                type_name: msg.name().to_string(),
            })?;
        let path = format!("::{}::{}", safe_identifier(crate_name), within_module);
        tracing::trace!(message = msg.name(), %path, "resolved external type");
        return Ok(path);
    }

    let module_path = ctx.options().message_module_path();
    let (depth, module_prefix) = if module_path == SELF_MODULE_PATH {
        (depth, String::new())
    } else if module_path.starts_with("crate::") || module_path.starts_with("::") {
        // Anchored at the crate or global root.
        (0, format!("{module_path}::"))
    } else {
        // `self::x` from a nested module is `super::x`.
        let relative = module_path.strip_prefix("self::").unwrap_or(module_path);
        (depth, format!("{relative}::"))
    };

    let path = format!("{}{}{}", "super::".repeat(depth), module_prefix, within_module);
    tracing::trace!(message = msg.name(), %path, "resolved local type");
    Ok(path)
}

/// Module segments of the messages enclosing `msg`, outermost first, each
/// followed by `::`. Empty for top-level messages.
fn nested_module_prefix<M: MessageDescriptor>(msg: &M) -> String {
    let mut modules = Vec::new();
    let mut parent = msg.containing_type();
    while let Some(p) = parent {
        modules.push(safe_identifier(&to_snake_case(p.name())));
        parent = p.containing_type();
    }

    modules.iter().rev().map(|m| format!("{m}::")).collect()
}

#[cfg(test)]
#[path = "type_path/type_path_tests.rs"]
mod type_path_tests;

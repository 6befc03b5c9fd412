//! Template printer.
//!
//! Templates are string literals containing `$name$` placeholders. Each
//! placeholder is bound to a [`Value`]: plain text, or a callback that emits
//! nested templates through the same printer. `$$` prints a literal `$`.
//!
//! Templates are written indented the way they read in the surrounding Rust
//! source. Before printing, the first line is dropped if it is empty, a
//! trailing whitespace-only line is dropped, and the common indentation is
//! stripped. Output is then indented relative to the position where the
//! enclosing placeholder appeared.
//!
//! A placeholder that is alone on its line is expanded line by line at that
//! line's indentation. If it is bound to empty text the whole line is dropped,
//! which lets optional attributes and doc comments vanish without leaving a
//! blank line behind.

use crate::error::{CodegenError, CodegenResult};
use std::borrow::Cow;

/// Callback bound to a placeholder.
pub type EmitFn<'a> = &'a dyn Fn(&mut Printer) -> CodegenResult<()>;

/// Binding for a template placeholder.
pub enum Value<'a> {
    Text(Cow<'a, str>),
    Emit(EmitFn<'a>),
}

impl<'a> Value<'a> {
    /// Bind a nested emission callback.
    pub fn emit(f: EmitFn<'a>) -> Self {
        Value::Emit(f)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(text: &'a str) -> Self {
        Value::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Value<'_> {
    fn from(text: String) -> Self {
        Value::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(text: &'a String) -> Self {
        Value::Text(Cow::Borrowed(text.as_str()))
    }
}

/// Accumulates generated source text.
#[derive(Debug, Default)]
pub struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print `template` with its placeholders substituted from `vars`.
    pub fn emit(&mut self, vars: &[(&str, Value<'_>)], template: &str) -> CodegenResult<()> {
        for line in dedent(template) {
            if line.trim().is_empty() {
                self.output.push('\n');
                continue;
            }

            let line_indent = line.len() - line.trim_start().len();
            let body = &line[line_indent..];

            if let Some(name) = standalone_placeholder(body) {
                match lookup(vars, name)? {
                    Value::Text(text) => self.write_block(line_indent, text),
                    Value::Emit(f) => {
                        self.indent += line_indent;
                        let result = f(self);
                        self.indent -= line_indent;
                        result?;
                    }
                }
                continue;
            }

            let substituted = substitute(vars, body)?;
            self.write_line(line_indent, &substituted);
        }
        Ok(())
    }

    /// Print an empty line.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Text printed so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn write_block(&mut self, extra_indent: usize, text: &str) {
        for line in text.lines() {
            self.write_line(extra_indent, line);
        }
    }

    fn write_line(&mut self, extra_indent: usize, text: &str) {
        if !text.is_empty() {
            let width = self.indent + extra_indent;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.output.push_str(text);
        }
        self.output.push('\n');
    }
}

/// Lines of `template` with the common indentation removed.
fn dedent(template: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = template.split('\n').collect();
    if lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .into_iter()
        .map(|line| line.get(common..).unwrap_or(""))
        .collect()
}

/// Name of the placeholder if `body` consists of exactly one.
fn standalone_placeholder(body: &str) -> Option<&str> {
    let name = body.trim_end().strip_prefix('$')?.strip_suffix('$')?;
    let valid = !name.is_empty() && name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric());
    valid.then_some(name)
}

fn lookup<'v, 'a>(vars: &'v [(&str, Value<'a>)], name: &str) -> CodegenResult<&'v Value<'a>> {
    vars.iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .ok_or_else(|| CodegenError::UndefinedTemplateVariable(name.to_string()))
}

/// Replace every placeholder within a single line.
fn substitute(vars: &[(&str, Value<'_>)], body: &str) -> CodegenResult<String> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('$').ok_or_else(|| {
            CodegenError::MalformedTemplate(format!("unterminated placeholder in `{body}`"))
        })?;
        let name = &after[..end];

        if name.is_empty() {
            out.push('$');
        } else {
            match lookup(vars, name)? {
                Value::Text(text) => out.push_str(text),
                Value::Emit(f) => {
                    let mut nested = Printer::new();
                    f(&mut nested)?;
                    out.push_str(nested.output().trim_end_matches('\n'));
                }
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
#[path = "printer/printer_tests.rs"]
mod printer_tests;

//! Source comments to rustdoc.
//!
//! Proto comments are free text. Rendered as `///` lines they would otherwise be
//! interpreted as Markdown, so characters with Markdown meaning are escaped and
//! intra-doc links can never form.

/// Characters escaped with a backslash, after the backslash itself.
const MARKDOWN_SPECIAL: &[char] = &['`', '*', '_', '[', ']', '#', '<', '>'];

/// Render a raw comment as `///` doc lines, each terminated by `\n`.
///
/// Line breaks are `\n`, `\r\n` or a lone `\r`. Trailing blank lines are
/// dropped and an empty comment renders as nothing.
/// Lines starting with whitespace keep it after `///`; other lines are
/// separated from `///` by one space.
///
/// # Examples
///
/// ```
/// use rust_grpc_codegen::doc::render_doc;
///
/// assert_eq!(render_doc(" Sends a greeting\n"), "/// Sends a greeting\n");
/// assert_eq!(render_doc("Vec<u8>"), "/// Vec\\<u8\\>\n");
/// ```
pub fn render_doc(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let mut lines: Vec<&str> = normalized.split(['\n', '\r']).collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let mut out = String::new();
    for line in lines {
        if line.trim().is_empty() {
            out.push_str("///\n");
            continue;
        }
        out.push_str("///");
        if !line.starts_with(char::is_whitespace) {
            out.push(' ');
        }
        out.push_str(&escape_markdown(line));
        out.push('\n');
    }
    out
}

/// Backslash-escape every character with Markdown meaning.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || MARKDOWN_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

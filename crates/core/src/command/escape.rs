#![forbid(unsafe_code)]

use serde_json::Value;

/// Text may reach the renderer only if it carries no control characters
/// beyond TAB, LF and CR. Anything else fails the pass.
pub fn is_transport_safe(text: &str) -> bool {
    !text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
}

/// Double-quoted script string literal for `text`.
///
/// The literal is valid JSON, so a JSON parser reads back exactly `text`.
/// On top of the JSON escapes, `<`, `>`, `&` and the two JS line terminators
/// are written as `\uXXXX` so the literal cannot close a `<script>` element.
pub fn js_string(text: &str) -> String {
    let json = Value::String(text.to_string()).to_string();
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

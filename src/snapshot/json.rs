/// Appends `s` to `out` as a quoted JSON string literal.
///
/// Escapes the quote, backslash, backspace, form feed, newline, carriage
/// return and tab with their short escapes, and every other character below
/// U+0020 as `\u00xx`. Everything else is passed through verbatim, so any
/// string survives a parse by a standard JSON parser byte for byte.
pub fn encode_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

use crate::{Render, Writer};

/// Escape text for HTML content and attribute values.
///
/// `& < > " '` become `&amp; &lt; &gt; &quot; &#x27;`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

pub(crate) fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

/// Render a value for an interpolated attribute hole.
///
/// Text is escaped; booleans print `true` / `false`; absent values print
/// nothing.
pub fn attr<T: Render + ?Sized>(value: &T) -> String {
    let mut w = Writer::new();
    value.render_attr(&mut w);
    w.finish()
}

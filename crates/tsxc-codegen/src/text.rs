//! Text helpers: Rust and HTML escaping, identifiers, markup whitespace.

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

// ══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ══════════════════════════════════════════════════════════════════════════════

/// Whether `name` is an ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Emit `name` as a Rust identifier, using `r#` for keywords.
pub fn rust_ident(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// `Layout` → `layout`, `HTMLPage` → `html_page`, `nav-bar` → `nav_bar`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next_lower,
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

// ══════════════════════════════════════════════════════════════════════════════
// Escaping
// ══════════════════════════════════════════════════════════════════════════════

fn push_rust_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
        c => out.push(c),
    }
}

/// A quoted Rust string literal.
pub fn rust_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        push_rust_escaped(&mut out, c);
    }
    out.push('"');
    out
}

/// Literal text inside a `format!` string, unquoted: Rust-escaped with
/// `{` and `}` doubled.
pub fn format_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            c => push_rust_escaped(&mut out, c),
        }
    }
    out
}

/// HTML escaping, identical to the runtime's `escape_html`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
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
    out
}

/// Indent every line after the first by `spaces`.
pub fn indent_tail(s: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::with_capacity(s.len());
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&pad);
            }
        }
        out.push_str(line);
    }
    out
}

// ══════════════════════════════════════════════════════════════════════════════
// Markup Text
// ══════════════════════════════════════════════════════════════════════════════

/// Apply JSX whitespace rules to a text run.
///
/// Lines are trimmed (leading whitespace except on the first line, trailing
/// except on the last), lines that become empty are dropped, and the rest are
/// joined with a single space. Returns `None` when nothing remains.
pub fn markup_text(raw: &str) -> Option<String> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let last_non_empty = lines
        .iter()
        .rposition(|l| l.chars().any(|c| c != ' ' && c != '\t'))
        .unwrap_or(0);
    let last = lines.len() - 1;

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let mut trimmed: &str = line;
        if i != 0 {
            trimmed = trimmed.trim_start_matches([' ', '\t']);
        }
        if i != last {
            trimmed = trimmed.trim_end_matches([' ', '\t']);
        }
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(&trimmed.replace('\t', " "));
        if i != last_non_empty {
            out.push(' ');
        }
    }
    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("title"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("data-id"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(rust_ident("type"), "r#type");
        assert_eq!(rust_ident("match"), "r#match");
        assert_eq!(rust_ident("self"), "self_");
        assert_eq!(rust_ident("title"), "title");
    }

    #[test]
    fn snake_case_file_stems() {
        assert_eq!(snake_case("Layout"), "layout");
        assert_eq!(snake_case("MyComponent"), "my_component");
        assert_eq!(snake_case("HTMLPage"), "html_page");
        assert_eq!(snake_case("Html2"), "html2");
        assert_eq!(snake_case("nav-bar"), "nav_bar");
        assert_eq!(snake_case("2col"), "_2col");
    }

    #[test]
    fn rust_strings() {
        assert_eq!(rust_string("a\"b\\c\n"), r#""a\"b\\c\n""#);
        assert_eq!(rust_string("\u{1}"), r#""\u{1}""#);
    }

    #[test]
    fn format_literals_double_braces() {
        assert_eq!(format_literal("{a}\""), r#"{{a}}\""#);
    }

    #[test]
    fn html_escaping() {
        assert_eq!(escape_html("a < b & 'c'"), "a &lt; b &amp; &#x27;c&#x27;");
    }

    #[test]
    fn indent_tail_skips_first_line() {
        assert_eq!(indent_tail("a(\n1\n\n)", 4), "a(\n    1\n\n    )");
    }

    #[test]
    fn markup_text_same_line_space_is_kept() {
        assert_eq!(markup_text(" ").as_deref(), Some(" "));
        assert_eq!(markup_text("Hello, ").as_deref(), Some("Hello, "));
    }

    #[test]
    fn markup_text_whitespace_with_line_break_vanishes() {
        assert_eq!(markup_text("\n    "), None);
        assert_eq!(markup_text("  \n\t\n  "), None);
    }

    #[test]
    fn markup_text_lines_are_joined() {
        assert_eq!(
            markup_text("\n    Hello\n    world  \n  ").as_deref(),
            Some("Hello world")
        );
        assert_eq!(markup_text("a  \n  b").as_deref(), Some("a b"));
        assert_eq!(markup_text("  lead\n").as_deref(), Some("  lead"));
    }
}

use std::fmt::Write as _;

use html_escape::decode_html_entities;

/// Prepare embedded page-state text for JSON parsing.
///
/// Entities are decoded over the whole text first, then every whitespace run
/// outside a JSON string literal collapses to a single space. Inside string
/// literals, raw control characters (often produced by `&#10;` or `&#9;`) are
/// rewritten as JSON escapes and everything else is copied as-is.
pub fn normalize(text: &str) -> String {
    let decoded = decode_html_entities(text);
    collapse_whitespace(&decoded)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut pending_space = false;

    for c in text.chars() {
        if in_string {
            push_string_char(&mut out, c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    out
}

fn push_string_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if u32::from(c) < 0x20 => {
            let _ = write!(out, "\\u{:04x}", u32::from(c));
        }
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_decodes_plain_text() {
        assert_eq!(
            normalize("line1\n\n   line2 &amp; line3"),
            "line1 line2 & line3"
        );
    }

    #[test]
    fn trims_both_ends() {
        assert_eq!(normalize("\n\t  {\"a\":1}  \r\n"), "{\"a\":1}");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(normalize("&#60;b&#x3E; &lt;i&gt;"), "<b> <i>");
    }

    #[test]
    fn whitespace_inside_strings_untouched() {
        let raw = "{\n  \"address\": \"123   Main  St\",\n  \"beds\": 3\n}";
        assert_eq!(normalize(raw), "{ \"address\": \"123   Main  St\", \"beds\": 3 }");
    }

    #[test]
    fn escaped_quote_keeps_string_open() {
        let raw = r#"{"q": "say \"hi   there\"",   "n": 1}"#;
        assert_eq!(normalize(raw), r#"{"q": "say \"hi   there\"", "n": 1}"#);
    }

    #[test]
    fn escaped_backslash_closes_string() {
        let raw = r#"{"path": "C:\\",    "n": 1}"#;
        assert_eq!(normalize(raw), r#"{"path": "C:\\", "n": 1}"#);
    }

    #[test]
    fn normalized_json_still_parses() {
        let raw = "{\n\"props\" :\n\n {\"title\": \"Tom &amp; Jerry\"}\n}";
        let text = normalize(raw);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["props"]["title"], "Tom & Jerry");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn entity_encoded_newline_in_string_is_escaped() {
        let raw = "{\"props\":{\"pageProps\":{\"componentProps\":{\"d\":\"Updated&#10;kitchen\"}}}}";
        let text = normalize(raw);
        assert!(text.contains(r#""Updated\nkitchen""#));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value["props"]["pageProps"]["componentProps"]["d"],
            "Updated\nkitchen"
        );
    }

    #[test]
    fn raw_control_whitespace_in_string_is_escaped() {
        assert_eq!(normalize("{\"d\":\"a\tb\rc\"}"), r#"{"d":"a\tb\rc"}"#);
        let value: serde_json::Value = serde_json::from_str(&normalize("{\"d\": \"a&#9;b\u{1}\"}")).unwrap();
        assert_eq!(value["d"], "a\tb\u{1}");
    }

    #[test]
    fn idempotent_on_its_output() {
        let once = normalize("{ \"a\" :  [1,\n 2] }  &amp;");
        assert_eq!(normalize(&once), once);
    }
}

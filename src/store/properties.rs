//! Reader and writer for Java `.properties` text.
//!
//! The store is shared with the JVM side of Arc, so the writer escapes
//! everything `java.util.Properties::load` would otherwise misread, and the
//! reader accepts the constructs Java tooling produces (comments, `:` and
//! whitespace separators, line continuations, `\uXXXX` escapes).

use std::collections::BTreeMap;

/// Parse properties text into a key-sorted map. Later duplicates win.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    let mut logical = String::new();

    for raw in content.lines() {
        let line = raw.trim_start_matches(is_blank);

        if logical.is_empty() && (line.is_empty() || line.starts_with(&['#', '!'][..])) {
            continue;
        }

        logical.push_str(line);

        if ends_with_continuation(&logical) {
            logical.pop();
            continue;
        }

        let (key, value) = split_entry(&logical);
        entries.insert(unescape(key), unescape(value));
        logical.clear();
    }

    // Continuation on the last line of the file
    if !logical.is_empty() {
        let (key, value) = split_entry(&logical);
        entries.insert(unescape(key), unescape(value));
    }

    entries
}

/// Render entries as one `key=value` line each, in map order.
pub fn render(entries: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// An odd number of trailing backslashes continues the entry on the next line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_utf16(&mut units, &mut out);
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let well_formed = hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit());
                match u16::from_str_radix(&hex, 16) {
                    Ok(unit) if well_formed => units.push(unit),
                    _ => {
                        flush_utf16(&mut units, &mut out);
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                flush_utf16(&mut units, &mut out);
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\x0c',
                    c => c,
                });
            }
            None => flush_utf16(&mut units, &mut out),
        }
    }

    flush_utf16(&mut units, &mut out);
    out
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());

    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            c if (' '..='~').contains(&c) => out.push(c),
            c => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_simple_entries() {
        let parsed = parse("ARC_AI_URL=https://example.com\nARC_AI_KEY = secret\n");
        assert_eq!(
            parsed,
            map(&[
                ("ARC_AI_KEY", "secret"),
                ("ARC_AI_URL", "https://example.com")
            ])
        );
    }

    #[test]
    fn test_parse_java_header_and_separators() {
        let content = "#Arc settings\n#Mon Oct 19 10:00:00 CEST 2026\n! legacy comment\n\n\
                       a:1\nb 2\n   c   =   3\n";
        let parsed = parse(content);
        assert_eq!(parsed, map(&[("a", "1"), ("b", "2"), ("c", "3")]));
    }

    #[test]
    fn test_parse_escaped_url_written_by_java() {
        let parsed = parse("ARC_AI_URL=https\\://my-endpoint.openai.azure.com/\n");
        assert_eq!(parsed["ARC_AI_URL"], "https://my-endpoint.openai.azure.com/");
    }

    #[test]
    fn test_parse_continuation_lines() {
        let parsed = parse("list = one, \\\n        two, \\\n        three\nnext=x\n");
        assert_eq!(parsed["list"], "one, two, three");
        assert_eq!(parsed["next"], "x");
    }

    #[test]
    fn test_parse_even_backslashes_are_not_continuation() {
        let parsed = parse("path=C\\:\\\\\nother=1\n");
        assert_eq!(parsed["path"], "C:\\");
        assert_eq!(parsed["other"], "1");
    }

    #[test]
    fn test_parse_unicode_escapes_and_surrogates() {
        let parsed = parse("greeting=caf\\u00E9 \\uD83D\\uDE80\n");
        assert_eq!(parsed["greeting"], "café 🚀");
    }

    #[test]
    fn test_parse_malformed_unicode_escape_is_kept_literally() {
        let parsed = parse("a=\\u+041\nb=\\u12\nc=\\u-7FF\n");
        assert_eq!(parsed["a"], "u+041");
        assert_eq!(parsed["b"], "u12");
        assert_eq!(parsed["c"], "u-7FF");
    }

    #[test]
    fn test_parse_last_write_wins() {
        let parsed = parse("k=first\nk=second\n");
        assert_eq!(parsed, map(&[("k", "second")]));
    }

    #[test]
    fn test_parse_key_without_value() {
        let parsed = parse("empty\nalso=\n");
        assert_eq!(parsed["empty"], "");
        assert_eq!(parsed["also"], "");
    }

    #[test]
    fn test_render_escapes_special_characters() {
        let rendered = render(&map(&[
            ("arc.ai.clients[0].url", "https://host:8443/a#b"),
            ("key with space", " leading"),
        ]));
        assert_eq!(
            rendered,
            "arc.ai.clients[0].url=https\\://host\\:8443/a\\#b\n\
             key\\ with\\ space=\\ leading\n"
        );
    }

    #[test]
    fn test_render_non_ascii_as_unicode_escapes() {
        let rendered = render(&map(&[("name", "café 🚀")]));
        assert_eq!(rendered, "name=caf\\u00E9 \\uD83D\\uDE80\n");
    }

    #[test]
    fn test_rendered_text_reads_back_unchanged() {
        let original = map(&[
            ("ARC_AI_KEY", "s3cr=t:!#"),
            ("multi", "line one\nline two\ttab"),
            ("odd key", "  spaced  "),
            ("trailing", "ends with \\"),
            ("unicode", "Grüße"),
        ]);

        let rendered = render(&original);
        let parsed = parse(&rendered);
        assert_eq!(parsed, original);
        assert_eq!(render(&parsed), rendered);
    }
}

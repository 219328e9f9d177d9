//! Property file formats.
//!
//! # Responsibilities
//! - Parse line-oriented `key=value` property files
//! - Parse TOML property files, flattening nested tables to dotted keys
//!
//! # Design Decisions
//! - Format is chosen by file extension; `.toml` is TOML, everything else is
//!   the line-oriented format
//! - The line-oriented parser never fails: malformed lines become keys with
//!   empty values, the way `java.util.Properties`-style readers behave

use crate::properties::PropertyBag;

/// Supported property file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFormat {
    Lines,
    Toml,
}

impl PropertyFormat {
    /// Pick a format from a resource path or URL.
    pub fn for_source(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        if path.to_ascii_lowercase().ends_with(".toml") {
            PropertyFormat::Toml
        } else {
            PropertyFormat::Lines
        }
    }

    pub fn parse(self, text: &str) -> Result<PropertyBag, toml::de::Error> {
        match self {
            PropertyFormat::Lines => Ok(parse_lines(text)),
            PropertyFormat::Toml => parse_toml(text),
        }
    }
}

/// Parse the line-oriented format.
pub fn parse_lines(text: &str) -> PropertyBag {
    let mut bag = PropertyBag::new();
    let mut logical = String::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if logical.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        if ends_with_continuation(line) {
            logical.push_str(&line[..line.len() - 1]);
            continue;
        }
        logical.push_str(line);

        let (key, value) = split_pair(&logical);
        bag.insert(unescape(key), unescape(value));
        logical.clear();
    }

    if !logical.is_empty() {
        let (key, value) = split_pair(&logical);
        bag.insert(unescape(key), unescape(value));
    }
    bag
}

// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_pair(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                return (line[..index].trim_end(), line[index + 1..].trim_start());
            }
            c if c.is_whitespace() => {
                let rest = line[index..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..index], rest.trim_start());
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Parse a TOML document into a flat bag.
pub fn parse_toml(text: &str) -> Result<PropertyBag, toml::de::Error> {
    let table: toml::Table = toml::from_str(text)?;
    let mut bag = PropertyBag::new();
    flatten_table("", &table, &mut bag);
    Ok(bag)
}

fn flatten_table(prefix: &str, table: &toml::Table, bag: &mut PropertyBag) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&full_key, nested, bag),
            other => {
                bag.insert(full_key, scalar_to_string(other));
            }
        }
    }
}

fn scalar_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Table(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_separators_and_comments() {
        let text = "# comment\n! also comment\n\ndriver=org.h2.Driver\nurl : jdbc:h2:mem:test\nusername sa\npassword=\n";
        let bag = parse_lines(text);

        assert_eq!(bag.get("driver"), Some("org.h2.Driver"));
        assert_eq!(bag.get("url"), Some("jdbc:h2:mem:test"));
        assert_eq!(bag.get("username"), Some("sa"));
        assert_eq!(bag.get("password"), Some(""));
        assert_eq!(bag.len(), 4);
    }

    #[test]
    fn test_parse_lines_continuation_and_escapes() {
        let text = "methods=equals,\\\n    hashCode\nkey\\ with\\ spaces=a\\tb\nsnow=\\u2603\n";
        let bag = parse_lines(text);

        assert_eq!(bag.get("methods"), Some("equals,hashCode"));
        assert_eq!(bag.get("key with spaces"), Some("a\tb"));
        assert_eq!(bag.get("snow"), Some("\u{2603}"));
    }

    #[test]
    fn test_parse_lines_escaped_trailing_space_ends_continuation() {
        let bag = parse_lines("a=b\\\n  c\\ \nd=e\n");

        assert_eq!(bag.get("a"), Some("bc "));
        assert_eq!(bag.get("d"), Some("e"));
    }

    #[test]
    fn test_parse_toml_flattens_tables() {
        let text = "username = \"app\"\n[pool]\nmax_active = 10\nping = true\n";
        let bag = parse_toml(text).unwrap();

        assert_eq!(bag.get("username"), Some("app"));
        assert_eq!(bag.get("pool.max_active"), Some("10"));
        assert_eq!(bag.get("pool.ping"), Some("true"));
    }

    #[test]
    fn test_format_for_source() {
        assert_eq!(PropertyFormat::for_source("conf/db.toml"), PropertyFormat::Toml);
        assert_eq!(PropertyFormat::for_source("http://host/db.TOML?v=1"), PropertyFormat::Toml);
        assert_eq!(PropertyFormat::for_source("db.properties"), PropertyFormat::Lines);
    }
}

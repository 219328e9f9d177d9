//! `${...}` placeholder expansion.
//!
//! Unknown keys are left verbatim. `\${` produces a literal `${`. When the
//! variable `sqlmap.parsing.enable-default-value` is `true`, `${key:fallback}`
//! yields `fallback` for unknown keys; the separator is configurable through
//! `sqlmap.parsing.default-value-separator`.

use crate::properties::PropertyBag;

pub const ENABLE_DEFAULT_VALUE: &str = "sqlmap.parsing.enable-default-value";
pub const DEFAULT_VALUE_SEPARATOR: &str = "sqlmap.parsing.default-value-separator";

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Expands placeholders against a variable bag.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderResolver<'a> {
    variables: &'a PropertyBag,
    default_separator: Option<&'a str>,
}

impl<'a> PlaceholderResolver<'a> {
    pub fn new(variables: &'a PropertyBag) -> Self {
        let enabled = variables
            .get(ENABLE_DEFAULT_VALUE)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let default_separator =
            enabled.then(|| variables.get(DEFAULT_VALUE_SEPARATOR).unwrap_or(":"));
        Self {
            variables,
            default_separator,
        }
    }

    pub fn resolve(&self, text: &str) -> String {
        if !text.contains(OPEN) {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            if rest[..start].ends_with('\\') {
                out.push_str(&rest[..start - 1]);
                out.push_str(OPEN);
                rest = &rest[start + OPEN.len()..];
                continue;
            }

            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                out.push_str(&rest[start..]);
                return out;
            };

            let expression = &after_open[..end];
            match self.lookup(expression) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str(OPEN);
                    out.push_str(expression);
                    out.push(CLOSE);
                }
            }
            rest = &after_open[end + 1..];
        }
        out.push_str(rest);
        out
    }

    fn lookup<'s>(&self, expression: &'s str) -> Option<&'s str>
    where
        'a: 's,
    {
        if let Some(separator) = self.default_separator.filter(|s| !s.is_empty()) {
            if let Some((key, fallback)) = expression.split_once(separator) {
                return Some(self.variables.get(key).unwrap_or(fallback));
            }
        }
        self.variables.get(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> PropertyBag {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_expands_known_and_keeps_unknown() {
        let vars = vars(&[("user", "sa")]);
        let resolver = PlaceholderResolver::new(&vars);

        assert_eq!(resolver.resolve("${user}/${password}"), "sa/${password}");
        assert_eq!(resolver.resolve("plain"), "plain");
        assert_eq!(resolver.resolve("open ${user"), "open ${user");
    }

    #[test]
    fn test_escaped_placeholder() {
        let vars = vars(&[("user", "sa")]);
        let resolver = PlaceholderResolver::new(&vars);
        assert_eq!(resolver.resolve("\\${user} ${user}"), "${user} sa");
    }

    #[test]
    fn test_default_values_only_when_enabled() {
        let disabled = vars(&[]);
        assert_eq!(
            PlaceholderResolver::new(&disabled).resolve("${user:guest}"),
            "${user:guest}"
        );

        let enabled = vars(&[(ENABLE_DEFAULT_VALUE, "true")]);
        assert_eq!(PlaceholderResolver::new(&enabled).resolve("${user:guest}"), "guest");

        let custom = vars(&[
            (ENABLE_DEFAULT_VALUE, "true"),
            (DEFAULT_VALUE_SEPARATOR, "?:"),
            ("user", "sa"),
        ]);
        let resolver = PlaceholderResolver::new(&custom);
        assert_eq!(resolver.resolve("${user?:guest}"), "sa");
        assert_eq!(resolver.resolve("${db?:jdbc:h2:mem}"), "jdbc:h2:mem");
    }
}

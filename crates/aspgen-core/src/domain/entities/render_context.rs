//! Variables and flags for rendering a template.
//!
//! ## Syntax
//!
//! - `{{VARIABLE}}` is replaced by the variable's value. Unknown placeholders
//!   are left untouched.
//! - Line-level blocks: a line consisting only of `{{#if FLAG}}`,
//!   `{{#unless FLAG}}`, `{{else}}`, `{{/if}}` or `{{/unless}}` opens, flips
//!   or closes a block. Directive lines never appear in the output.
//!
//! A flag is set when it was added with [`RenderContext::with_flag`] or when a
//! variable of that name holds a truthy value (anything except empty, `false`
//! and `0`).
//!
//! ## Built-in Variables
//!
//! | Variable | Example | Source |
//! |----------|---------|--------|
//! | `NAMESPACE` | "MyNamespace" | Project context |
//! | `SDK_VERSION` | "1.1.0" | Fixed |
//! | `NAME` | "CartTagHelper" | Name argument / application name |
//! | `NAME_CAMEL` | "cartTagHelper" | Computed |
//! | `NAME_PASCAL` | "CartTagHelper" | Computed |
//! | `NAME_SNAKE` | "cart_tag_helper" | Computed |
//! | `NAME_KEBAB` | "cart-tag-helper" | Computed |
//!
//! There are no timestamps or random values, so equal inputs always render
//! byte-for-byte equal output.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{capabilities::SDK_VERSION, error::DomainError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
    flags: BTreeSet<String>,
}

impl RenderContext {
    /// Context with `NAMESPACE` and `SDK_VERSION` set.
    pub fn new(namespace: impl Into<String>) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("NAMESPACE".to_string(), namespace.into());
        variables.insert("SDK_VERSION".to_string(), SDK_VERSION.to_string());
        Self {
            variables,
            flags: BTreeSet::new(),
        }
    }

    /// Set `NAME` and its case variants.
    pub fn with_name(self, name: &str) -> Self {
        self.with_variable("NAME", name)
            .with_variable("NAME_CAMEL", to_camel_case(name))
            .with_variable("NAME_PASCAL", to_pascal_case(name))
            .with_variable("NAME_SNAKE", to_snake_case(name))
            .with_variable("NAME_KEBAB", to_kebab_case(name))
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
            || self
                .variables
                .get(flag)
                .is_some_and(|v| !matches!(v.trim(), "" | "false" | "0"))
    }

    /// Render template text.
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` when blocks are unbalanced.
    pub fn render(&self, template: &str) -> Result<String, DomainError> {
        let selected = self.select_lines(template)?;
        Ok(self.substitute(&selected))
    }

    /// Render a single-line value such as a path. Blocks are not allowed here.
    pub fn render_inline(&self, text: &str) -> String {
        self.substitute(text)
    }

    fn select_lines(&self, template: &str) -> Result<String, DomainError> {
        // Each frame: (block keyword, condition currently selected)
        let mut stack: Vec<(&'static str, bool)> = Vec::new();
        let mut out = String::with_capacity(template.len());

        for (index, line) in template.split_inclusive('\n').enumerate() {
            let line_no = index + 1;
            match Directive::parse(line.trim()) {
                Some(Directive::Open { keyword, flag }) => {
                    let set = self.is_set(flag);
                    let selected = if keyword == "if" { set } else { !set };
                    stack.push((keyword, selected));
                }
                Some(Directive::Else) => match stack.last_mut() {
                    Some(frame) => frame.1 = !frame.1,
                    None => {
                        return Err(DomainError::InvalidTemplate(format!(
                            "line {line_no}: {{{{else}}}} outside of a block"
                        )));
                    }
                },
                Some(Directive::Close { keyword }) => match stack.pop() {
                    Some((open, _)) if open == keyword => {}
                    Some((open, _)) => {
                        return Err(DomainError::InvalidTemplate(format!(
                            "line {line_no}: {{{{/{keyword}}}}} closes a '{open}' block"
                        )));
                    }
                    None => {
                        return Err(DomainError::InvalidTemplate(format!(
                            "line {line_no}: {{{{/{keyword}}}}} without an open block"
                        )));
                    }
                },
                None => {
                    if stack.iter().all(|(_, selected)| *selected) {
                        out.push_str(line);
                    }
                }
            }
        }

        if let Some((open, _)) = stack.last() {
            return Err(DomainError::InvalidTemplate(format!(
                "unclosed '{open}' block"
            )));
        }
        Ok(out)
    }

    fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    match self.variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

enum Directive<'a> {
    Open { keyword: &'static str, flag: &'a str },
    Else,
    Close { keyword: &'static str },
}

impl<'a> Directive<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let inner = line.strip_prefix("{{")?.strip_suffix("}}")?.trim();
        if inner == "else" {
            return Some(Self::Else);
        }
        if let Some(flag) = inner.strip_prefix("#if ") {
            return Some(Self::Open { keyword: "if", flag: flag.trim() });
        }
        if let Some(flag) = inner.strip_prefix("#unless ") {
            return Some(Self::Open { keyword: "unless", flag: flag.trim() });
        }
        match inner {
            "/if" => Some(Self::Close { keyword: "if" }),
            "/unless" => Some(Self::Close { keyword: "unless" }),
            _ => None,
        }
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut iter = words.iter();
    let mut out = iter.next().cloned().unwrap_or_default();
    out.extend(iter.map(|w| capitalize(w)));
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split an identifier into lowercase words.
///
/// Boundaries: `_`, `-`, `.` and whitespace; a lower-to-upper transition
/// (`myApp`); and the end of an acronym (`HTTPServer` splits before `S`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);

        if let Some(&next) = chars.peek() {
            let lower_to_upper = c.is_lowercase() && next.is_uppercase();
            let acronym_end = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if lower_to_upper || acronym_end {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_and_keeps_unknown() {
        let ctx = RenderContext::new("MyNamespace");
        assert_eq!(
            ctx.render("namespace {{NAMESPACE}} {{ MISSING }}").unwrap(),
            "namespace MyNamespace {{ MISSING }}"
        );
    }

    #[test]
    fn values_are_not_rescanned() {
        let ctx = RenderContext::new("{{SDK_VERSION}}");
        assert_eq!(ctx.render("{{NAMESPACE}}").unwrap(), "{{SDK_VERSION}}");
    }

    #[test]
    fn name_variants() {
        let ctx = RenderContext::new("N").with_name("CartTagHelper");
        assert_eq!(ctx.get("NAME_CAMEL"), Some("cartTagHelper"));
        assert_eq!(ctx.get("NAME_SNAKE"), Some("cart_tag_helper"));
        assert_eq!(ctx.get("NAME_KEBAB"), Some("cart-tag-helper"));
        assert_eq!(ctx.get("NAME_PASCAL"), Some("CartTagHelper"));

        let ctx = RenderContext::new("N").with_name("HTTPServer");
        assert_eq!(ctx.get("NAME_SNAKE"), Some("http_server"));
    }

    #[test]
    fn if_blocks_follow_flags() {
        let template = "a\n{{#if SQLITE}}\nsqlite\n{{else}}\nplain\n{{/if}}\nb\n";
        let off = RenderContext::new("N");
        let on = RenderContext::new("N").with_flag("SQLITE");

        assert_eq!(off.render(template).unwrap(), "a\nplain\nb\n");
        assert_eq!(on.render(template).unwrap(), "a\nsqlite\nb\n");
    }

    #[test]
    fn unless_and_nesting() {
        let template = "{{#unless TXT}}\nmd\n{{#if EXTRA}}\nextra\n{{/if}}\n{{/unless}}\n";
        let ctx = RenderContext::new("N").with_variable("EXTRA", "true");
        assert_eq!(ctx.render(template).unwrap(), "md\nextra\n");
        assert_eq!(ctx.with_flag("TXT").render(template).unwrap(), "");
    }

    #[test]
    fn variable_truthiness() {
        let ctx = RenderContext::new("N")
            .with_variable("A", "false")
            .with_variable("B", "0")
            .with_variable("C", "yes");
        assert!(!ctx.is_set("A"));
        assert!(!ctx.is_set("B"));
        assert!(ctx.is_set("C"));
        assert!(!ctx.is_set("D"));
    }

    #[test]
    fn unbalanced_blocks_are_errors() {
        let ctx = RenderContext::new("N");
        assert!(ctx.render("{{#if X}}\nbody\n").is_err());
        assert!(ctx.render("{{/if}}\n").is_err());
        assert!(ctx.render("{{#if X}}\n{{/unless}}\n").is_err());
        assert!(ctx.render("{{else}}\n").is_err());
    }

    #[test]
    fn inline_directives_are_plain_text() {
        let ctx = RenderContext::new("N");
        assert_eq!(
            ctx.render("x {{#if A}} y\n").unwrap(),
            "x {{#if A}} y\n"
        );
    }
}

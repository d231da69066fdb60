//! Project context read from the working directory before generating.
//!
//! Generators that emit C# need a namespace. It comes from the project
//! descriptor (`project.json`) when one exists in the working directory:
//! its `title`, or failing that the directory's own name. Without a
//! descriptor the namespace is [`DEFAULT_NAMESPACE`].

use crate::domain::error::DomainError;

pub const DEFAULT_NAMESPACE: &str = "MyNamespace";

/// File name of the project descriptor.
pub const PROJECT_DESCRIPTOR: &str = "project.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    namespace: String,
    has_descriptor: bool,
}

impl ProjectContext {
    /// Context for a directory without a project descriptor.
    pub fn standalone() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            has_descriptor: false,
        }
    }

    /// Context from descriptor text found in a directory named `dir_name`.
    ///
    /// # Errors
    ///
    /// `InvalidProjectDescriptor` if the text is not a JSON object.
    pub fn from_descriptor(text: &str, dir_name: Option<&str>) -> Result<Self, DomainError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DomainError::InvalidProjectDescriptor(e.to_string()))?;
        if !value.is_object() {
            return Err(DomainError::InvalidProjectDescriptor(
                "top-level value must be an object".into(),
            ));
        }
        // A non-string `title` counts as absent.
        let raw = value
            .get("title")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or(dir_name)
            .unwrap_or(DEFAULT_NAMESPACE);

        Ok(Self {
            namespace: sanitize_namespace(raw),
            has_descriptor: true,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn has_descriptor(&self) -> bool {
        self.has_descriptor
    }
}

/// Turn an arbitrary project or directory name into a C# namespace.
///
/// Characters outside `[A-Za-z0-9_.]` become `_`; a leading digit gets a `_`
/// prefix; an empty result falls back to [`DEFAULT_NAMESPACE`].
pub fn sanitize_namespace(raw: &str) -> String {
    let mut out: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if out.is_empty() {
        return DEFAULT_NAMESPACE.to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_uses_default() {
        assert_eq!(ProjectContext::standalone().namespace(), "MyNamespace");
    }

    #[test]
    fn title_wins_over_directory() {
        let ctx = ProjectContext::from_descriptor(r#"{"title": "emptyTest"}"#, Some("dir")).unwrap();
        assert_eq!(ctx.namespace(), "emptyTest");
        assert!(ctx.has_descriptor());
    }

    #[test]
    fn directory_name_when_title_missing_or_blank() {
        for text in [r#"{}"#, r#"{"title": "  "}"#, r#"{"title": 42}"#] {
            let ctx = ProjectContext::from_descriptor(text, Some("webTest")).unwrap();
            assert_eq!(ctx.namespace(), "webTest", "{text}");
        }
    }

    #[test]
    fn malformed_descriptor_is_rejected() {
        assert!(matches!(
            ProjectContext::from_descriptor("{ not json", Some("x")),
            Err(DomainError::InvalidProjectDescriptor(_))
        ));
        assert!(matches!(
            ProjectContext::from_descriptor("[1, 2]", Some("x")),
            Err(DomainError::InvalidProjectDescriptor(_))
        ));
    }

    #[test]
    fn sanitizes_into_identifier() {
        assert_eq!(sanitize_namespace("my-app"), "my_app");
        assert_eq!(sanitize_namespace("Contoso.Web"), "Contoso.Web");
        assert_eq!(sanitize_namespace("1st project"), "_1st_project");
        assert_eq!(sanitize_namespace("   "), "MyNamespace");
    }
}

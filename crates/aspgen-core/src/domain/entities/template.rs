//! Template aggregate.
//!
//! ```text
//! Template (aggregate root)
//! ├── TemplateId         name@version
//! ├── TemplateTarget     which generator or application it renders
//! ├── TemplateMetadata   display information
//! └── TemplateTree       ordered files and directories
//!      ├── FileSpec      templated path + content
//!      └── DirectorySpec templated path
//! ```
//!
//! Templates are resolved by target (exactly one per target in a store) and
//! rendered by a [`TemplateRenderer`](crate::application::ports::TemplateRenderer)
//! into a [`ProjectStructure`](super::ProjectStructure).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::{
    entities::common::RelativePath,
    error::DomainError,
    value_objects::{ApplicationKind, GeneratorKind},
};

// ============================================================================
// TemplateTarget
// ============================================================================

/// What a template renders: one generator's output, or a whole application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateTarget {
    Generator(GeneratorKind),
    Application(ApplicationKind),
}

impl fmt::Display for TemplateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator(kind) => write!(f, "generator:{kind}"),
            Self::Application(kind) => write!(f, "application:{kind}"),
        }
    }
}

impl FromStr for TemplateTarget {
    type Err = DomainError;

    /// Parse `generator:<name>` or `application:<kind>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("generator", name)) => Ok(Self::Generator(name.parse()?)),
            Some(("application", kind)) => Ok(Self::Application(kind.parse()?)),
            _ => Err(DomainError::InvalidTemplate(format!(
                "invalid template target '{s}', expected 'generator:<name>' or 'application:<kind>'"
            ))),
        }
    }
}

// ============================================================================
// Template Identity and Storage
// ============================================================================

/// Template type identifier, displayed as `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    /// # Panics
    ///
    /// Panics if `name` contains `@`; use [`TemplateId::parse`] for input.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        assert!(
            !name.contains('@'),
            "Template name cannot contain @: {}",
            name
        );
        Self {
            name,
            version: version.into(),
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.split_once('@') {
            Some((name, version))
                if !name.is_empty() && !version.is_empty() && !version.contains('@') =>
            {
                Ok(Self::new(name, version))
            }
            _ => Err(DomainError::InvalidTemplate(format!(
                "Invalid template ID format: {s}. Expected 'name@version'"
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A stored template instance.
///
/// The uuid distinguishes a built-in template from a user override that
/// shares its `TemplateId`.
#[derive(Debug, Clone)]
pub struct TemplateRecord {
    pub uuid: Uuid,
    pub template: Template,
}

impl TemplateRecord {
    pub fn new(template: Template) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            template,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.uuid.is_nil() {
            return Err(DomainError::InvalidTemplate("UUID cannot be nil".into()));
        }
        self.template.validate()
    }
}

// ============================================================================
// Core Template Aggregate
// ============================================================================

/// A reusable output blueprint for one [`TemplateTarget`].
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id.name` and `metadata.name` are non-empty
/// 2. `tree` is non-empty
/// 3. All raw paths in `tree` are unique
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub target: TemplateTarget,
    pub metadata: TemplateMetadata,
    pub tree: TemplateTree,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.metadata.name.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Metadata name cannot be empty".into(),
            ));
        }

        if self.tree.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: self.id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for node in &self.tree.nodes {
            if !seen.insert(node.path()) {
                return Err(DomainError::DuplicatePath {
                    path: node.path().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn renders(&self, target: TemplateTarget) -> bool {
        self.target == target
    }
}

/// Builder for [`Template`]. `build()` requires id, target, metadata and at
/// least one node.
#[derive(Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    target: Option<TemplateTarget>,
    metadata: Option<TemplateMetadata>,
    tree: TemplateTree,
}

impl TemplateBuilder {
    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn target(mut self, target: TemplateTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn tree(mut self, tree: TemplateTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn add_node(mut self, node: TemplateNode) -> Self {
        self.tree.push(node);
        self
    }

    pub fn build(self) -> Result<Template, DomainError> {
        if self.tree.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template tree cannot be empty".into(),
            ));
        }

        Ok(Template {
            id: self
                .id
                .ok_or(DomainError::MissingRequiredField { field: "id" })?,
            target: self
                .target
                .ok_or(DomainError::MissingRequiredField { field: "target" })?,
            metadata: self
                .metadata
                .ok_or(DomainError::MissingRequiredField { field: "metadata" })?,
            tree: self.tree,
        })
    }
}

// ============================================================================
// Template Metadata
// ============================================================================

#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            author: "aspgen".to_string(),
            tags: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn version(mut self, ver: impl Into<String>) -> Self {
        self.version = ver.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

// ============================================================================
// Template Tree
// ============================================================================

/// Ordered filesystem nodes. Directories should precede the files inside them.
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    pub nodes: Vec<TemplateNode>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: TemplateNode) {
        self.nodes.push(node);
    }

    pub fn with_node(mut self, node: TemplateNode) -> Self {
        self.push(node);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    /// Raw (unrendered) path of the node.
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

/// A file to render. `path` may contain placeholders such as `{{NAME}}.cs`.
#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: TemplateContent,
}

impl FileSpec {
    pub fn new(path: impl Into<RelativePath>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: RelativePath,
}

impl DirectorySpec {
    pub fn new(path: impl Into<RelativePath>) -> Self {
        Self { path: path.into() }
    }
}

// ============================================================================
// Content Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Written exactly as provided.
    Literal(TemplateSource),

    /// Rendered through `RenderContext::render` (placeholders and blocks).
    Parameterized(TemplateSource),
}

impl TemplateContent {
    /// `Parameterized` when the text has template syntax, otherwise `Literal`.
    pub fn detect(source: impl Into<TemplateSource>) -> Self {
        let source = source.into();
        if source.contains_placeholder() {
            Self::Parameterized(source)
        } else {
            Self::Literal(source)
        }
    }

    pub fn source(&self) -> &TemplateSource {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s,
        }
    }
}

/// Compile-time (`include_str!`) or loaded template text.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    pub fn contains_placeholder(&self) -> bool {
        let text = self.as_str();
        text.contains("{{") && text.contains("}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readme_template() -> TemplateBuilder {
        Template::builder()
            .id(TemplateId::new("readme", "1.0.0"))
            .target(TemplateTarget::Generator(GeneratorKind::Readme))
            .metadata(TemplateMetadata::new("README"))
    }

    #[test]
    fn builder_requires_nodes() {
        assert!(readme_template().build().is_err());
    }

    #[test]
    fn builder_requires_target() {
        let result = Template::builder()
            .id(TemplateId::new("x", "1.0.0"))
            .metadata(TemplateMetadata::new("X"))
            .add_node(TemplateNode::Directory(DirectorySpec::new("src")))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::MissingRequiredField { field: "target" })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_paths() {
        let template = readme_template()
            .add_node(TemplateNode::File(FileSpec::new(
                "README.md",
                TemplateContent::detect("# {{NAMESPACE}}"),
            )))
            .add_node(TemplateNode::File(FileSpec::new(
                "README.md",
                TemplateContent::detect("dup"),
            )))
            .build()
            .unwrap();
        assert!(template.validate().is_err());
    }

    #[test]
    fn target_parses_and_displays() {
        let target: TemplateTarget = "application:mvc".parse().unwrap();
        assert_eq!(target, TemplateTarget::Application(ApplicationKind::Web));
        assert_eq!(target.to_string(), "application:web");
        assert_eq!(
            "generator:dockerfile".parse::<TemplateTarget>().unwrap(),
            TemplateTarget::Generator(GeneratorKind::Dockerfile)
        );
        assert!("plugin:x".parse::<TemplateTarget>().is_err());
    }

    #[test]
    fn template_id_parsing() {
        let id = TemplateId::parse("aspnet-startup@1.1.0").unwrap();
        assert_eq!(id.name(), "aspnet-startup");
        assert_eq!(id.version(), "1.1.0");

        assert!(TemplateId::parse("invalid").is_err());
        assert!(TemplateId::parse("too@many@ats").is_err());
        assert!(TemplateId::parse("@1.0").is_err());
    }

    #[test]
    fn detect_content_kind() {
        assert!(matches!(
            TemplateContent::detect("plain"),
            TemplateContent::Literal(_)
        ));
        assert!(matches!(
            TemplateContent::detect("{{NAME}}"),
            TemplateContent::Parameterized(_)
        ));
    }
}

//! Filesystem-based template loader.
//!
//! Discovers and parses `template.toml` manifests from a directory tree,
//! converting them into domain [`Template`] objects that override or extend
//! the built-in catalog.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── company-readme/
//! │   ├── template.toml        ← manifest (required)
//! │   └── {{OUTPUT_FILE}}      ← the generator's single output
//! └── company-web/
//!     ├── template.toml
//!     ├── project.json
//!     └── Controllers/
//!         └── HomeController.cs
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id      = "company-readme"
//! version = "1.0.0"
//!
//! # Exactly one of:
//! [target]
//! generator   = "readme"         # any generator name
//! # application = "web"          # empty | console | web | webapi | classlib | unittest
//!
//! [metadata]
//! name        = "Company README"
//! description = "README with the legal footer."   # optional
//! author      = "Platform team"                   # optional
//! tags        = ["docs"]                          # optional
//!
//! # Optional: force a file's content type.
//! # If omitted, files containing {{ }} are auto-detected as parameterized.
//! [[files]]
//! path = "LICENSE"
//! type = "literal"               # literal | parameterized
//! ```

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use aspgen_core::domain::{
    DirectorySpec, DomainError, FileSpec, RelativePath, Template, TemplateBuilder,
    TemplateContent, TemplateId, TemplateMetadata, TemplateNode, TemplateSource, TemplateTarget,
    TemplateTree,
};

/// File name of a template manifest.
pub const MANIFEST_FILE: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    pub target: TargetSection,
    pub metadata: MetadataSection,
    /// Explicit per-file type overrides. Files not listed here are
    /// auto-detected.
    pub files: Option<Vec<FileEntry>>,
    /// Directories that must exist even if they contain no tracked files.
    pub directories: Option<Vec<DirectoryEntry>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub id: String,
    pub version: String,
}

/// `[target]` section: which generator or application the template renders.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TargetSection {
    pub generator: Option<String>,
    pub application: Option<String>,
}

impl TargetSection {
    /// Resolve to a [`TemplateTarget`].
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` unless exactly one key is set; the name errors of
    /// the generator or application parser otherwise.
    pub fn resolve(&self) -> Result<TemplateTarget, DomainError> {
        match (&self.generator, &self.application) {
            (Some(name), None) => Ok(TemplateTarget::Generator(name.parse()?)),
            (None, Some(kind)) => Ok(TemplateTarget::Application(kind.parse()?)),
            (Some(_), Some(_)) => Err(DomainError::InvalidTemplate(
                "[target] must set either 'generator' or 'application', not both".into(),
            )),
            (None, None) => Err(DomainError::InvalidTemplate(
                "[target] must set 'generator' or 'application'".into(),
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetadataSection {
    /// Display name shown in `aspgen list --templates`.
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Relative path from the template root (e.g. `"Controllers/HomeController.cs"`).
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Controls how a file's content is treated during rendering.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Copied verbatim.
    Literal,
    /// Rendered through placeholders and `{{#if}}` blocks.
    Parameterized,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryEntry {
    pub path: String,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] objects from a directory tree of `template.toml` manifests.
///
/// Each immediate subdirectory of `templates_dir` that contains a valid
/// `template.toml` is treated as one template. Subdirectories that are missing
/// `template.toml`, or whose manifest is invalid, emit a `WARN` log and are
/// skipped.
///
/// ```no_run
/// use aspgen_adapters::template_loader::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./my-templates");
/// let templates = loader.load_all()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), aspgen_core::domain::DomainError>(())
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid template found under the templates directory, in
    /// directory-name order.
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` if the directory is missing or unreadable. Broken
    /// template directories are skipped, not reported.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.exists() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let read_dir = fs::read_dir(&self.templates_dir).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read templates directory '{}': {e}",
                self.templates_dir.display()
            ))
        })?;

        let mut dirs = Vec::new();
        for entry_result in read_dir {
            let entry = entry_result.map_err(|e| {
                DomainError::InvalidTemplate(format!("failed to read directory entry: {e}"))
            })?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();

        let mut templates = Vec::new();
        for path in dirs {
            match self.load_template_from_dir(&path) {
                Ok(template) => {
                    debug!(id = %template.id, target = %template.target, "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        dir   = %path.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    /// Load a single template from one subdirectory.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_template_from_dir(&self, dir: &Path) -> Result<Template, DomainError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(DomainError::InvalidTemplate(format!(
                "missing {MANIFEST_FILE} in '{}'",
                dir.display()
            )));
        }

        let raw = fs::read_to_string(&manifest_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let manifest: TemplateManifest = toml::from_str(&raw).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to parse '{}': {e}",
                manifest_path.display()
            ))
        })?;

        if manifest.template.id.contains('@') {
            return Err(DomainError::InvalidTemplate(format!(
                "template id '{}' must not contain '@'",
                manifest.template.id
            )));
        }
        let id = TemplateId::new(&manifest.template.id, &manifest.template.version);
        let target = manifest.target.resolve()?;
        let tree = build_tree_from_dir(dir, &manifest)?;

        let metadata = TemplateMetadata::new(manifest.metadata.name)
            .description(manifest.metadata.description.unwrap_or_default())
            .version(manifest.template.version)
            .author(manifest.metadata.author.unwrap_or_else(|| "aspgen".into()))
            .tags(manifest.metadata.tags.unwrap_or_default());

        let template = TemplateBuilder::default()
            .id(id)
            .target(target)
            .metadata(metadata)
            .tree(tree)
            .build()?;
        template.validate()?;
        Ok(template)
    }
}

/// Walk `dir` and build a [`TemplateTree`] according to the manifest.
///
/// Manifest `[[directories]]` come first, then everything on disk in
/// file-name order, skipping the manifest itself.
fn build_tree_from_dir(dir: &Path, manifest: &TemplateManifest) -> Result<TemplateTree, DomainError> {
    let mut tree = TemplateTree::new();
    let mut added_paths: HashSet<String> = HashSet::new();

    if let Some(dirs) = &manifest.directories {
        for entry in dirs {
            let path = normalize_path(&entry.path);
            if added_paths.insert(path.clone()) {
                tree.push(TemplateNode::Directory(DirectorySpec::new(
                    RelativePath::try_new(path)?,
                )));
            }
        }
    }

    let manifest_files: HashMap<String, FileType> = manifest
        .files
        .as_ref()
        .map(|files| {
            files
                .iter()
                .map(|f| (normalize_path(&f.path), f.file_type))
                .collect()
        })
        .unwrap_or_default();

    for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let walk_entry = walk_entry
            .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
        let abs_path = walk_entry.path();
        let rel_raw = abs_path.strip_prefix(dir).map_err(|_| {
            DomainError::InvalidTemplate(format!(
                "failed to relativise '{}' against '{}'",
                abs_path.display(),
                dir.display()
            ))
        })?;

        if walk_entry.depth() == 1 && rel_raw.as_os_str() == MANIFEST_FILE {
            continue;
        }

        let path_str = normalize_path(&rel_raw.to_string_lossy());

        if walk_entry.file_type().is_dir() {
            if added_paths.insert(path_str.clone()) {
                tree.push(TemplateNode::Directory(DirectorySpec::new(
                    RelativePath::try_new(path_str)?,
                )));
            }
            continue;
        }

        if !walk_entry.file_type().is_file() {
            continue; // symlinks and other special types
        }

        let content = fs::read_to_string(abs_path).map_err(|e| {
            DomainError::InvalidTemplate(format!("failed to read file '{path_str}': {e}"))
        })?;
        let template_content = resolve_file_content(content, manifest_files.get(&path_str).copied());

        if added_paths.insert(path_str.clone()) {
            tree.push(TemplateNode::File(FileSpec::new(
                RelativePath::try_new(path_str)?,
                template_content,
            )));
        }
    }

    Ok(tree)
}

/// An explicit manifest type wins; otherwise `{{ }}` marks the file as
/// parameterized.
fn resolve_file_content(content: String, declared: Option<FileType>) -> TemplateContent {
    let source = TemplateSource::from(content);
    match declared {
        Some(FileType::Literal) => TemplateContent::Literal(source),
        Some(FileType::Parameterized) => TemplateContent::Parameterized(source),
        None => TemplateContent::detect(source),
    }
}

/// Normalise a path to forward slashes so Windows and Unix paths compare
/// identically.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

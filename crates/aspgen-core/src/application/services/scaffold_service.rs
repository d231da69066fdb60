//! Scaffold Service - main application orchestrator.
//!
//! Two use cases:
//! 1. **generate**: run one sub-generator in a working directory
//!    (parse args → read project context → resolve template → render → write)
//! 2. **bootstrap**: scaffold a whole application into `cwd/<name>`
//!    (resolve template → render → write into a fresh directory, rollback on failure)
//!
//! Both return only after every file has been written.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        ApplicationKind, ConflictPolicy, DomainError, DomainValidator as validator, FsEntry,
        GENERATOR_REGISTRY, GeneratorArgs, GeneratorKind, PROJECT_DESCRIPTOR, ProjectContext,
        ProjectStructure, PromptAnswers, RenderContext, TemplateTarget, application_def,
        generator_def, sanitize_namespace,
    },
    error::{AspgenError, AspgenResult},
};

/// Template variable holding the file name a generator writes.
pub const OUTPUT_FILE_VARIABLE: &str = "OUTPUT_FILE";

/// One generator invocation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub generator: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub answers: PromptAnswers,
}

impl GenerationRequest {
    pub fn new(generator: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            generator: generator.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            answers: PromptAnswers::default(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_answers(mut self, answers: PromptAnswers) -> Self {
        self.answers = answers;
        self
    }
}

/// What a generator invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub generator: GeneratorKind,
    pub namespace: String,
    /// Absolute paths written.
    pub written: Vec<PathBuf>,
    /// Absolute paths left untouched because of `ConflictPolicy::Skip`.
    pub skipped: Vec<PathBuf>,
}

/// What a bootstrap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub kind: ApplicationKind,
    /// The new application directory.
    pub root: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Display row for `aspgen list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub name: &'static str,
    pub summary: &'static str,
    pub requires_name: bool,
    pub flags: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Run a sub-generator.
    ///
    /// # Errors
    ///
    /// - `UnknownGenerator` for an unregistered name
    /// - `PreconditionFailed` for bad arguments or an unreadable project descriptor
    /// - `FileConflict` when an output exists and the answer is `Fail`
    /// - `FilesystemError` on I/O failure (files created by this call are removed)
    #[instrument(
        skip_all,
        fields(generator = %request.generator, cwd = %request.cwd.display())
    )]
    pub fn generate(&self, request: &GenerationRequest) -> AspgenResult<GenerationReport> {
        let kind = self.parse_generator(&request.generator)?;
        let def = generator_def(kind);
        let precondition = |e: DomainError| ApplicationError::PreconditionFailed {
            generator: kind.to_string(),
            reason: e.to_string(),
        };

        let args = GeneratorArgs::parse(def, &request.args).map_err(precondition)?;
        let project = self.project_context(&request.cwd).map_err(|e| match e {
            AspgenError::Domain(d) => precondition(d).into(),
            other => other,
        })?;
        debug!(namespace = project.namespace(), "Project context resolved");

        let mut context = RenderContext::new(project.namespace())
            .with_variable(OUTPUT_FILE_VARIABLE, args.output_file(def));
        if let Some(name) = args.name() {
            context = context.with_name(name);
        }
        for flag in args.flags() {
            context = context.with_flag(flag.variable());
        }
        context = apply_answers(context, &request.answers);

        let template = self.store.resolve(TemplateTarget::Generator(kind))?;
        debug!(template = %template.id, "Template resolved");

        let structure = self.renderer.render(&template, &context, &request.cwd)?;
        validator::validate_project_structure(&structure)?;

        let (written, skipped) = self.write_into_existing(&structure, request.answers.conflict)?;
        info!(files = written.len(), skipped = skipped.len(), "Generator completed");

        Ok(GenerationReport {
            generator: kind,
            namespace: project.namespace().to_string(),
            written,
            skipped,
        })
    }

    /// Scaffold an application of `kind` into `cwd/<name>`.
    ///
    /// # Errors
    ///
    /// - `UnknownApplicationKind` for an unsupported kind
    /// - `InvalidIdentifier` (domain) for a name that is not a single path segment
    /// - `ProjectExists` when the target directory exists
    /// - `FilesystemError` on I/O failure (the target directory is removed)
    #[instrument(skip_all, fields(kind = %kind, name = %name, cwd = %cwd.display()))]
    pub fn bootstrap(
        &self,
        kind: &str,
        name: &str,
        cwd: &Path,
        answers: &PromptAnswers,
    ) -> AspgenResult<BootstrapReport> {
        let kind: ApplicationKind = kind.parse().map_err(|_| {
            ApplicationError::UnknownApplicationKind {
                kind: kind.to_string(),
            }
        })?;
        validate_application_name(name)?;
        let def = application_def(kind);

        let mut context = RenderContext::new(sanitize_namespace(name))
            .with_name(name)
            .with_variable("APP_KIND", kind.as_str());
        if def.web {
            context = context.with_flag("WEB");
        }
        if def.sqlite {
            context = context.with_flag("SQLITE");
        }
        context = apply_answers(context, answers);

        let template = self.store.resolve(TemplateTarget::Application(kind))?;
        let root = cwd.join(name);
        let structure = self.renderer.render(&template, &context, &root)?;
        validator::validate_project_structure(&structure)?;

        let written = self.write_structure(&structure)?;
        info!(root = %root.display(), files = written.len(), "Application bootstrapped");

        Ok(BootstrapReport {
            kind,
            root,
            written,
        })
    }

    /// Every generator with its arguments, in catalog order.
    pub fn generators(&self) -> Vec<GeneratorInfo> {
        GENERATOR_REGISTRY
            .iter()
            .map(|def| GeneratorInfo {
                name: def.kind.as_str(),
                summary: def.summary,
                requires_name: def.requires_name,
                flags: def.flags.iter().map(ToString::to_string).collect(),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn parse_generator(&self, name: &str) -> AspgenResult<GeneratorKind> {
        name.parse().map_err(|_| {
            ApplicationError::UnknownGenerator {
                name: name.to_string(),
                available: GENERATOR_REGISTRY
                    .iter()
                    .map(|d| d.kind.as_str().to_string())
                    .collect(),
            }
            .into()
        })
    }

    fn project_context(&self, cwd: &Path) -> AspgenResult<ProjectContext> {
        let descriptor = cwd.join(PROJECT_DESCRIPTOR);
        if !self.filesystem.is_file(&descriptor) {
            return Ok(ProjectContext::standalone());
        }
        let text = self.filesystem.read_to_string(&descriptor)?;
        let dir_name = cwd.file_name().and_then(|n| n.to_str());
        Ok(ProjectContext::from_descriptor(&text, dir_name)?)
    }

    /// Write generator output into a directory that may already hold files.
    fn write_into_existing(
        &self,
        structure: &ProjectStructure,
        policy: ConflictPolicy,
    ) -> AspgenResult<(Vec<PathBuf>, Vec<PathBuf>)> {
        let existing: Vec<PathBuf> = structure
            .files()
            .map(|f| structure.resolve(&f.path))
            .filter(|p| self.filesystem.exists(p))
            .collect();

        if policy == ConflictPolicy::Fail {
            if let Some(path) = existing.first() {
                return Err(ApplicationError::FileConflict { path: path.clone() }.into());
            }
        }

        let mut created = Vec::new();
        let mut written = Vec::new();
        let mut skipped = Vec::new();

        let result = (|| -> AspgenResult<()> {
            self.filesystem.create_dir_all(structure.root())?;
            for entry in &structure.entries {
                let path = structure.resolve(entry.path());
                match entry {
                    FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                    FsEntry::File(file) => {
                        let preexisting = existing.contains(&path);
                        if preexisting && policy == ConflictPolicy::Skip {
                            debug!(path = %path.display(), "Keeping existing file");
                            skipped.push(path);
                            continue;
                        }
                        if let Some(parent) = path.parent() {
                            self.filesystem.create_dir_all(parent)?;
                        }
                        self.filesystem.write_file(&path, &file.content)?;
                        if !preexisting {
                            created.push(path.clone());
                        }
                        written.push(path);
                    }
                }
            }
            Ok(())
        })();

        match result {
            Ok(()) => Ok((written, skipped)),
            Err(e) => {
                warn!(error = %e, "Write failed, removing files created by this run");
                for path in created.iter().rev() {
                    if let Err(err) = self.filesystem.remove_file(path) {
                        warn!(error = %err, path = %path.display(), "Rollback failed");
                    }
                }
                Err(e)
            }
        }
    }

    /// Write a structure into a fresh root with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure) -> AspgenResult<Vec<PathBuf>> {
        if self.filesystem.exists(structure.root()) {
            return Err(ApplicationError::ProjectExists {
                path: structure.root().to_path_buf(),
            }
            .into());
        }

        match self.write_all(structure) {
            Ok(written) => Ok(written),
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> AspgenResult<Vec<PathBuf>> {
        self.filesystem.create_dir_all(structure.root())?;

        let mut written = Vec::new();
        for entry in &structure.entries {
            let path = structure.resolve(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                    written.push(path);
                }
            }
        }

        Ok(written)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

fn apply_answers(context: RenderContext, answers: &PromptAnswers) -> RenderContext {
    answers
        .variables
        .iter()
        .fold(context, |ctx, (k, v)| ctx.with_variable(k.as_str(), v.as_str()))
}

/// An application name becomes a directory: one non-hidden path segment.
fn validate_application_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidIdentifier {
        value: name.to_string(),
        reason: reason.to_string(),
    };
    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{
        FileSpec, Template, TemplateContent, TemplateId, TemplateMetadata, TemplateNode,
    };
    use std::sync::Mutex;

    /// Store with one template per requested target; the file renders `{{OUTPUT_FILE}}`.
    struct FixedStore;

    impl TemplateStore for FixedStore {
        fn resolve(&self, target: TemplateTarget) -> AspgenResult<Template> {
            let path = match target {
                TemplateTarget::Generator(_) => "{{OUTPUT_FILE}}",
                TemplateTarget::Application(_) => "project.json",
            };
            Ok(Template::builder()
                .id(TemplateId::new("fixed", "1.0.0"))
                .target(target)
                .metadata(TemplateMetadata::new("Fixed"))
                .add_node(TemplateNode::File(FileSpec::new(
                    path,
                    TemplateContent::detect("ns={{NAMESPACE}}\n"),
                )))
                .build()?)
        }
        fn get(&self, _: &TemplateId) -> AspgenResult<Template> {
            unreachable!()
        }
        fn list(&self) -> AspgenResult<Vec<Template>> {
            Ok(Vec::new())
        }
        fn insert(&self, _: Template) -> AspgenResult<()> {
            Ok(())
        }
        fn remove(&self, _: &TemplateId) -> AspgenResult<()> {
            Ok(())
        }
    }

    /// Renders file nodes with the context, nothing else.
    struct ContextRenderer;

    impl TemplateRenderer for ContextRenderer {
        fn render(
            &self,
            template: &Template,
            context: &RenderContext,
            output_root: &Path,
        ) -> AspgenResult<ProjectStructure> {
            let mut structure = ProjectStructure::new(output_root);
            for node in &template.tree.nodes {
                if let TemplateNode::File(f) = node {
                    let path = context.render_inline(&f.path.to_slash_string());
                    structure.add_file(
                        crate::domain::RelativePath::try_new(path)?,
                        context.render(f.content.source().as_str())?,
                    );
                }
            }
            Ok(structure)
        }
    }

    fn service(fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(Box::new(FixedStore), Box::new(ContextRenderer), Box::new(fs))
    }

    #[test]
    fn unknown_generator_lists_available() {
        let svc = service(MockFilesystem::new());
        let err = svc
            .generate(&GenerationRequest::new("angular", "/w"))
            .unwrap_err();
        match err {
            AspgenError::Application(ApplicationError::UnknownGenerator { available, .. }) => {
                assert!(available.contains(&"dockerfile".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_arguments_are_precondition_failures() {
        let svc = service(MockFilesystem::new());
        let err = svc
            .generate(&GenerationRequest::new("class", "/w"))
            .unwrap_err();
        assert!(matches!(
            err,
            AspgenError::Application(ApplicationError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn writes_output_with_default_namespace() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let written = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = written.clone();
        fs.expect_write_file().returning(move |p, c| {
            sink.lock().unwrap().push((p.to_path_buf(), c.to_string()));
            Ok(())
        });

        let report = service(fs)
            .generate(&GenerationRequest::new("readme", "/w").with_args(["--txt"]))
            .unwrap();

        assert_eq!(report.written, vec![PathBuf::from("/w/README.txt")]);
        assert_eq!(report.namespace, "MyNamespace");
        assert_eq!(written.lock().unwrap()[0].1, "ns=MyNamespace\n");
    }

    #[test]
    fn malformed_descriptor_is_a_precondition_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("not json".to_string()));

        let err = service(fs)
            .generate(&GenerationRequest::new("startup", "/w/app"))
            .unwrap_err();
        assert!(matches!(
            err,
            AspgenError::Application(ApplicationError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn fail_policy_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let request = GenerationRequest::new("program", "/w")
            .with_answers(PromptAnswers::new().conflict(ConflictPolicy::Fail));
        let err = service(fs).generate(&request).unwrap_err();
        assert!(matches!(
            err,
            AspgenError::Application(ApplicationError::FileConflict { .. })
        ));
    }

    #[test]
    fn skip_policy_keeps_existing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().never();

        let request = GenerationRequest::new("gitignore", "/w")
            .with_answers(PromptAnswers::new().conflict(ConflictPolicy::Skip));
        let report = service(fs).generate(&request).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped, vec![PathBuf::from("/w/.gitignore")]);
    }

    #[test]
    fn failed_write_surfaces_filesystem_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_file().never();

        let err = service(fs)
            .generate(&GenerationRequest::new("program", "/w"))
            .unwrap_err();
        assert!(matches!(
            err,
            AspgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn bootstrap_rejects_existing_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);

        let err = service(fs)
            .bootstrap("classlib", "emptyTest", Path::new("/w"), &PromptAnswers::default())
            .unwrap_err();
        assert!(matches!(
            err,
            AspgenError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn bootstrap_rolls_back_on_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/w/webTest"))
            .times(1)
            .returning(|_| Ok(()));

        let result = service(fs).bootstrap("mvc", "webTest", Path::new("/w"), &PromptAnswers::default());
        assert!(result.is_err());
    }

    #[test]
    fn bootstrap_rejects_unknown_kind_and_bad_name() {
        let svc = service(MockFilesystem::new());
        let answers = PromptAnswers::default();
        assert!(matches!(
            svc.bootstrap("rails", "x", Path::new("/w"), &answers),
            Err(AspgenError::Application(ApplicationError::UnknownApplicationKind { .. }))
        ));
        assert!(matches!(
            svc.bootstrap("web", "../up", Path::new("/w"), &answers),
            Err(AspgenError::Domain(DomainError::InvalidIdentifier { .. }))
        ));
    }

    #[test]
    fn generators_follow_registry_order() {
        let infos = service(MockFilesystem::new()).generators();
        assert_eq!(infos.len(), GENERATOR_REGISTRY.len());
        assert_eq!(infos[0].name, "program");
        assert!(infos.iter().any(|i| i.name == "dockerfile" && i.flags == ["--sqlite"]));
    }
}

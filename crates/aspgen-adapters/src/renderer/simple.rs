//! Line-block and placeholder renderer.

use std::path::Path;

use aspgen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{
        DomainValidator as validator, ProjectStructure, RelativePath, RenderContext, Template,
        TemplateContent, TemplateNode,
    },
    error::AspgenResult,
};
use tracing::{instrument, trace};

/// Renders templates through [`RenderContext`]: paths get placeholder
/// substitution, parameterized content also gets `{{#if}}` line selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> AspgenResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);

        for node in &template.tree.nodes {
            let path = render_path(node.path(), context)?;
            match node {
                TemplateNode::File(spec) => {
                    let content = render_content(&spec.content, context)?;
                    trace!(path = %path, bytes = content.len(), "rendered file");
                    structure.add_file(path, content);
                }
                TemplateNode::Directory(_) => structure.add_directory(path),
            }
        }

        validator::validate_project_structure(&structure)?;

        Ok(structure)
    }
}

fn render_path(raw: &RelativePath, ctx: &RenderContext) -> AspgenResult<RelativePath> {
    let rendered = ctx.render_inline(&raw.to_slash_string());
    if rendered.trim().is_empty() {
        return Err(ApplicationError::RenderingFailed {
            reason: format!("path '{raw}' rendered to an empty string"),
        }
        .into());
    }
    Ok(RelativePath::try_new(rendered)?)
}

fn render_content(content: &TemplateContent, ctx: &RenderContext) -> AspgenResult<String> {
    match content {
        TemplateContent::Literal(source) => Ok(source.as_str().to_string()),
        TemplateContent::Parameterized(source) => Ok(ctx.render(source.as_str())?),
    }
}

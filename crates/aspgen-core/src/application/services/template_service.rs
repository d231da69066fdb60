//! Template Service - template management operations.
//!
//! Listing and inspection of the templates behind each generator and
//! application kind. Separated from ScaffoldService for single responsibility.

use crate::{
    application::ports::TemplateStore,
    domain::{Template, TemplateId, TemplateNode, TemplateTarget},
    error::AspgenResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub id: String,
    pub target: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Raw (unrendered) file paths.
    pub files: Vec<String>,
}

impl From<&Template> for TemplateInfo {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id.to_string(),
            target: t.target.to_string(),
            name: t.metadata.name.clone(),
            description: t.metadata.description.clone(),
            tags: t.metadata.tags.clone(),
            files: t
                .tree
                .nodes
                .iter()
                .filter_map(|n| match n {
                    TemplateNode::File(f) => Some(f.path.to_slash_string()),
                    TemplateNode::Directory(_) => None,
                })
                .collect(),
        }
    }
}

pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, id: &TemplateId) -> AspgenResult<Template> {
        self.store.get(id)
    }

    /// The template currently serving a target.
    pub fn for_target(&self, target: TemplateTarget) -> AspgenResult<TemplateInfo> {
        self.store.resolve(target).map(|t| TemplateInfo::from(&t))
    }

    pub fn save(&self, template: Template) -> AspgenResult<()> {
        self.store.insert(template)
    }

    pub fn remove(&self, id: &TemplateId) -> AspgenResult<()> {
        self.store.remove(id)
    }

    pub fn list(&self) -> AspgenResult<Vec<TemplateInfo>> {
        Ok(self.store.list()?.iter().map(TemplateInfo::from).collect())
    }
}

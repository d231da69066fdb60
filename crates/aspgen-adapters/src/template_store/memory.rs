//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use aspgen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId, TemplateTarget},
    error::AspgenResult,
};
use tracing::debug;

use crate::builtin_templates;

/// Thread-safe in-memory template store, one template per target.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateTarget, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with every built-in template loaded.
    pub fn with_builtin() -> AspgenResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    pub fn load_builtin(&self) -> AspgenResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Insert every template, replacing built-ins that share a target.
    pub fn extend(&self, templates: impl IntoIterator<Item = Template>) -> AspgenResult<usize> {
        let mut count = 0;
        for template in templates {
            debug!(target_kind = %template.target, id = %template.id, "override template");
            self.insert(template)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) -> AspgenResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> AspgenResult<RwLockReadGuard<'_, BTreeMap<TemplateTarget, Template>>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> AspgenResult<RwLockWriteGuard<'_, BTreeMap<TemplateTarget, Template>>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

fn not_found(what: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::TemplateResolution {
        reason: format!("no template for {what}"),
    }
}

impl TemplateStore for InMemoryStore {
    fn resolve(&self, target: TemplateTarget) -> AspgenResult<Template> {
        self.read()?
            .get(&target)
            .cloned()
            .ok_or_else(|| not_found(target).into())
    }

    fn get(&self, id: &TemplateId) -> AspgenResult<Template> {
        self.read()?
            .values()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| not_found(id).into())
    }

    fn list(&self) -> AspgenResult<Vec<Template>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> AspgenResult<()> {
        validator::validate_template(&template)?;
        self.write()?.insert(template.target, template);
        Ok(())
    }

    fn remove(&self, id: &TemplateId) -> AspgenResult<()> {
        let mut inner = self.write()?;
        let target = inner
            .iter()
            .find(|(_, t)| &t.id == id)
            .map(|(target, _)| *target)
            .ok_or_else(|| not_found(id))?;
        inner.remove(&target);
        Ok(())
    }
}

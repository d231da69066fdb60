//! Ordered, uniquely named scenario sets.

use std::collections::HashSet;

use crate::error::{HarnessError, HarnessResult};
use crate::scenario::Scenario;

#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
    names: HashSet<String>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario. Names must be unique within the registry.
    pub fn register(&mut self, scenario: Scenario) -> HarnessResult<()> {
        if !self.names.insert(scenario.name().to_string()) {
            return Err(HarnessError::InvalidScenario(format!(
                "duplicate scenario name '{}'",
                scenario.name()
            )));
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    pub fn extend<I>(&mut self, scenarios: I) -> HarnessResult<()>
    where
        I: IntoIterator<Item = Scenario>,
    {
        scenarios.into_iter().try_for_each(|s| self.register(s))
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name() == name)
    }

    /// Scenarios whose name contains `needle`, in registration order.
    pub fn filter<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Scenario> + 'a {
        self.scenarios.iter().filter(move |s| s.name().contains(needle))
    }

    pub fn pending(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(|s| s.is_pending())
    }
}

impl<'a> IntoIterator for &'a ScenarioRegistry {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

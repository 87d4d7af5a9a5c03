//! Group registry: the fixed, ordered list of broadcast destinations, addressed by position.

use groupcast_core::{GroupcastError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// One destination group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

impl Group {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ordered, immutable list of groups. Indices handed out by [`GroupRegistry::iter`] stay valid for the process lifetime.
#[derive(Debug, Clone)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    /// Builds a registry; rejects an empty list, duplicate ids and blank names.
    pub fn new(groups: Vec<Group>) -> Result<Self> {
        if groups.is_empty() {
            return Err(GroupcastError::Config(
                "at least one destination group is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for group in &groups {
            if group.name.trim().is_empty() {
                return Err(GroupcastError::Config(format!(
                    "group {} has an empty display name",
                    group.id
                )));
            }
            if !seen.insert(group.id) {
                return Err(GroupcastError::Config(format!(
                    "group id {} is listed more than once",
                    group.id
                )));
            }
        }
        Ok(Self { groups })
    }

    /// Pairs ids with names by position; both lists must have the same length.
    pub fn from_pairs(ids: Vec<i64>, names: Vec<String>) -> Result<Self> {
        if ids.len() != names.len() {
            return Err(GroupcastError::Config(format!(
                "GROUP_IDS has {} entries but GROUP_NAMES has {}",
                ids.len(),
                names.len()
            )));
        }
        Self::new(
            ids.into_iter()
                .zip(names)
                .map(|(id, name)| Group { id, name })
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// (index, group) pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Group)> {
        self.groups.iter().enumerate()
    }

    /// Groups at the given indices, in the order given. Unknown indices are skipped.
    pub fn resolve<'a, I>(&self, indices: I) -> Vec<Group>
    where
        I: IntoIterator<Item = &'a usize>,
    {
        indices
            .into_iter()
            .filter_map(|&i| self.groups.get(i).cloned())
            .collect()
    }

    pub fn all(&self) -> &[Group] {
        &self.groups
    }
}

//! Task catalog lookup boundary.
//!
//! The catalog resolves task references against the namespaced and
//! cluster-scoped task sets. Resolution is read-only from the core's
//! perspective; any fetching happens before the transformation runs. An
//! absent resolution means "invalid reference" and selects the invalid
//! placeholder path in builder mode.

use crate::model::{TaskReference, TaskScope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A task resource resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTask {
    /// The task resource name.
    pub name: String,
    /// The scope the task was found in.
    pub scope: TaskScope,
    /// Optional description from the task resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResolvedTask {
    /// Creates a resolved task.
    #[must_use]
    pub fn new(name: impl Into<String>, scope: TaskScope) -> Self {
        Self {
            name: name.into(),
            scope,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Lookup of task references against a resolved task snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait TaskCatalog {
    /// Resolves a reference, or returns `None` when no task resource with
    /// that name exists in the referenced scope.
    fn resolve(&self, reference: &TaskReference) -> Option<ResolvedTask>;
}

/// An in-memory catalog over pre-fetched task snapshots.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskCatalog {
    namespaced: BTreeMap<String, ResolvedTask>,
    cluster: BTreeMap<String, ResolvedTask>,
}

impl InMemoryTaskCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespaced task.
    #[must_use]
    pub fn with_namespaced_task(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.namespaced
            .insert(name.clone(), ResolvedTask::new(name, TaskScope::Namespaced));
        self
    }

    /// Adds a cluster-scoped task.
    #[must_use]
    pub fn with_cluster_task(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.cluster
            .insert(name.clone(), ResolvedTask::new(name, TaskScope::Cluster));
        self
    }

    /// Returns the number of tasks across both scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaced.len() + self.cluster.len()
    }

    /// Returns true when the catalog holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaced.is_empty() && self.cluster.is_empty()
    }
}

impl TaskCatalog for InMemoryTaskCatalog {
    fn resolve(&self, reference: &TaskReference) -> Option<ResolvedTask> {
        let tasks = match reference.scope {
            TaskScope::Namespaced => &self.namespaced,
            TaskScope::Cluster => &self.cluster,
        };
        tasks.get(&reference.name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryTaskCatalog {
        InMemoryTaskCatalog::new()
            .with_namespaced_task("build-task")
            .with_cluster_task("git-clone")
    }

    #[test]
    fn test_resolve_namespaced() {
        let resolved = catalog()
            .resolve(&TaskReference::namespaced("build-task"))
            .unwrap();
        assert_eq!(resolved.scope, TaskScope::Namespaced);
    }

    #[test]
    fn test_resolve_cluster() {
        let resolved = catalog()
            .resolve(&TaskReference::cluster("git-clone"))
            .unwrap();
        assert_eq!(resolved.scope, TaskScope::Cluster);
    }

    #[test]
    fn test_scopes_do_not_cross() {
        // A namespaced reference never falls back to the cluster set.
        assert!(catalog()
            .resolve(&TaskReference::namespaced("git-clone"))
            .is_none());
        assert!(catalog()
            .resolve(&TaskReference::cluster("build-task"))
            .is_none());
    }

    #[test]
    fn test_unknown_reference_is_absent() {
        assert!(catalog()
            .resolve(&TaskReference::namespaced("unknown"))
            .is_none());
    }

    #[test]
    fn test_catalog_len() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(InMemoryTaskCatalog::new().is_empty());
    }
}

//! Registry of the browser launchers a host can choose from.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{BrowserLauncher, LauncherSummary};

/// In-memory registry of browser launchers keyed by [`BrowserLauncher::id`].
#[derive(Default, Clone)]
pub struct LauncherRegistry {
    launchers: BTreeMap<&'static str, Arc<dyn BrowserLauncher>>,
}

impl LauncherRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a launcher, replacing any previous one with the same id.
    pub fn register<L>(&mut self, launcher: L)
    where
        L: BrowserLauncher + 'static,
    {
        self.register_arc(Arc::new(launcher));
    }

    /// Register an already shared launcher.
    pub fn register_arc(&mut self, launcher: Arc<dyn BrowserLauncher>) {
        self.launchers.insert(launcher.id(), launcher);
    }

    /// Retrieve a launcher by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn BrowserLauncher>> {
        self.launchers.get(id).cloned()
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.launchers.keys().copied()
    }

    /// Summaries for every registered launcher.
    #[must_use]
    pub fn summaries(&self) -> Vec<LauncherSummary> {
        self.launchers
            .values()
            .map(|launcher| LauncherSummary {
                id: launcher.id().to_string(),
                label: launcher.label().to_string(),
            })
            .collect()
    }
}

impl std::fmt::Debug for LauncherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherRegistry")
            .field("launchers", &self.launchers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostResult;

    struct Named(&'static str);

    impl BrowserLauncher for Named {
        fn id(&self) -> &'static str {
            self.0
        }

        fn label(&self) -> &'static str {
            "Named"
        }

        fn browse(&self, _url: &str) -> HostResult<()> {
            Ok(())
        }
    }

    #[test]
    fn ids_are_sorted_and_deduplicated() {
        let mut registry = LauncherRegistry::new();
        registry.register(Named("system"));
        registry.register(Named("print"));
        registry.register(Named("system"));

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["print", "system"]);
        assert_eq!(registry.summaries().len(), 2);
        assert!(registry.get("missing").is_none());
    }
}

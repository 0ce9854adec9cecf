use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    BrowserLauncher, ConfirmPrompt, ConfirmRequest, Error, LauncherRegistry, LauncherSummary,
    OpenOutcome, Permalink, Result,
};

/// Confirms a permalink with the user and hands it to a browser launcher.
#[derive(Clone)]
pub struct OpenService {
    registry: Arc<LauncherRegistry>,
}

impl OpenService {
    /// Create a service backed by the provided registry.
    #[must_use]
    pub fn new(registry: LauncherRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// List summaries for all registered launchers.
    #[must_use]
    pub fn summaries(&self) -> Vec<LauncherSummary> {
        self.registry.summaries()
    }

    /// Look up a launcher by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LauncherNotRegistered`] when the id is unknown.
    pub fn launcher(&self, launcher_id: &str) -> Result<Arc<dyn BrowserLauncher>> {
        self.registry
            .get(launcher_id)
            .ok_or_else(|| Error::LauncherNotRegistered {
                launcher: launcher_id.to_string(),
            })
    }

    /// Ask `prompt` whether to open `permalink`, then open it with the launcher.
    ///
    /// The launcher is looked up before the user is asked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LauncherNotRegistered`], [`Error::Prompt`] or
    /// [`Error::Launcher`].
    pub fn confirm_and_open(
        &self,
        launcher_id: &str,
        prompt: &dyn ConfirmPrompt,
        permalink: &Permalink,
    ) -> Result<OpenOutcome> {
        let launcher = self.launcher(launcher_id)?;
        let request = ConfirmRequest::open_url(permalink.url.as_str());

        let answer = prompt
            .confirm(&request)
            .map_err(|source| Error::Prompt { source })?;
        if !answer.is_yes() {
            debug!(url = %permalink.url, "user declined to open permalink");
            return Ok(OpenOutcome::Declined);
        }

        launcher
            .browse(&permalink.url)
            .map_err(|source| Error::Launcher {
                launcher: launcher_id.to_string(),
                source,
            })?;
        info!(url = %permalink.url, launcher = launcher_id, "opened permalink");
        Ok(OpenOutcome::Opened)
    }
}

impl std::fmt::Debug for OpenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let launcher_ids: Vec<String> = self
            .registry
            .ids()
            .map(std::string::ToString::to_string)
            .collect();
        f.debug_struct("OpenService")
            .field("launchers", &launcher_ids)
            .finish()
    }
}

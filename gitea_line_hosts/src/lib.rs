mod print;
mod prompt;
mod system_browser;

pub use print::PrintLauncher;
pub use prompt::{AutoConfirm, TerminalPrompt};
pub use system_browser::{SystemBrowser, BROWSER_ENV};

use std::time::Duration;

use gitea_line_host_api::LauncherRegistry;

/// Build a launcher registry populated with the builtin launchers.
///
/// `browser_timeout` bounds how long the system opener is waited on.
#[must_use]
pub fn default_registry(browser_timeout: Duration) -> LauncherRegistry {
    let mut registry = LauncherRegistry::new();
    registry.register(SystemBrowser::from_env().with_timeout(browser_timeout));
    registry.register(PrintLauncher::stdout());
    registry
}

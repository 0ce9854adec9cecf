use std::env;
use std::ffi::OsString;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gitea_line_host_api::{BrowserLauncher, HostError, HostResult};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable naming the command used to open URLs.
pub const BROWSER_ENV: &str = "GITEA_LINE_BROWSER";

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
}

impl SystemBrowser {
    /// Use the platform opener (`xdg-open`, `open` or `start`).
    #[must_use]
    pub fn new() -> Self {
        let (program, args) = platform_opener();
        Self {
            program,
            args,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use the command in [`BROWSER_ENV`] when set, otherwise the platform opener.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var_os(BROWSER_ENV).filter(|value| !value.is_empty()) {
            Some(program) => Self::with_command(program),
            None => Self::new(),
        }
    }

    /// Open URLs by running `program <url>`.
    #[must_use]
    pub fn with_command(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// How long to wait for the opener to exit before assuming it launched.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SystemBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserLauncher for SystemBrowser {
    fn id(&self) -> &'static str {
        "system"
    }

    fn label(&self) -> &'static str {
        "System Browser"
    }

    fn browse(&self, url: &str) -> HostResult<()> {
        let program = self.program.to_string_lossy().into_owned();
        debug!(%program, %url, "launching browser");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| HostError::message(format!("failed to spawn {program}: {err}")))?;

        let stderr_handle = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || -> io::Result<Vec<u8>> {
                let mut buffer = Vec::new();
                stderr.read_to_end(&mut buffer)?;
                Ok(buffer)
            })
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(
                    %program,
                    timeout_secs = self.timeout.as_secs(),
                    "browser opener still running, assuming it launched"
                );
                thread::spawn(move || {
                    let status = child.wait();
                    let _ = stderr_handle.map(JoinHandle::join);
                    debug!(?status, "browser opener exited");
                });
                return Ok(());
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(HostError::message(format!(
                    "failed waiting on {program}: {err}"
                )));
            }
        };

        if status.success() {
            return Ok(());
        }

        let stderr = match stderr_handle.map(JoinHandle::join) {
            Some(Ok(Ok(bytes))) => String::from_utf8_lossy(&bytes).into_owned(),
            _ => String::new(),
        };
        let code = status
            .code()
            .map_or_else(|| "terminated".to_string(), |c| c.to_string());
        Err(HostError::message(format!(
            "{program} failed with status {code}: {}",
            stderr.trim()
        )))
    }
}

fn platform_opener() -> (OsString, Vec<OsString>) {
    if cfg!(target_os = "macos") {
        (OsString::from("open"), Vec::new())
    } else if cfg!(windows) {
        (
            OsString::from("cmd"),
            vec!["/C".into(), "start".into(), "".into()],
        )
    } else {
        (OsString::from("xdg-open"), Vec::new())
    }
}

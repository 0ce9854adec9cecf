use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use gitea_line_host_api::{BrowserLauncher, HostError, HostResult};

/// Launcher that writes the URL to a stream instead of opening it.
#[derive(Debug)]
pub struct PrintLauncher<W> {
    out: Mutex<W>,
}

impl PrintLauncher<Stdout> {
    /// Print URLs on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> PrintLauncher<W> {
    /// Print URLs to `out`, one per line.
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> BrowserLauncher for PrintLauncher<W> {
    fn id(&self) -> &'static str {
        "print"
    }

    fn label(&self) -> &'static str {
        "Print URL"
    }

    fn browse(&self, url: &str) -> HostResult<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| HostError::message("print launcher output poisoned"))?;
        writeln!(out, "{url}")
            .and_then(|()| out.flush())
            .map_err(|err| HostError::message(format!("failed to write URL: {err}")))
    }
}

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::Mutex;

use gitea_line_host_api::{ConfirmPrompt, ConfirmRequest, Confirmation, HostError, HostResult};

/// Prompt that always answers yes. Used when confirmation is turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _request: &ConfirmRequest) -> HostResult<Confirmation> {
        Ok(Confirmation::Yes)
    }
}

#[derive(Debug)]
struct PromptIo<R, W> {
    input: R,
    output: W,
}

/// Line-based yes/no prompt on a terminal.
///
/// An empty answer confirms, matching the dialog's default button.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    io: Mutex<PromptIo<R, W>>,
}

impl TerminalPrompt<BufReader<Stdin>, Stderr> {
    /// Ask on stderr and read the answer from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead + Send, W: Write + Send> TerminalPrompt<R, W> {
    /// Prompt on `output`, reading answers from `input`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new(PromptIo { input, output }),
        }
    }

    /// Recover the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        let io = self
            .io
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        (io.input, io.output)
    }
}

impl<R: BufRead + Send, W: Write + Send> ConfirmPrompt for TerminalPrompt<R, W> {
    fn confirm(&self, request: &ConfirmRequest) -> HostResult<Confirmation> {
        let mut io = self
            .io
            .lock()
            .map_err(|_| HostError::message("terminal prompt poisoned"))?;

        write!(io.output, "{} {} [Y/n] ", request.title, request.message)
            .and_then(|()| io.output.flush())
            .map_err(|err| HostError::message(format!("failed to write prompt: {err}")))?;

        let mut answer = String::new();
        let read = io
            .input
            .read_line(&mut answer)
            .map_err(|err| HostError::message(format!("failed to read answer: {err}")))?;
        if read == 0 {
            return Ok(Confirmation::No);
        }
        Ok(parse_answer(&answer))
    }
}

fn parse_answer(answer: &str) -> Confirmation {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Confirmation::Yes,
        _ => Confirmation::No,
    }
}

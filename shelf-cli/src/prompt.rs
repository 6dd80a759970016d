//! Line-oriented prompting for the interactive shell.

use std::io::{self, BufRead, StdinLock, Write};

/// Reads answers from any buffered reader; stdin in the shell, a cursor in tests.
pub(crate) struct Prompter<R> {
    input: R,
}

impl Prompter<StdinLock<'static>> {
    pub(crate) fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Prompter<R> {
    pub(crate) fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    pub(crate) fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`ask`](Self::ask), substituting `default` for a blank answer.
    pub(crate) fn ask_or(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        Ok(self.ask(&format!("{label} [{default}]: "))?.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    /// Ask a yes/no question. Anything but `y`/`yes` is no.
    pub(crate) fn confirm(&mut self, label: &str) -> io::Result<bool> {
        Ok(self
            .ask(&format!("{label} [y/N]: "))?
            .is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
    }
}

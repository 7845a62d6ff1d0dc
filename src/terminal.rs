//! Terminal dialogs
//!
//! [`Interaction`] over a line-oriented reader/writer pair. Prompts go to
//! the writer (stderr for the CLI) so stdout only carries rendered output.

use std::io::{self, BufRead, Write};

use crate::api::LogEntry;
use crate::client::{EditForm, Interaction};

/// Line-based dialogs on a terminal
pub struct Terminal<R, W> {
    input: R,
    output: W,
    edit_answers: Option<EditForm>,
}

impl Terminal<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            edit_answers: None,
        }
    }

    /// Answer the next edit dialog with `answers` instead of prompting
    pub fn with_edit_answers(mut self, answers: EditForm) -> Self {
        self.edit_answers = Some(answers);
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line without its line ending.
    /// `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Interaction for Terminal<R, W> {
    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        match self.ask(&format!("{} [y/N] ", message)) {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn edit_dialog(&mut self, current: &LogEntry) -> Option<EditForm> {
        if let Some(answers) = self.edit_answers.take() {
            return Some(answers);
        }

        let _ = writeln!(self.output, "Leave a field blank to keep it unchanged.");
        let start_km = self.ask(&format!("Starting Km [{}]: ", current.starting_km))?;
        let end_km = self.ask(&format!("End Km [{}]: ", current.end_km))?;
        let purpose = self.ask(&format!("Purpose [{}]: ", current.purpose))?;

        Some(EditForm::new(start_km, end_km, purpose))
    }
}

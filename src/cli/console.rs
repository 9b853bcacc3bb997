//! Interactive prompting.
//!
//! Every prompt treats an empty answer as the user backing out, which ends
//! the command with [`CliError::UserAbort`].

use crate::error::{CliError, Result};
use std::cell::RefCell;
use std::io::{BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Line-oriented user interaction
pub trait InteractiveConsole {
    /// Ask for a line of text; an empty answer falls back to `default`
    fn ask_line(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask for a secret without echoing it
    fn ask_secret(&self, prompt: &str) -> Result<String>;

    /// Ask the user to pick one of `options`; returns its index
    fn ask_choice(&self, prompt: &str, options: &[&str]) -> Result<usize>;
}

/// Console reading answers from `input` and writing prompts to `output`
pub struct TerminalConsole<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
    masked: bool,
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    /// Console on the process' stdin/stdout
    ///
    /// Secrets are read with echo disabled when stdin is a terminal.
    pub fn stdio() -> Self {
        let stdin = std::io::stdin();
        let masked = stdin.is_terminal();
        Self {
            input: RefCell::new(stdin.lock()),
            output: RefCell::new(std::io::stdout()),
            masked,
        }
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    /// Console over arbitrary streams; secrets are read as plain lines
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            masked: false,
        }
    }

    /// Consume the console, returning the output stream
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn write_prompt(&self, text: &str) -> Result<()> {
        let mut output = self.output.borrow_mut();
        write!(output, "{text}")?;
        output.flush()?;
        Ok(())
    }

    /// Read one line without its terminator; `None` on end of input
    fn read_answer(&self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_masked(&self) -> Result<String> {
        use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

        let _raw = RawModeGuard::enable()?;
        let mut secret = String::new();

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    secret.clear();
                    break;
                }
                KeyCode::Backspace => {
                    if secret.pop().is_some() {
                        self.write_prompt("\u{8} \u{8}")?;
                    }
                }
                KeyCode::Char(c) => {
                    secret.push(c);
                    self.write_prompt("*")?;
                }
                _ => {}
            }
        }

        self.write_prompt("\r\n")?;
        Ok(secret)
    }
}

fn abort(prompt: &str) -> crate::error::ReleaseError {
    CliError::UserAbort {
        prompt: prompt.trim().trim_end_matches(':').to_string(),
    }
    .into()
}

impl<R: BufRead, W: Write> InteractiveConsole for TerminalConsole<R, W> {
    fn ask_line(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(default) => self.write_prompt(&format!("{prompt}|{default}| "))?,
            None => self.write_prompt(prompt)?,
        }

        let answer = self.read_answer()?.unwrap_or_default().trim().to_string();
        let answer = if answer.is_empty() {
            default.unwrap_or_default().to_string()
        } else {
            answer
        };

        if answer.is_empty() {
            return Err(abort(prompt));
        }
        Ok(answer)
    }

    fn ask_secret(&self, prompt: &str) -> Result<String> {
        self.write_prompt(prompt)?;
        let secret = if self.masked {
            self.read_masked()?
        } else {
            self.read_answer()?.unwrap_or_default()
        };

        if secret.is_empty() {
            return Err(abort(prompt));
        }
        Ok(secret)
    }

    fn ask_choice(&self, prompt: &str, options: &[&str]) -> Result<usize> {
        {
            let mut output = self.output.borrow_mut();
            for (i, option) in options.iter().enumerate() {
                writeln!(output, "{}. {}", i + 1, option)?;
            }
        }

        loop {
            self.write_prompt(prompt)?;
            let Some(answer) = self.read_answer()? else {
                return Err(abort(prompt));
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Err(abort(prompt));
            }

            if let Some(index) = pick_option(answer, options) {
                return Ok(index);
            }

            let numbers: Vec<String> = (1..=options.len()).map(|n| n.to_string()).collect();
            let mut output = self.output.borrow_mut();
            writeln!(output, "You must choose one of [{}].", numbers.join(", "))?;
        }
    }
}

/// Resolve an answer given as a 1-based number or an unambiguous option prefix
fn pick_option(answer: &str, options: &[&str]) -> Option<usize> {
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=options.len()).contains(&n).then(|| n - 1);
    }

    let answer = answer.to_lowercase();
    let mut matches = options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.to_lowercase().starts_with(&answer));
    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}

/// Leaves raw mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

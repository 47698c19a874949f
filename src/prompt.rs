//! Interactive prompt capability.
//!
//! The reconciliation workflow and the setup wizard ask questions through
//! the `Prompter` trait so the interactive console flow, the
//! non-interactive `--yes` mode, and deterministic test doubles all drive
//! the same code path. Prompt ordering is part of the tool's observable
//! behavior; implementations must answer strictly in call order.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use colored::Colorize;

/// One option of a list prompt.
#[derive(Debug, Clone)]
pub struct SelectChoice {
    /// Label shown to the user.
    pub label: String,
    /// Value returned when chosen.
    pub value: String,
}

impl SelectChoice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

pub trait Prompter {
    /// Yes/no question. Empty input resolves to `default`.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Pick one of `choices`; returns the chosen value. The first choice is
    /// the default.
    fn select(&mut self, message: &str, choices: &[SelectChoice]) -> Result<String>;

    /// Free-form input. Empty input resolves to `default`.
    fn input(&mut self, message: &str, default: &str) -> Result<String>;

    /// Pick any subset of `choices`. Empty input resolves to `defaults`.
    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>>;

    /// Whether a user is actually answering. Non-interactive runs skip
    /// open-ended disposition prompts instead of guessing.
    fn is_interactive(&self) -> bool {
        true
    }
}

// ============================================================
// Console implementation
// ============================================================

/// Prompter reading answers from stdin.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn print_question(&self, message: &str, hint: &str) {
        print!("{} {} {} ", "?".green(), message, hint.dimmed());
        let _ = io::stdout().flush();
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        self.print_question(message, hint);
        let answer = self.read_line()?;
        Ok(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }

    fn select(&mut self, message: &str, choices: &[SelectChoice]) -> Result<String> {
        println!("{} {}", "?".green(), message);
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}) {}", i + 1, choice.label);
        }
        self.print_question("Select", "[1]");
        let answer = self.read_line()?;
        let index = answer.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        let index = index.filter(|i| *i < choices.len()).unwrap_or(0);
        Ok(choices[index].value.clone())
    }

    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        let hint = if default.is_empty() {
            String::new()
        } else {
            format!("[{}]", default)
        };
        self.print_question(message, &hint);
        let answer = self.read_line()?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>> {
        println!("{} {}", "?".green(), message);
        for (i, choice) in choices.iter().enumerate() {
            let mark = if defaults.contains(choice) { "x" } else { " " };
            println!("  [{}] {}) {}", mark, i + 1, choice);
        }
        self.print_question("Numbers, comma-separated (empty keeps defaults)", "");
        let answer = self.read_line()?;
        if answer.is_empty() {
            return Ok(defaults.to_vec());
        }

        let mut selected = Vec::new();
        for part in answer.split(',') {
            if let Some(index) = part.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1))
                && index < choices.len()
                && !selected.contains(&choices[index])
            {
                selected.push(choices[index].clone());
            }
        }
        Ok(selected)
    }
}

// ============================================================
// Non-interactive implementation
// ============================================================

/// Prompter that resolves every question to its default without asking.
/// Used for `--yes` runs and pre-commit hook invocations.
#[derive(Debug, Default)]
pub struct AutoPrompter;

impl Prompter for AutoPrompter {
    fn confirm(&mut self, _message: &str, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn select(&mut self, _message: &str, choices: &[SelectChoice]) -> Result<String> {
        Ok(choices
            .first()
            .map(|c| c.value.clone())
            .unwrap_or_default())
    }

    fn input(&mut self, _message: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn multi_select(
        &mut self,
        _message: &str,
        _choices: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>> {
        Ok(defaults.to_vec())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

// ============================================================
// Scripted implementation (test double)
// ============================================================

/// A scripted answer for `ScriptedPrompter`.
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Select(String),
    Input(String),
    MultiSelect(Vec<String>),
}

/// Deterministic prompter answering from a pre-recorded script, in order.
/// Every asked question is recorded in `transcript` so tests can assert on
/// prompt ordering and wording.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    script: VecDeque<Answer>,
    pub transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            script: answers.into_iter().collect(),
            transcript: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }

    fn next(&mut self, message: &str) -> Result<Answer> {
        self.transcript.push(message.to_string());
        match self.script.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("Prompt script exhausted at question: {}", message),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(value) => Ok(value),
            other => bail!("Expected Confirm answer for {:?}, got {:?}", message, other),
        }
    }

    fn select(&mut self, message: &str, choices: &[SelectChoice]) -> Result<String> {
        match self.next(message)? {
            Answer::Select(value) => {
                if !choices.iter().any(|c| c.value == value) {
                    bail!("Scripted select answer '{}' is not a valid choice", value);
                }
                Ok(value)
            }
            other => bail!("Expected Select answer for {:?}, got {:?}", message, other),
        }
    }

    fn input(&mut self, message: &str, _default: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Input(value) => Ok(value),
            other => bail!("Expected Input answer for {:?}, got {:?}", message, other),
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        _choices: &[String],
        _defaults: &[String],
    ) -> Result<Vec<String>> {
        match self.next(message)? {
            Answer::MultiSelect(values) => Ok(values),
            other => bail!(
                "Expected MultiSelect answer for {:?}, got {:?}",
                message,
                other
            ),
        }
    }
}

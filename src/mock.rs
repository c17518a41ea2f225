//! Test doubles for the prompt and git capabilities.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use crate::{error::AppError, git::GitConfig, prompt::Prompter};

#[derive(Debug)]
enum Answer {
    Text(String),
    Select(String),
    Confirm(bool),
    Cancel,
}

/// Prompter that replays a fixed script of answers
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    /// Options offered by each select prompt, in order
    pub offered: RefCell<Vec<Vec<String>>>,
    /// `current` values shown by each text prompt, in order
    pub shown_defaults: RefCell<Vec<Option<String>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, value: &str) -> Self {
        self.push(Answer::Text(value.to_string()))
    }

    pub fn with_selection(self, value: &str) -> Self {
        self.push(Answer::Select(value.to_string()))
    }

    pub fn with_confirm(self, value: bool) -> Self {
        self.push(Answer::Confirm(value))
    }

    pub fn with_cancel(self) -> Self {
        self.push(Answer::Cancel)
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    fn push(self, answer: Answer) -> Self {
        self.answers.borrow_mut().push_back(answer);
        self
    }

    fn next(&self, label: &str) -> Answer {
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for prompt '{label}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, label: &str, current: Option<&str>) -> Result<String, AppError> {
        self.shown_defaults
            .borrow_mut()
            .push(current.map(str::to_string));
        match self.next(label) {
            Answer::Text(value) => Ok(value),
            Answer::Cancel => Err(AppError::Cancelled("cancelled".to_string())),
            other => panic!("expected text answer for '{label}', got {other:?}"),
        }
    }

    fn select(&self, label: &str, options: Vec<String>) -> Result<String, AppError> {
        self.offered.borrow_mut().push(options.clone());
        match self.next(label) {
            Answer::Select(value) => {
                assert!(
                    options.contains(&value),
                    "'{value}' is not among the options {options:?}"
                );
                Ok(value)
            }
            Answer::Cancel => Err(AppError::Cancelled("cancelled".to_string())),
            other => panic!("expected select answer for '{label}', got {other:?}"),
        }
    }

    fn confirm(&self, label: &str) -> Result<bool, AppError> {
        match self.next(label) {
            Answer::Confirm(value) => Ok(value),
            Answer::Cancel => Err(AppError::Cancelled("cancelled".to_string())),
            other => panic!("expected confirm answer for '{label}', got {other:?}"),
        }
    }
}

/// In-memory git config that records every write
#[derive(Debug, Default)]
pub struct MemoryGit {
    values: RefCell<HashMap<String, String>>,
    fail_on: Option<String>,
    /// Keys passed to `set`, in call order
    pub writes: RefCell<Vec<String>>,
}

impl MemoryGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(name: &str, email: &str) -> Self {
        let git = Self::default();
        git.values
            .borrow_mut()
            .insert("user.name".to_string(), name.to_string());
        git.values
            .borrow_mut()
            .insert("user.email".to_string(), email.to_string());
        git
    }

    /// Makes `set` fail for `key`
    pub fn failing_on(mut self, key: &str) -> Self {
        self.fail_on = Some(key.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl GitConfig for MemoryGit {
    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.writes.borrow_mut().push(key.to_string());
        if self.fail_on.as_deref() == Some(key) {
            return Err(AppError::GitCommand(format!("could not lock config file for {key}")));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<String, AppError> {
        self.values
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::GitCommand(format!("{key} is not set")))
    }
}

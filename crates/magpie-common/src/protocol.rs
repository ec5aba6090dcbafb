use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a located element, valid for the surface that produced it.
pub type ElementId = u32;

/// How a select control should pick an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectBy {
    /// Positional index into the option list.
    Index(usize),
    /// Exact match against the option's value attribute.
    Value(String),
    /// Exact match against the option's visible label.
    Label(String),
}

impl fmt::Display for SelectBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectBy::Index(i) => write!(f, "index {i}"),
            SelectBy::Value(v) => write!(f, "value '{v}'"),
            SelectBy::Label(l) => write!(f, "label '{l}'"),
        }
    }
}

/// Target state for a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    Visible,
    Hidden,
}

/// One entry of a select control's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOptionInfo {
    pub value: String,
    pub label: String,
}

impl SelectOptionInfo {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

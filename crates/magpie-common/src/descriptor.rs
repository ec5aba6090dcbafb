use serde::{Deserialize, Serialize};
use std::fmt;

use crate::protocol::ElementId;

/// How to locate elements on a surface.
///
/// Descriptors are immutable and constructed per call; the surface resolves
/// them to zero or more element handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Descriptor {
    /// CSS-like selector.
    Css(String),
    /// Exact visible text.
    Text(String),
    /// Substring of visible text.
    TextContains(String),
    /// ARIA-style role, optionally narrowed by accessible name.
    Role {
        role: String,
        name: Option<String>,
    },
    /// A row of the given table whose text contains `text`.
    RowWithText {
        table: Box<Descriptor>,
        text: String,
    },
    /// Lookup scoped under an already-located element.
    Within {
        scope: ElementId,
        target: Box<Descriptor>,
    },
    /// First descriptor of the list that matches anything.
    AnyOf(Vec<Descriptor>),
}

impl Descriptor {
    pub fn css(selector: impl Into<String>) -> Self {
        Descriptor::Css(selector.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Descriptor::Text(text.into())
    }

    pub fn text_contains(text: impl Into<String>) -> Self {
        Descriptor::TextContains(text.into())
    }

    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Descriptor::Role {
            role: role.into(),
            name: Some(name.into()),
        }
    }

    pub fn row_with_text(table: Descriptor, text: impl Into<String>) -> Self {
        Descriptor::RowWithText {
            table: Box::new(table),
            text: text.into(),
        }
    }

    pub fn within(scope: ElementId, target: Descriptor) -> Self {
        Descriptor::Within {
            scope,
            target: Box::new(target),
        }
    }

    pub fn any_of(candidates: impl IntoIterator<Item = Descriptor>) -> Self {
        Descriptor::AnyOf(candidates.into_iter().collect())
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Css(selector) => write!(f, "{selector}"),
            Descriptor::Text(text) => write!(f, "text='{text}'"),
            Descriptor::TextContains(text) => write!(f, "text*='{text}'"),
            Descriptor::Role { role, name: None } => write!(f, "role={role}"),
            Descriptor::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name='{name}']"),
            Descriptor::RowWithText { table, text } => write!(f, "{table} >> row*='{text}'"),
            Descriptor::Within { scope, target } => write!(f, "#{scope} >> {target}"),
            Descriptor::AnyOf(candidates) => {
                let rendered: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", rendered.join(" | "))
            }
        }
    }
}

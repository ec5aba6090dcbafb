use magpie_common::descriptor::Descriptor;
use std::fmt;

/// A logical UI action, constructed per call and handed to the resolver.
///
/// The descriptor says *what* should happen; the resolver decides *how*,
/// trying fallback strategies until one matches the live DOM.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionDescriptor {
    /// Fill a text control with a value.
    Fill { target: Descriptor, value: String },

    /// Pick an option from a select-like control. `choice` may be a
    /// positional index, an option value, an option label, or a text
    /// fragment of a custom widget's option.
    SelectOption { target: Descriptor, choice: String },

    /// Find the row of `table` whose text contains `key`. Zero rows is a
    /// first-class outcome, not a failure.
    LocateRowByText { table: Descriptor, key: String },

    /// Click the first candidate descriptor that matches anything.
    ClickFirstMatch { candidates: Vec<Descriptor> },
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionDescriptor::Fill { target, .. } => write!(f, "fill {target}"),
            ActionDescriptor::SelectOption { target, choice } => {
                write!(f, "select '{choice}' on {target}")
            }
            ActionDescriptor::LocateRowByText { table, key } => {
                write!(f, "locate row '{key}' in {table}")
            }
            ActionDescriptor::ClickFirstMatch { candidates } => {
                write!(f, "click first of {} candidates", candidates.len())
            }
        }
    }
}

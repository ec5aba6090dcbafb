use magpie_common::protocol::ElementId;
use std::fmt;

/// Result of driving one logical action through its strategy chain.
///
/// Exhaustion is a value, not an error: the caller decides whether a failed
/// selection sinks the scenario or a downstream assertion catches it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// A strategy succeeded; later strategies were not attempted.
    Resolved {
        strategy: &'static str,
        element: Option<ElementId>,
    },

    /// Row search matched nothing. Distinct from exhaustion: the caller
    /// uses it to skip deletion entirely.
    NotFound,

    /// Every strategy was tried and none matched.
    Exhausted {
        target: String,
        attempts: Vec<Attempt>,
    },
}

/// One failed strategy attempt, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub strategy: &'static str,
    pub reason: String,
}

impl Attempt {
    pub fn new(strategy: &'static str, reason: impl Into<String>) -> Self {
        Self {
            strategy,
            reason: reason.into(),
        }
    }
}

impl ResolutionOutcome {
    pub fn resolved(strategy: &'static str, element: Option<ElementId>) -> Self {
        ResolutionOutcome::Resolved { strategy, element }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }

    /// The strategy that succeeded, if any.
    pub fn strategy(&self) -> Option<&'static str> {
        match self {
            ResolutionOutcome::Resolved { strategy, .. } => Some(strategy),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<ElementId> {
        match self {
            ResolutionOutcome::Resolved { element, .. } => *element,
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Resolved { strategy, .. } => {
                write!(f, "resolved via '{strategy}'")
            }
            ResolutionOutcome::NotFound => write!(f, "not found"),
            ResolutionOutcome::Exhausted { target, attempts } => {
                write!(f, "exhausted for '{target}':")?;
                for attempt in attempts {
                    write!(f, " [{}: {}]", attempt.strategy, attempt.reason)?;
                }
                Ok(())
            }
        }
    }
}

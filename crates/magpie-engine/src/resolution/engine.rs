use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use magpie_common::descriptor::Descriptor;
use magpie_common::error::SurfaceError;
use magpie_common::protocol::{ElementId, WaitState};

use crate::action::ActionDescriptor;
use crate::config::TimeoutConfig;
use crate::resolution::outcome::{Attempt, ResolutionOutcome};
use crate::resolution::select;
use crate::surface::Surface;

/// Drives logical actions through their strategy chains.
///
/// Stateless apart from the timeout table; one resolver serves a whole
/// scenario.
#[derive(Debug, Clone)]
pub struct ActionResolver {
    timeouts: TimeoutConfig,
}

impl Default for ActionResolver {
    fn default() -> Self {
        Self::new(TimeoutConfig::default())
    }
}

impl ActionResolver {
    pub fn new(timeouts: TimeoutConfig) -> Self {
        Self { timeouts }
    }

    pub(crate) fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// Resolve one action against a borrowed surface.
    ///
    /// `budget` bounds the whole chain; each attempt additionally gets at
    /// most the configured per-attempt slice, so probing a non-matching
    /// strategy cannot eat the budget of the ones after it.
    pub async fn resolve<S: Surface + ?Sized>(
        &self,
        action: &ActionDescriptor,
        surface: &mut S,
        budget: Duration,
    ) -> Result<ResolutionOutcome, SurfaceError> {
        let deadline = Instant::now() + budget;
        match action {
            ActionDescriptor::Fill { target, value } => {
                self.fill(surface, target, value, deadline).await
            }
            ActionDescriptor::SelectOption { target, choice } => {
                select::chain(self, surface, target, choice, deadline).await
            }
            ActionDescriptor::LocateRowByText { table, key } => {
                self.locate_row(surface, table, key, deadline).await
            }
            ActionDescriptor::ClickFirstMatch { candidates } => {
                self.click_first(surface, candidates, deadline).await
            }
        }
    }

    async fn fill<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        target: &Descriptor,
        value: &str,
        deadline: Instant,
    ) -> Result<ResolutionOutcome, SurfaceError> {
        let visibility = self.timeouts.visibility();
        let attempt = self
            .bounded(deadline, async {
                surface.wait_for(target, WaitState::Visible, visibility).await?;
                let id = first_match(surface, target).await?;
                surface.fill(id, value).await?;
                Ok(id)
            })
            .await?;

        match attempt {
            Ok(id) => {
                tracing::info!(%target, "filled field");
                Ok(ResolutionOutcome::resolved("fill", Some(id)))
            }
            Err(failure) => Ok(ResolutionOutcome::Exhausted {
                target: target.to_string(),
                attempts: vec![Attempt::new("fill", failure.to_string())],
            }),
        }
    }

    async fn locate_row<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        table: &Descriptor,
        key: &str,
        deadline: Instant,
    ) -> Result<ResolutionOutcome, SurfaceError> {
        let descriptor = Descriptor::row_with_text(table.clone(), key);
        let attempt = self
            .bounded(deadline, surface.locate(&descriptor))
            .await?;

        match attempt {
            Ok(rows) => match rows.first() {
                Some(row) => {
                    tracing::info!(%descriptor, row, matches = rows.len(), "row found");
                    Ok(ResolutionOutcome::resolved("row-text", Some(*row)))
                }
                None => {
                    tracing::info!(%descriptor, "row not found");
                    Ok(ResolutionOutcome::NotFound)
                }
            },
            // A surface that reports "nothing matched" as NoMatch is still
            // the first-class not-found outcome.
            Err(failure) if failure.is_no_match() => {
                tracing::info!(%descriptor, "row not found");
                Ok(ResolutionOutcome::NotFound)
            }
            // A search that never completed proves nothing about the row;
            // callers must not treat it as absence.
            Err(failure) => {
                tracing::warn!(%descriptor, %failure, "row search did not complete");
                Ok(ResolutionOutcome::Exhausted {
                    target: descriptor.to_string(),
                    attempts: vec![Attempt::new("row-text", failure.to_string())],
                })
            }
        }
    }

    async fn click_first<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        candidates: &[Descriptor],
        deadline: Instant,
    ) -> Result<ResolutionOutcome, SurfaceError> {
        let mut attempts = Vec::new();
        for candidate in candidates {
            let attempt = self
                .bounded(deadline, async {
                    let id = first_match(surface, candidate).await?;
                    surface.click(id).await?;
                    Ok(id)
                })
                .await?;

            match attempt {
                Ok(id) => {
                    tracing::info!(%candidate, "clicked first match");
                    return Ok(ResolutionOutcome::resolved("first-match", Some(id)));
                }
                Err(failure) => {
                    attempts.push(Attempt::new("first-match", format!("{candidate}: {failure}")));
                }
            }
        }

        Ok(ResolutionOutcome::Exhausted {
            target: format!("{} candidates", candidates.len()),
            attempts,
        })
    }

    /// Run one strategy attempt inside its slice of the budget.
    ///
    /// `Ok(Ok(v))` is success, `Ok(Err(failure))` a definitive failure that
    /// lets the chain continue, `Err(e)` a hard surface error.
    pub(crate) async fn bounded<T, F>(
        &self,
        deadline: Instant,
        attempt: F,
    ) -> Result<Result<T, AttemptFailure>, SurfaceError>
    where
        F: Future<Output = Result<T, SurfaceError>>,
    {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(Err(AttemptFailure::BudgetExhausted));
        }
        let window = remaining.min(self.timeouts.attempt());

        match tokio::time::timeout(window, attempt).await {
            Ok(Ok(value)) => Ok(Ok(value)),
            Ok(Err(e)) if e.is_definitive() => Ok(Err(AttemptFailure::Surface(e))),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(Err(AttemptFailure::Elapsed {
                window_ms: window.as_millis() as u64,
            })),
        }
    }
}

/// Why one bounded attempt failed without failing the surface.
///
/// Callers that treat "nothing matched" as a meaningful outcome (row
/// search) must check the variant: an elapsed window or a spent budget says
/// nothing about what is on the page.
#[derive(Debug)]
pub(crate) enum AttemptFailure {
    /// The surface definitively rejected the attempt.
    Surface(SurfaceError),
    /// The attempt's time slice elapsed before it finished.
    Elapsed { window_ms: u64 },
    /// The chain's overall budget was already spent.
    BudgetExhausted,
}

impl AttemptFailure {
    pub(crate) fn is_no_match(&self) -> bool {
        matches!(self, AttemptFailure::Surface(SurfaceError::NoMatch(_)))
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Surface(e) => write!(f, "{e}"),
            AttemptFailure::Elapsed { window_ms } => {
                write!(f, "attempt timed out after {window_ms}ms")
            }
            AttemptFailure::BudgetExhausted => write!(f, "timeout budget exhausted"),
        }
    }
}

/// First handle matching the descriptor, or `NoMatch`.
pub(crate) async fn first_match<S: Surface + ?Sized>(
    surface: &mut S,
    descriptor: &Descriptor,
) -> Result<ElementId, SurfaceError> {
    let ids = surface.locate(descriptor).await?;
    ids.first()
        .copied()
        .ok_or_else(|| SurfaceError::NoMatch(descriptor.to_string()))
}
